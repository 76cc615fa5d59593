//! Course catalogue walk-through.

use tracing::info;

use super::{ensure_index, log_hits};
use crate::samples::{self, COURSES_INDEX};
use crate::DemoError;
use docstore_repository::DocumentStoreClient;
use docstore_shared::SearchQuery;

pub(super) async fn run(client: &DocumentStoreClient) -> Result<(), DemoError> {
    ensure_index(client, &samples::courses_index()).await?;

    let summary = client
        .bulk_index(COURSES_INDEX, &samples::course_documents())
        .await?;
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Loaded course catalogue"
    );

    let id = client
        .index_document(COURSES_INDEX, &samples::single_course())
        .await?;
    client
        .update_document(COURSES_INDEX, &id, &samples::course_update())
        .await?;

    let updated = client.get_document(COURSES_INDEX, &id).await?;
    info!(
        id = %id,
        title = ?updated.field("title"),
        "Course after update"
    );

    client.refresh_index(COURSES_INDEX).await?;
    let results = client
        .search(COURSES_INDEX, &SearchQuery::match_field("title", "Python"))
        .await?;
    log_hits("title:Python", &results);

    client.delete_document(COURSES_INDEX, &id).await?;
    client.refresh_index(COURSES_INDEX).await?;

    let count = client.count_documents(COURSES_INDEX, None).await?;
    info!(index = COURSES_INDEX, count = count, "Courses stored");

    Ok(())
}
