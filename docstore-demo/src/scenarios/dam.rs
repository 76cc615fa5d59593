//! Digital asset management walk-through.

use tracing::info;

use super::{ensure_index, log_hits};
use crate::samples::{self, DAM_INDEX};
use crate::DemoError;
use docstore_repository::DocumentStoreClient;

pub(super) async fn run(client: &DocumentStoreClient) -> Result<(), DemoError> {
    ensure_index(client, &samples::dam_index()).await?;

    let summary = client
        .bulk_index(DAM_INDEX, &samples::dam_documents())
        .await?;
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Loaded digital assets"
    );

    client.refresh_index(DAM_INDEX).await?;

    let queries = [
        ("tags:tag1", samples::dam_by_tag("tag1")),
        ("key1=value1", samples::dam_by_key_value("key1", "value1")),
        ("object_fid:object3", samples::dam_by_object_id("object3")),
    ];
    for (label, query) in &queries {
        let results = client.search(DAM_INDEX, query).await?;
        log_hits(label, &results);
    }

    Ok(())
}
