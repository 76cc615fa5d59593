//! Movie plots walk-through.

use tracing::{info, warn};

use super::{ensure_index, log_hits};
use crate::samples::{self, MOVIES_INDEX};
use crate::DemoError;
use docstore_repository::DocumentStoreClient;

pub(super) async fn run(client: &DocumentStoreClient) -> Result<(), DemoError> {
    ensure_index(client, &samples::movies_index()).await?;

    let summary = client
        .bulk_index(MOVIES_INDEX, &samples::movie_documents())
        .await?;
    for failure in summary.failures() {
        warn!(
            position = failure.position,
            id = ?failure.id,
            error = ?failure.error.as_ref().map(ToString::to_string),
            "Movie was not stored"
        );
    }
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Loaded movies"
    );

    client.refresh_index(MOVIES_INDEX).await?;
    let count = client.count_documents(MOVIES_INDEX, None).await?;
    info!(index = MOVIES_INDEX, count = count, "Movies stored");

    let results = client
        .search(MOVIES_INDEX, &samples::nicholson_not_polanski())
        .await?;
    log_hits("cast:jack nicholson -director:roman polanski", &results);

    Ok(())
}
