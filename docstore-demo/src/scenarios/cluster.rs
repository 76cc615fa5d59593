//! Cluster information.

use tracing::info;

use crate::DemoError;
use docstore_repository::DocumentStoreClient;

pub(super) async fn run(client: &DocumentStoreClient) -> Result<(), DemoError> {
    let cluster = client.cluster_info().await?;
    info!(
        cluster_name = ?cluster["cluster_name"].as_str(),
        version = ?cluster["version"]["number"].as_str(),
        distribution = ?cluster["version"]["distribution"].as_str(),
        info = %cluster,
        "Cluster info"
    );
    Ok(())
}
