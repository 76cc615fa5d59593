//! Fixed demonstration sequences run by the binary.
//!
//! Each scenario walks one sample data set through the client: index setup,
//! bulk load, refresh, searches and single-document operations.

mod cluster;
mod courses;
mod dam;
mod movies;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::info;

use crate::DemoError;
use docstore_repository::DocumentStoreClient;
use docstore_shared::{IndexSpec, SearchResponse};

/// A runnable demonstration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    /// Course catalogue: bulk load, search, update and delete.
    #[default]
    Courses,
    /// Movie plots with a compound bool query and a rejected document.
    Movies,
    /// Digital assets with keyword and nested queries.
    Dam,
    /// Cluster name and version.
    Info,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [Self::Courses, Self::Movies, Self::Dam, Self::Info];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Movies => "movies",
            Self::Dam => "dam",
            Self::Info => "info",
        }
    }

    /// Run the scenario to completion, stopping at the first failed operation.
    pub async fn run(&self, client: &DocumentStoreClient) -> Result<(), DemoError> {
        info!(scenario = self.name(), "Running scenario");
        match self {
            Self::Courses => courses::run(client).await,
            Self::Movies => movies::run(client).await,
            Self::Dam => dam::run(client).await,
            Self::Info => cluster::run(client).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(Scenario::name).collect();
                DemoError::config(format!(
                    "unknown scenario '{}', expected one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// Create the index unless it already exists.
///
/// Index creation is not idempotent, so reruns of a scenario reuse the index
/// left by a previous run.
async fn ensure_index(client: &DocumentStoreClient, spec: &IndexSpec) -> Result<(), DemoError> {
    if client.index_exists(&spec.name).await? {
        info!(index = %spec.name, "Index already exists, reusing it");
        return Ok(());
    }
    client.create_index(spec).await?;
    Ok(())
}

fn log_hits(label: &str, response: &SearchResponse) {
    info!(
        query = label,
        total = response.total(),
        took_ms = response.took_ms(),
        "Search results"
    );
    for hit in response.hits() {
        let source = Value::Object(hit.source);
        info!(
            query = label,
            id = %hit.id,
            score = ?hit.score,
            source = %source,
            "Hit"
        );
    }
}
