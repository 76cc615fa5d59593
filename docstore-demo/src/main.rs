//! Docstore Demo Entry Point
//!
//! Runs a sample scenario against an Elasticsearch/OpenSearch service.
//!
//! Usage: `docstore-demo [courses|movies|dam|info]` (default: courses)

use dotenv::dotenv;
use docstore_demo::{DemoError, Dependencies, Scenario};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// `LOG_FORMAT=json` selects structured JSON output, anything else the pretty
/// console format.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("docstore_demo=info,docstore_repository=info"));

    let json_output = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();

        info!(
            service_name = "docstore-demo",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();

        info!(
            service_name = "docstore-demo",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), DemoError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let scenario = match env::args().nth(1) {
        Some(arg) => arg.parse::<Scenario>()?,
        None => Scenario::default(),
    };

    info!(scenario = %scenario, "Starting docstore demo");

    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match scenario.run(&deps.client).await {
        Ok(()) => {
            info!(scenario = %scenario, "Scenario completed successfully");
            Ok(())
        }
        Err(e) => {
            error!(scenario = %scenario, error = %e, "Scenario failed");
            Err(e)
        }
    }
}
