//! Ingestion command
//!
//! `ingest <csv_file>` loads threat records from a CSV file; with no
//! argument it seeds the built-in sample data set.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use threatlens_backend::{config::Config, ingest};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ingest=info,threatlens_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let csv_path = std::env::args().nth(1);

    match ingest::run(&config, csv_path.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("Data ingestion failed: {}", error);
            ExitCode::FAILURE
        }
    }
}
