//! Shipment Enricher CLI
//!
//! Enriches a shipment CSV in place with carrier tracking status.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- shipments.csv
//! cargo run -- --max-concurrent 16 --timeout-secs 10 shipments.csv
//! RUST_LOG=debug cargo run -- shipments.csv
//! ```
//!
//! Credentials are read from `UPS_CLIENT_ID` and `UPS_CLIENT_SECRET`, either in
//! the environment or in a `.env` file in the working directory. Logs go to
//! stderr; on success a single `Updated <n> rows in <path>` line goes to stdout.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (configuration, input, authentication, output)

use shipment_enricher::cli::{self, CliArgs};
use shipment_enricher::config::Config;
use shipment_enricher::pipeline::{EnrichmentPipeline, RunSummary};
use shipment_enricher::types::EnrichError;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(log_layer).init();
}

fn run(args: &CliArgs) -> Result<RunSummary, EnrichError> {
    let env = Config::from_env()?;
    let config = args.to_enrich_config();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(args.worker_threads())
        .enable_all()
        .build()
        .map_err(|e| EnrichError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

    runtime.block_on(async {
        let pipeline = EnrichmentPipeline::from_config(&env, config)?;
        pipeline.run(&args.input_file).await
    })
}

fn main() {
    // A missing .env file is fine; the environment may already be set
    dotenvy::dotenv().ok();
    setup_tracing();

    let args = cli::parse_args();

    match run(&args) {
        Ok(summary) => {
            println!(
                "Updated {} rows in {}",
                summary.rows,
                args.input_file.display()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
