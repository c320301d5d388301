use crate::pipeline::EnrichConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Enrich a shipment CSV with carrier tracking status
#[derive(Parser, Debug)]
#[command(name = "shipment-enricher")]
#[command(about = "Enrich a shipment CSV with carrier tracking status", long_about = None)]
pub struct CliArgs {
    /// CSV file to enrich in place
    #[arg(
        value_name = "INPUT",
        default_value = "orders.csv",
        help = "Path to the CSV file to enrich (must have a TrackingNumber column)"
    )]
    pub input_file: PathBuf,

    /// Maximum number of lookups in flight at once
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of tracking lookups in flight at once (default: 8)"
    )]
    pub max_concurrent: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(
        long = "timeout-secs",
        value_name = "SECONDS",
        help = "Timeout for each HTTP request in seconds (default: 30)"
    )]
    pub timeout_secs: Option<u64>,

    /// Number of tokio worker threads
    #[arg(
        long = "worker-threads",
        value_name = "COUNT",
        help = "Number of runtime worker threads (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,
}

impl CliArgs {
    /// Create an EnrichConfig from CLI arguments
    ///
    /// Unset options take their defaults; zero values are rejected by
    /// `EnrichConfig::new` with a warning and replaced by the default.
    pub fn to_enrich_config(&self) -> EnrichConfig {
        let default = EnrichConfig::default();
        EnrichConfig::new(
            self.max_concurrent.unwrap_or(default.max_concurrent),
            self.timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(default.request_timeout),
        )
    }

    /// Worker threads for the runtime, defaulting to the number of CPU cores
    pub fn worker_threads(&self) -> usize {
        match self.worker_threads {
            Some(threads) if threads > 0 => threads,
            _ => num_cpus::get(),
        }
    }
}
