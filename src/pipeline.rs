//! End-to-end enrichment pipeline
//!
//! This module wires the components into a single run over one dataset file.
//!
//! # Architecture
//!
//! ```text
//! EnrichmentPipeline
//!     ├── EnrichConfig (max_concurrent, request_timeout)
//!     ├── Arc<dyn TokenProvider>  (OAuth client credentials)
//!     └── Arc<dyn LookupClient>   (tracking API)
//!
//! run(path)
//!     RecordStore::load ─> TokenProvider::acquire ─> BatchEnricher::run ─> RecordStore::save
//! ```
//!
//! Loading and token acquisition complete before any lookup starts. A failure
//! in any of load, acquire or save aborts the run; lookup failures never do.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::api::{build_http_client, OAuthTokenProvider, TrackingApiClient};
use crate::config::Config;
use crate::core::{BatchEnricher, LookupClient, TokenProvider};
use crate::io::RecordStore;
use crate::types::{EnrichError, Record, ERROR_STATUS_PREFIX, STATUS_COLUMN};

/// Configuration for batch enrichment
///
/// Controls how many lookups may be in flight at once and how long a single
/// request may take.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichConfig {
    /// Maximum number of lookups in flight at once
    pub max_concurrent: usize,
    /// Per-request timeout for the token exchange and each lookup
    pub request_timeout: Duration,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 8,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl EnrichConfig {
    /// Create a new EnrichConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(max_concurrent: usize, request_timeout: Duration) -> Self {
        let default = Self::default();

        let max_concurrent = if max_concurrent == 0 {
            warn!(
                "Invalid max_concurrent ({}), using default ({})",
                max_concurrent, default.max_concurrent
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        let request_timeout = if request_timeout.is_zero() {
            warn!(
                "Invalid request_timeout ({:?}), using default ({:?})",
                request_timeout, default.request_timeout
            );
            default.request_timeout
        } else {
            request_timeout
        };

        Self {
            max_concurrent,
            request_timeout,
        }
    }
}

/// Counts describing a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written back
    pub rows: usize,
    /// Rows for which a lookup was performed
    pub looked_up: usize,
    /// Rows without a tracking number
    pub skipped: usize,
    /// Looked-up rows whose status is a formatted lookup error
    pub failed: usize,
}

impl RunSummary {
    /// Tally an enriched record set
    pub fn from_records(records: &[Record]) -> Self {
        let mut summary = Self {
            rows: records.len(),
            ..Self::default()
        };

        for record in records {
            if record.tracking_query().is_none() {
                summary.skipped += 1;
                continue;
            }

            summary.looked_up += 1;
            let failed = record
                .get(STATUS_COLUMN)
                .is_some_and(|status| status.starts_with(ERROR_STATUS_PREFIX));
            if failed {
                summary.failed += 1;
            }
        }

        summary
    }
}

/// Enrichment run over a dataset file
pub struct EnrichmentPipeline {
    config: EnrichConfig,
    tokens: Arc<dyn TokenProvider>,
    client: Arc<dyn LookupClient>,
}

impl EnrichmentPipeline {
    /// Create a pipeline from explicit components
    pub fn new(
        config: EnrichConfig,
        tokens: Arc<dyn TokenProvider>,
        client: Arc<dyn LookupClient>,
    ) -> Self {
        Self {
            config,
            tokens,
            client,
        }
    }

    /// Create a pipeline talking to the carrier API described by `env`
    ///
    /// Both the token exchange and the lookups share one HTTP client with the
    /// configured request timeout.
    pub fn from_config(env: &Config, config: EnrichConfig) -> Result<Self, EnrichError> {
        let http = build_http_client(config.request_timeout)?;

        let tokens = OAuthTokenProvider::new(
            http.clone(),
            env.token_url.clone(),
            env.client_id.clone(),
            env.client_secret.clone(),
        );
        let client = TrackingApiClient::new(
            http,
            &env.tracking_url,
            env.trans_id.clone(),
            env.transaction_src.clone(),
        )?;

        Ok(Self::new(config, Arc::new(tokens), Arc::new(client)))
    }

    /// Enrich the dataset at `path` in place
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` once the enriched dataset has been written back
    /// * `Err(EnrichError)` on a fatal error (input, authentication, output)
    pub async fn run(&self, path: &Path) -> Result<RunSummary, EnrichError> {
        let store = RecordStore::new(path);

        let records = store.load().await?;
        info!(path = %path.display(), rows = records.len(), "loaded records");

        let credential = self.tokens.acquire().await?;

        let enricher = BatchEnricher::new(Arc::clone(&self.client), self.config.max_concurrent);
        let enriched = enricher.run(records, &credential).await;

        let summary = RunSummary::from_records(&enriched);
        info!(
            rows = summary.rows,
            looked_up = summary.looked_up,
            skipped = summary.skipped,
            failed = summary.failed,
            "enrichment complete"
        );

        let display_path = path.display().to_string();
        tokio::task::spawn_blocking(move || store.save(&enriched))
            .await
            .map_err(|e| EnrichError::output(display_path, e.to_string()))??;

        Ok(summary)
    }
}
