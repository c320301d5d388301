//! Concurrent batch enrichment with a bounded in-flight window
//!
//! This module provides the `BatchEnricher` struct, which dispatches one tracking
//! lookup per record and attaches the result to that record.
//!
//! # Design
//!
//! Records without a tracking number are completed immediately with empty
//! enrichment fields. Every other record gets a tokio task performing its lookup.
//! A semaphore caps how many lookups are in flight at once.
//!
//! Records never leave the collecting task: a spawned task only returns an
//! `EnrichmentResult`, and results are matched back to their record by position.
//! Output order therefore equals input order regardless of completion order.
//!
//! # Architecture
//!
//! ```text
//! BatchEnricher
//!     ├── Arc<dyn LookupClient>     (shared, read-only)
//!     └── Arc<Semaphore>            (max_concurrent permits, per run)
//!
//! run(records, credential)
//!     ├── no tracking number  ->  EnrichmentResult::empty()
//!     └── tracking number     ->  tokio::spawn(lookup) ─┐
//!                                                       ├─ await in input order
//!                                 record.apply(result) <┘
//! ```

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::traits::LookupClient;
use crate::types::{BearerCredential, EnrichmentResult, LookupError, Record};

/// Record awaiting its enrichment result
enum PendingRecord {
    /// Result already known (no lookup needed)
    Ready(Record, EnrichmentResult),

    /// Lookup dispatched to a task
    Lookup {
        record: Record,
        tracking: String,
        handle: JoinHandle<EnrichmentResult>,
    },
}

/// Batch enricher with bounded lookup concurrency
///
/// The enricher is cloneable and holds no per-run state; the semaphore and the
/// shared credential are created for each call to [`run`](BatchEnricher::run).
#[derive(Clone)]
pub struct BatchEnricher {
    /// Client used for every lookup in the batch
    client: Arc<dyn LookupClient>,

    /// Maximum number of lookups in flight at once
    max_concurrent: usize,
}

impl BatchEnricher {
    /// Create a new BatchEnricher
    ///
    /// # Arguments
    ///
    /// * `client` - Lookup client shared by all tasks
    /// * `max_concurrent` - In-flight lookup limit; `0` is treated as `1`
    pub fn new(client: Arc<dyn LookupClient>, max_concurrent: usize) -> Self {
        Self {
            client,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// The in-flight lookup limit
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Enrich every record of the batch
    ///
    /// # Arguments
    ///
    /// * `records` - Records in input order
    /// * `credential` - Bearer credential shared read-only by every lookup
    ///
    /// # Returns
    ///
    /// The same records, in the same order, each carrying `Status`,
    /// `ArrivalDate` and `ArrivalTime`.
    ///
    /// # Guarantees
    ///
    /// - Output length equals input length and `output[i]` derives from `input[i]`
    /// - Records without a tracking number cause no lookup
    /// - A failed lookup is recorded in its row and never affects other rows
    /// - Returns only after every dispatched lookup has completed
    pub async fn run(&self, records: Vec<Record>, credential: &BearerCredential) -> Vec<Record> {
        let credential = Arc::new(credential.clone());
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));

        let mut pending = Vec::with_capacity(records.len());
        for record in records {
            let Some(query) = record.tracking_query() else {
                pending.push(PendingRecord::Ready(record, EnrichmentResult::empty()));
                continue;
            };

            let client = Arc::clone(&self.client);
            let credential = Arc::clone(&credential);
            let semaphore = Arc::clone(&semaphore);
            let tracking = query.to_string();

            let handle = tokio::spawn(async move {
                // The semaphore is never closed, so acquisition only waits.
                let _permit = semaphore.acquire_owned().await.ok();
                client.lookup(&query, &credential).await
            });

            pending.push(PendingRecord::Lookup {
                record,
                tracking,
                handle,
            });
        }

        let mut enriched = Vec::with_capacity(pending.len());
        for entry in pending {
            let (mut record, result) = match entry {
                PendingRecord::Ready(record, result) => (record, result),
                PendingRecord::Lookup {
                    record,
                    tracking,
                    handle,
                } => {
                    let result = match handle.await {
                        Ok(result) => result,
                        Err(e) => EnrichmentResult::from_error(&LookupError::Transport {
                            message: format!("lookup task failed: {}", e),
                        }),
                    };

                    if result.is_error() {
                        warn!(tracking = %tracking, status = %result.status, "tracking lookup failed");
                    } else {
                        debug!(tracking = %tracking, status = %result.status, "tracking lookup succeeded");
                    }
                    (record, result)
                }
            };

            record.apply(result);
            enriched.push(record);
        }

        enriched
    }
}
