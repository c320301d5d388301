//! Core traits for credential acquisition and tracking lookups
//!
//! These traits are the seams between the batch pipeline and the remote
//! tracking service, allowing the HTTP implementations in [`crate::api`] to be
//! replaced by stubs in tests and benchmarks.

use async_trait::async_trait;

use crate::types::{BearerCredential, EnrichError, EnrichmentResult, LookupError, TrackingQuery};

/// Source of the bearer credential for a run
///
/// Called exactly once per run, before any lookup starts. A failure is fatal.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Exchange client credentials for a bearer token
    async fn acquire(&self) -> Result<BearerCredential, EnrichError>;
}

/// Client performing a single tracking lookup
///
/// Implementors provide [`track`](LookupClient::track), which keeps the failure
/// classification. Callers in the batch use [`lookup`](LookupClient::lookup),
/// which never fails and folds errors into the status string.
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Look up one tracking identifier, returning a classified failure on error
    async fn track(
        &self,
        query: &TrackingQuery,
        credential: &BearerCredential,
    ) -> Result<EnrichmentResult, LookupError>;

    /// Look up one tracking identifier; failures become `"Error: <message>"`
    async fn lookup(&self, query: &TrackingQuery, credential: &BearerCredential) -> EnrichmentResult {
        self.track(query, credential).await.into()
    }
}
