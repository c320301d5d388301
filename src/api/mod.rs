//! Carrier API module
//!
//! HTTP implementations of the core traits.
//!
//! # Components
//!
//! - `payload` - Optional-field wire shapes of tracking and error responses
//! - `token` - OAuth client-credentials `TokenProvider`
//! - `tracking` - REST `LookupClient` for tracking numbers

pub mod payload;
pub mod token;
pub mod tracking;

pub use token::OAuthTokenProvider;
pub use tracking::TrackingApiClient;

use std::time::Duration;

use crate::types::EnrichError;

/// Build the HTTP client shared by the token exchange and every lookup
///
/// `timeout` bounds each request end to end, so one slow lookup cannot stall
/// the batch.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, EnrichError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| EnrichError::runtime(format!("Failed to build HTTP client: {}", e)))
}
