//! Tracking lookups against the carrier's REST API
//!
//! One `GET <base>/{trackingId}` per query, authorized with the run's bearer
//! credential and tagged with two diagnostic headers. A single attempt is made;
//! the request timeout is configured on the shared `reqwest::Client`.

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::payload::{ErrorResponse, TrackingResponse};
use crate::core::normalizer::normalize;
use crate::core::LookupClient;
use crate::types::{BearerCredential, EnrichError, EnrichmentResult, LookupError, TrackingQuery};

/// Diagnostic header carrying a caller-chosen transaction id
pub const TRANS_ID_HEADER: &str = "transId";

/// Diagnostic header naming the calling application
pub const TRANSACTION_SRC_HEADER: &str = "transactionSrc";

/// Lookup client for the carrier tracking API
#[derive(Clone)]
pub struct TrackingApiClient {
    client: Client,
    base_url: Url,
    trans_id: String,
    transaction_src: String,
}

impl TrackingApiClient {
    /// Create a client for the given tracking endpoint
    ///
    /// # Errors
    ///
    /// Returns `EnrichError::Config` if `base_url` is not an absolute URL that
    /// can take a path segment.
    pub fn new(
        client: Client,
        base_url: &str,
        trans_id: impl Into<String>,
        transaction_src: impl Into<String>,
    ) -> Result<Self, EnrichError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| EnrichError::config(format!("invalid tracking URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(EnrichError::config(format!(
                "invalid tracking URL '{}': cannot append a tracking number",
                base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            trans_id: trans_id.into(),
            transaction_src: transaction_src.into(),
        })
    }

    /// URL for a tracking query; the identifier is percent-encoded as one segment
    pub fn url_for(&self, query: &TrackingQuery) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(query.as_str());
        }
        url
    }
}

/// Classify a non-success response from its status and body
fn rejection(status: u16, body: &[u8]) -> LookupError {
    match ErrorResponse::from_body(body).first_message() {
        Some(message) => LookupError::Rejected {
            status,
            message: message.to_string(),
        },
        None => LookupError::HttpStatus { status },
    }
}

#[async_trait]
impl LookupClient for TrackingApiClient {
    async fn track(
        &self,
        query: &TrackingQuery,
        credential: &BearerCredential,
    ) -> Result<EnrichmentResult, LookupError> {
        let response = self
            .client
            .get(self.url_for(query))
            .bearer_auth(credential.as_str())
            .header(TRANS_ID_HEADER, &self.trans_id)
            .header(TRANSACTION_SRC_HEADER, &self.transaction_src)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), &body));
        }

        let payload: TrackingResponse = response.json().await?;
        let package = payload.into_first_package()?;
        let description = package
            .status_description()
            .ok_or_else(|| LookupError::malformed("package has no currentStatus.description"))?
            .to_string();

        let (arrival_date, arrival_time) = normalize(&package);
        Ok(EnrichmentResult::new(description, arrival_date, arrival_time))
    }
}
