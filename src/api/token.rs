//! OAuth client-credentials token exchange

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::payload::ErrorResponse;
use crate::core::TokenProvider;
use crate::types::{BearerCredential, EnrichError};

const CLIENT_CREDENTIALS_BODY: &str = "grant_type=client_credentials";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Token provider for the carrier's OAuth endpoint
///
/// Posts `grant_type=client_credentials` with HTTP Basic authentication built
/// from the client id and secret, and reads `access_token` from the response.
#[derive(Clone)]
pub struct OAuthTokenProvider {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl OAuthTokenProvider {
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for OAuthTokenProvider {
    async fn acquire(&self) -> Result<BearerCredential, EnrichError> {
        debug!(url = %self.token_url, "requesting bearer token");

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(CLIENT_CREDENTIALS_BODY)
            .send()
            .await
            .map_err(|e| EnrichError::auth(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let detail = ErrorResponse::from_body(&body)
                .first_message()
                .map(|message| format!(": {}", message))
                .unwrap_or_default();
            return Err(EnrichError::auth(format!(
                "token endpoint returned {}{}",
                status, detail
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| EnrichError::auth(format!("unreadable token response: {}", e)))?;

        let credential = token
            .access_token
            .filter(|token| !token.is_empty())
            .map(BearerCredential::new)
            .ok_or_else(|| EnrichError::auth("token response is missing access_token"))?;

        info!("obtained bearer token");
        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;
    use serde_json::json;

    fn provider(server: &MockServer) -> OAuthTokenProvider {
        OAuthTokenProvider::new(Client::new(), server.url("/oauth/token"), "id", "secret")
    }

    #[tokio::test]
    async fn test_acquire_returns_access_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/oauth/token")
                // base64("id:secret")
                .header("authorization", "Basic aWQ6c2VjcmV0")
                .header("content-type", "application/x-www-form-urlencoded")
                .body("grant_type=client_credentials");
            then.status(200).json_body(json!({
                "token_type": "Bearer",
                "access_token": "abc123",
                "expires_in": "14399"
            }));
        });

        let credential = provider(&server).acquire().await.unwrap();

        mock.assert();
        assert_eq!(credential.as_str(), "abc123");
    }

    #[tokio::test]
    async fn test_acquire_rejected_credentials() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/oauth/token");
            then.status(401).json_body(json!({
                "response": { "errors": [{ "code": "10401", "message": "ClientId is Invalid" }] }
            }));
        });

        let error = provider(&server).acquire().await.unwrap_err();

        assert!(matches!(error, EnrichError::Auth { .. }));
        assert!(error.to_string().contains("401"));
        assert!(error.to_string().contains("ClientId is Invalid"));
    }

    #[tokio::test]
    async fn test_acquire_missing_access_token() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/oauth/token");
            then.status(200).json_body(json!({ "token_type": "Bearer" }));
        });

        let error = provider(&server).acquire().await.unwrap_err();
        assert_eq!(
            error,
            EnrichError::auth("token response is missing access_token")
        );
    }

    #[tokio::test]
    async fn test_acquire_unreachable_endpoint() {
        let provider =
            OAuthTokenProvider::new(Client::new(), "http://127.0.0.1:1/oauth/token", "id", "secret");

        let error = provider.acquire().await.unwrap_err();
        assert!(matches!(error, EnrichError::Auth { .. }));
        assert!(error.to_string().contains("token request failed"));
    }
}
