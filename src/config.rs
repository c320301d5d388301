//! Environment configuration for the carrier API
//!
//! Values are read from the process environment, after a `.env` file in the
//! working directory (if any) has been loaded by the binary.

use std::fmt;

use envconfig::Envconfig;

use crate::types::EnrichError;

#[derive(Envconfig, Clone)]
pub struct Config {
    #[envconfig(from = "UPS_CLIENT_ID")]
    pub client_id: String,

    #[envconfig(from = "UPS_CLIENT_SECRET")]
    pub client_secret: String,

    #[envconfig(
        from = "UPS_TOKEN_URL",
        default = "https://onlinetools.ups.com/security/v1/oauth/token"
    )]
    pub token_url: String,

    #[envconfig(
        from = "UPS_TRACKING_URL",
        default = "https://onlinetools.ups.com/api/track/v1/details"
    )]
    pub tracking_url: String,

    // Free-form diagnostic headers, echoed back by the API for support requests
    #[envconfig(from = "UPS_TRANS_ID", default = "track-request-demo")]
    pub trans_id: String,

    #[envconfig(from = "UPS_TRANSACTION_SRC", default = "test")]
    pub transaction_src: String,
}

impl Config {
    /// Read the configuration from the environment
    ///
    /// # Errors
    ///
    /// `EnrichError::Config` if a required variable is missing or empty.
    pub fn from_env() -> Result<Self, EnrichError> {
        Self::init_from_env()
            .map_err(|e| EnrichError::config(e.to_string()))?
            .validated()
    }

    fn validated(self) -> Result<Self, EnrichError> {
        if self.client_id.trim().is_empty() {
            return Err(EnrichError::config("UPS_CLIENT_ID is empty"));
        }
        if self.client_secret.trim().is_empty() {
            return Err(EnrichError::config("UPS_CLIENT_SECRET is empty"));
        }
        Ok(self)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("tracking_url", &self.tracking_url)
            .field("trans_id", &self.trans_id)
            .field("transaction_src", &self.transaction_src)
            .finish()
    }
}
