//! Error types for the shipment enricher
//!
//! This module defines the two error families of a run.
//!
//! # Error Categories
//!
//! - **Fatal errors** (`EnrichError`): credential exchange failures, unreadable input,
//!   failed write-back and invalid configuration. These terminate the run.
//! - **Lookup errors** (`LookupError`): a single tracking lookup failed. These are
//!   recoverable and are folded into the record's `Status` column as
//!   `"Error: <message>"`, so the rest of the batch is unaffected.

use thiserror::Error;

/// Fatal error for an enrichment run
///
/// Every variant aborts the run; the message is surfaced to the operator and the
/// process exits non-zero.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnrichError {
    /// The identity provider rejected the credential exchange, could not be
    /// reached, or returned a response without an access token
    ///
    /// Nothing is enriched when this occurs.
    #[error("Authentication failed: {message}")]
    Auth {
        /// Description of the failure
        message: String,
    },

    /// The input dataset could not be read or parsed
    #[error("Failed to read '{path}'{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Input {
        /// Path of the input dataset
        path: String,
        /// Line number where parsing failed (if available)
        line: Option<u64>,
        /// Description of the failure
        message: String,
    },

    /// The enriched dataset could not be written back
    ///
    /// Enrichment results exist in memory but were not persisted.
    #[error("Failed to write '{path}': {message}")]
    Output {
        /// Path of the destination dataset
        path: String,
        /// Description of the failure
        message: String,
    },

    /// Required configuration is missing or invalid
    #[error("Invalid configuration: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// The async runtime or HTTP client could not be set up
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the failure
        message: String,
    },
}

impl EnrichError {
    /// Create an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        EnrichError::Auth {
            message: message.into(),
        }
    }

    /// Create an Input error without line information
    pub fn input(path: impl Into<String>, message: impl Into<String>) -> Self {
        EnrichError::Input {
            path: path.into(),
            line: None,
            message: message.into(),
        }
    }

    /// Create an Input error from a csv-async parse error, keeping its line number
    pub fn input_csv(path: impl Into<String>, error: &csv_async::Error) -> Self {
        EnrichError::Input {
            path: path.into(),
            line: error.position().map(|pos| pos.line()),
            message: error.to_string(),
        }
    }

    /// Create an Output error
    pub fn output(path: impl Into<String>, message: impl Into<String>) -> Self {
        EnrichError::Output {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        EnrichError::Config {
            message: message.into(),
        }
    }

    /// Create a Runtime error
    pub fn runtime(message: impl Into<String>) -> Self {
        EnrichError::Runtime {
            message: message.into(),
        }
    }
}

/// Classified failure of a single tracking lookup
///
/// The `Display` output is the bare message that follows `"Error: "` in the
/// `Status` column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The request never produced a response (DNS, connect, TLS, body read)
    #[error("{message}")]
    Transport {
        /// Description from the HTTP client
        message: String,
    },

    /// The request exceeded the per-lookup timeout
    #[error("Request timed out")]
    Timeout,

    /// The API answered with a non-success status and an error message
    #[error("{message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// First message from `response.errors`
        message: String,
    },

    /// The API answered with a non-success status and no usable error message
    #[error("Request failed with status code {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// The success payload did not have the expected shape
    #[error("Malformed tracking response: {reason}")]
    MalformedPayload {
        /// What was missing or unparsable
        reason: String,
    },
}

impl LookupError {
    /// Create a MalformedPayload error
    pub fn malformed(reason: impl Into<String>) -> Self {
        LookupError::MalformedPayload {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            LookupError::Timeout
        } else if error.is_decode() {
            LookupError::malformed(error.to_string())
        } else {
            LookupError::Transport {
                message: error.to_string(),
            }
        }
    }
}
