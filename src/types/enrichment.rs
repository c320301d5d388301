//! Enrichment-related types
//!
//! Defines the value types that flow between the record set and the tracking API:
//! the tracking query extracted from a record, the bearer credential shared by every
//! lookup of a run, and the three-field enrichment result written back to a record.

use super::error::LookupError;
use std::fmt;

/// Prefix distinguishing a formatted lookup failure from a real carrier status
pub const ERROR_STATUS_PREFIX: &str = "Error: ";

/// Trimmed, non-empty carrier tracking identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackingQuery(String);

impl TrackingQuery {
    /// Parse a raw column value into a tracking query
    ///
    /// Surrounding whitespace is removed. Returns `None` for an empty or
    /// whitespace-only value, which is the "no tracking number" case.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque bearer token obtained once per run
///
/// The token is never inspected or refreshed. `Debug` output is redacted so the
/// credential does not leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerCredential(String);

impl BearerCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerCredential(<redacted>)")
    }
}

/// Outcome of a tracking lookup, attached to a record
///
/// Always fully populated. A failed lookup is represented by a status of the
/// form `"Error: <message>"` with empty date and time, which keeps the output
/// rectangular regardless of per-row success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentResult {
    /// Carrier status description, or a formatted lookup error
    pub status: String,

    /// Delivery date as `MM/DD`, empty when unknown
    pub arrival_date: String,

    /// End of delivery window as `H:MM am|pm`, empty when unknown
    pub arrival_time: String,
}

impl EnrichmentResult {
    pub fn new(
        status: impl Into<String>,
        arrival_date: impl Into<String>,
        arrival_time: impl Into<String>,
    ) -> Self {
        Self {
            status: status.into(),
            arrival_date: arrival_date.into(),
            arrival_time: arrival_time.into(),
        }
    }

    /// Result for a record without a tracking number
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fold a lookup failure into the status column
    pub fn from_error(error: &LookupError) -> Self {
        Self {
            status: format!("{}{}", ERROR_STATUS_PREFIX, error),
            arrival_date: String::new(),
            arrival_time: String::new(),
        }
    }

    /// Whether this result carries a formatted lookup error
    pub fn is_error(&self) -> bool {
        self.status.starts_with(ERROR_STATUS_PREFIX)
    }
}

impl From<Result<EnrichmentResult, LookupError>> for EnrichmentResult {
    fn from(outcome: Result<EnrichmentResult, LookupError>) -> Self {
        match outcome {
            Ok(result) => result,
            Err(error) => Self::from_error(&error),
        }
    }
}
