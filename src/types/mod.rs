//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: Dataset rows and the column names the enricher touches
//! - `enrichment`: Tracking queries, bearer credentials and enrichment results
//! - `error`: Fatal run errors and per-row lookup errors

pub mod enrichment;
pub mod error;
pub mod record;

pub use enrichment::{BearerCredential, EnrichmentResult, TrackingQuery, ERROR_STATUS_PREFIX};
pub use error::{EnrichError, LookupError};
pub use record::{
    Record, ARRIVAL_DATE_COLUMN, ARRIVAL_TIME_COLUMN, ENRICHMENT_COLUMNS, STATUS_COLUMN,
    TRACKING_COLUMN,
};
