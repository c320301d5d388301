//! Record types for the shipment dataset
//!
//! This module defines the `Record` structure, one row of the tabular dataset
//! keyed by column name, along with the column names the enricher reads and writes.

use super::enrichment::{EnrichmentResult, TrackingQuery};

/// Input column carrying the carrier tracking identifier
pub const TRACKING_COLUMN: &str = "TrackingNumber";

/// Output column holding the carrier status (or a formatted lookup error)
pub const STATUS_COLUMN: &str = "Status";

/// Output column holding the delivery date as `MM/DD`
pub const ARRIVAL_DATE_COLUMN: &str = "ArrivalDate";

/// Output column holding the end of the delivery window as `H:MM am|pm`
pub const ARRIVAL_TIME_COLUMN: &str = "ArrivalTime";

/// Enrichment columns in the fixed order they are appended to the output
pub const ENRICHMENT_COLUMNS: [&str; 3] = [STATUS_COLUMN, ARRIVAL_DATE_COLUMN, ARRIVAL_TIME_COLUMN];

/// One row of the dataset
///
/// An ordered mapping of column name to string value. Column order is the order
/// in which columns were first set, which for loaded records is the input header
/// order. Setting an existing column replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs
    ///
    /// A column repeated in `pairs` keeps its first position and its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (column, value) in pairs {
            record.set(column, value);
        }
        record
    }

    /// Get the value of a column, if the record has it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Set the value of a column, appending the column if it is new
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Column names in record order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Number of columns in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Extract the tracking query from the `TrackingNumber` column
    ///
    /// Returns `None` when the column is missing, empty, or whitespace only.
    pub fn tracking_query(&self) -> Option<TrackingQuery> {
        self.get(TRACKING_COLUMN).and_then(TrackingQuery::parse)
    }

    /// Attach an enrichment result to the record
    ///
    /// Always writes all three enrichment columns so every enriched record
    /// carries the same key set.
    pub fn apply(&mut self, result: EnrichmentResult) {
        self.set(STATUS_COLUMN, result.status);
        self.set(ARRIVAL_DATE_COLUMN, result.arrival_date);
        self.set(ARRIVAL_TIME_COLUMN, result.arrival_time);
    }
}
