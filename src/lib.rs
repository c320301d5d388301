//! Shipment Enricher Library
//! # Overview
//!
//! This library enriches a CSV dataset of shipments with the current carrier
//! tracking status of each row, looking rows up concurrently and writing the
//! dataset back in place.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Record, EnrichmentResult, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`config`] - Environment configuration for the carrier API
//! - [`core`] - Business logic components:
//!   - [`core::traits`] - `TokenProvider` and `LookupClient` seams
//!   - [`core::normalizer`] - Delivery date/time derivation
//!   - [`core::enricher`] - Bounded, order-preserving concurrent enrichment
//! - [`api`] - HTTP implementations of the token exchange and tracking lookup
//! - [`io`] - Dataset loading and atomic write-back
//! - [`pipeline`] - End-to-end run: load, acquire token, enrich, save
//!
//! # Output Columns
//!
//! Every row gains three columns, appended after the input columns:
//!
//! - **Status**: carrier status description, or `Error: <message>` if the lookup failed
//! - **ArrivalDate**: delivery date as `MM/DD`
//! - **ArrivalTime**: end of delivery window as `H:MM am|pm`
//!
//! Rows without a tracking number get three empty fields. Existing columns with
//! these names are overwritten, never duplicated.

// Module declarations
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use crate::core::{BatchEnricher, LookupClient, TokenProvider};
pub use io::RecordStore;
pub use pipeline::{EnrichConfig, EnrichmentPipeline, RunSummary};
pub use types::{
    BearerCredential, EnrichError, EnrichmentResult, LookupError, Record, TrackingQuery,
};
