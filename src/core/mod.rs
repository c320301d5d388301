//! Core business logic module
//!
//! This module contains the core enrichment components:
//! - `traits` - Seams for the token provider and the tracking lookup client
//! - `normalizer` - Delivery date and time derivation from a package entry
//! - `enricher` - Concurrent, order-preserving batch enrichment

pub mod enricher;
pub mod normalizer;
pub mod traits;

pub use enricher::BatchEnricher;
pub use normalizer::normalize;
pub use traits::{LookupClient, TokenProvider};
