//! I/O module
//!
//! Handles reading and writing the shipment dataset.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, column order, serialization)
//! - `record_store` - File-backed load and atomic save of the full record set

pub mod csv_format;
pub mod record_store;

pub use csv_format::{convert_csv_row, output_columns, write_records_csv};
pub use record_store::{read_records, RecordStore};
