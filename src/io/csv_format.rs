//! CSV format handling for the shipment dataset
//!
//! This module centralizes all CSV format concerns, providing:
//! - Conversion from a header row and a data row to a `Record`
//! - Output column order derivation
//! - Record serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{Record, ENRICHMENT_COLUMNS};
use std::io::Write;

const UTF8_BOM: char = '\u{feff}';

/// Build a `Record` from a header row and a data row
///
/// Values are kept verbatim. A byte-order mark on the first header is dropped
/// so the column is addressable by its plain name.
pub fn convert_csv_row<'a, H, V>(headers: H, values: V) -> Record
where
    H: IntoIterator<Item = &'a str>,
    V: IntoIterator<Item = &'a str>,
{
    Record::from_pairs(
        headers
            .into_iter()
            .map(|header| header.trim_start_matches(UTF8_BOM))
            .zip(values),
    )
}

/// Compute the output column order for a record set
///
/// Input columns in first-seen order, without any existing `Status`,
/// `ArrivalDate` or `ArrivalTime`, followed by those three in that order.
/// Re-running on an already enriched file therefore never duplicates them.
///
/// # Returns
///
/// `None` when there are no records, since no column order can be derived.
pub fn output_columns(records: &[Record]) -> Option<Vec<String>> {
    if records.is_empty() {
        return None;
    }

    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for column in record.columns() {
            if ENRICHMENT_COLUMNS.contains(&column) || columns.iter().any(|c| c == column) {
                continue;
            }
            columns.push(column.to_string());
        }
    }

    columns.extend(ENRICHMENT_COLUMNS.iter().map(|c| c.to_string()));
    Some(columns)
}

/// Write records as CSV with the given column order
///
/// A record missing a column gets an empty field, so every row has the same width.
///
/// # Arguments
///
/// * `records` - Records to write, in output order
/// * `columns` - Header row and field order
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_records_csv(
    records: &[Record],
    columns: &[String],
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(columns)
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for (index, record) in records.iter().enumerate() {
        writer
            .write_record(columns.iter().map(|column| record.get(column).unwrap_or("")))
            .map_err(|e| format!("Failed to write row {}: {}", index + 1, e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
