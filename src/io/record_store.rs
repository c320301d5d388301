//! Loading and saving the shipment dataset
//!
//! `RecordStore` reads the whole dataset into memory and writes the enriched
//! records back to the same path.
//!
//! # Design
//!
//! - Loading streams rows with csv-async over a tokio file. Any unparsable row,
//!   including one with the wrong number of fields, fails the load.
//! - Saving writes to a temporary file in the destination directory and then
//!   renames it over the destination, so a failed write never truncates the
//!   existing dataset.
//!
//! ```text
//! orders.csv ──load──> Vec<Record> ──(enrich)──> Vec<Record>
//!                                                    │
//! orders.csv <──rename── .tmpXXXX <──write───────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::io::csv_format::{convert_csv_row, output_columns, write_records_csv};
use crate::types::{EnrichError, Record};

/// File-backed dataset
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Read every record from the dataset
    ///
    /// # Returns
    ///
    /// Records in input row order, each with columns in input header order.
    ///
    /// # Errors
    ///
    /// `EnrichError::Input` if the file cannot be opened or a row cannot be parsed.
    pub async fn load(&self) -> Result<Vec<Record>, EnrichError> {
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| EnrichError::input(self.display_path(), e.to_string()))?;

        // Wrap tokio file in a compatibility layer for csv-async
        let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);

        let records = read_records(compat_file, &self.display_path()).await?;
        debug!(path = %self.path.display(), rows = records.len(), "loaded dataset");
        Ok(records)
    }

    /// Replace the dataset with `records`
    ///
    /// Columns follow [`output_columns`]. The existing file's permissions are
    /// carried over to the replacement.
    ///
    /// # Errors
    ///
    /// `EnrichError::Output` if `records` is empty or writing/renaming fails. The
    /// original file is left untouched in that case.
    pub fn save(&self, records: &[Record]) -> Result<(), EnrichError> {
        let columns = output_columns(records)
            .ok_or_else(|| EnrichError::output(self.display_path(), "no records to write"))?;

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(directory)
            .map_err(|e| EnrichError::output(self.display_path(), e.to_string()))?;

        write_records_csv(records, &columns, temp.as_file_mut())
            .map_err(|e| EnrichError::output(self.display_path(), e))?;

        temp.as_file()
            .sync_all()
            .map_err(|e| EnrichError::output(self.display_path(), e.to_string()))?;

        if let Ok(metadata) = fs::metadata(&self.path) {
            if let Err(e) = temp.as_file().set_permissions(metadata.permissions()) {
                warn!(path = %self.path.display(), error = %e, "could not keep file permissions");
            }
        }

        temp.persist(&self.path)
            .map_err(|e| EnrichError::output(self.display_path(), e.error.to_string()))?;

        debug!(path = %self.path.display(), rows = records.len(), "saved dataset");
        Ok(())
    }
}

/// Read all records from an async CSV source
///
/// The first row is the header. `source` names the input in error messages.
pub async fn read_records<R>(reader: R, source: &str) -> Result<Vec<Record>, EnrichError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut csv_reader = AsyncReaderBuilder::new().create_reader(reader);

    let headers = csv_reader
        .headers()
        .await
        .map_err(|e| EnrichError::input_csv(source, &e))?
        .clone();

    let mut records = Vec::new();
    let mut rows = csv_reader.records();
    while let Some(row) = rows.next().await {
        let row = row.map_err(|e| EnrichError::input_csv(source, &e))?;
        records.push(convert_csv_row(headers.iter(), row.iter()));
    }

    Ok(records)
}
