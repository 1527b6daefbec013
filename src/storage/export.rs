//! Timestamped CSV export

use crate::record::{ArticleRecord, ArticleRow};
use crate::storage::traits::{FlushReport, RecordSink, StorageError, StorageResult};
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Header row, in column order
pub const CSV_COLUMNS: [&str; 6] = [
    "title",
    "url",
    "summary",
    "categories",
    "image_url",
    "date_scraped",
];

/// Format of the timestamp embedded in export file names
const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes one CSV file per export, named `<prefix>_<timestamp>.csv`
#[derive(Debug, Clone)]
pub struct CsvExporter {
    dir: PathBuf,
    prefix: String,
}

impl CsvExporter {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// File name for an export taken at `at`
    pub fn file_name(&self, at: NaiveDateTime) -> String {
        format!("{}_{}.csv", self.prefix, at.format(FILE_STAMP_FORMAT))
    }

    /// Writes `records` to a new file and returns its path
    ///
    /// The header row is written even when there are no records.
    pub fn export(&self, records: &[ArticleRecord]) -> StorageResult<PathBuf> {
        let path = self.dir.join(self.file_name(Local::now().naive_local()));

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(CSV_COLUMNS)?;
        for record in records {
            writer.serialize(ArticleRow::from(record))?;
        }
        writer.flush()?;

        tracing::info!("Saved {} articles to {}", records.len(), path.display());
        Ok(path)
    }
}

impl RecordSink for CsvExporter {
    fn name(&self) -> &str {
        "csv"
    }

    fn flush(&mut self, records: &[ArticleRecord]) -> StorageResult<FlushReport> {
        let path = self.export(records)?;
        Ok(FlushReport {
            rows: records.len(),
            location: path.display().to_string(),
        })
    }
}

/// Reads an export back into records
pub fn read_records(path: &Path) -> StorageResult<Vec<ArticleRecord>> {
    let mut reader = csv::ReaderBuilder::new().from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.iter().ne(CSV_COLUMNS.iter().copied()) {
        return Err(StorageError::MalformedRecord(format!(
            "unexpected header in {}: {:?}",
            path.display(),
            headers
        )));
    }

    reader
        .deserialize::<ArticleRow>()
        .map(|row| {
            let row = row?;
            let url = row.url.clone();
            ArticleRecord::try_from(row)
                .map_err(|e| StorageError::MalformedRecord(format!("{}: {}", url, e)))
        })
        .collect()
}
