//! Storage module for persisting harvested records
//!
//! This module handles the two end-of-run sinks:
//! - A timestamped CSV export (always written)
//! - An append-only SQLite `articles` table (optional)

mod export;
mod schema;
mod sqlite;
mod traits;

pub use export::{read_records, CsvExporter, CSV_COLUMNS};
pub use schema::initialize_schema;
pub use sqlite::SqliteStorage;
pub use traits::{FlushReport, RecordSink, StorageError, StorageResult};

use crate::config::OutputConfig;
use crate::record::ArticleRecord;
use crate::HarvestError;
use std::path::Path;

/// Builds the sinks requested for this run, CSV first
///
/// A database that cannot be opened is logged and left out, so the CSV
/// export still happens.
pub fn open_sinks(output: &OutputConfig, with_database: bool) -> Vec<Box<dyn RecordSink>> {
    let mut sinks: Vec<Box<dyn RecordSink>> = vec![Box::new(CsvExporter::new(
        &output.csv_dir,
        output.csv_prefix.as_str(),
    ))];

    if with_database {
        match SqliteStorage::new(Path::new(&output.database_path)) {
            Ok(storage) => {
                tracing::info!("Database initialized at {}", output.database_path);
                sinks.push(Box::new(storage));
            }
            Err(e) => tracing::error!(
                "Failed to open database {}: {}",
                output.database_path,
                e
            ),
        }
    }

    sinks
}

/// Flushes `records` to every sink, returning the reports of those that succeeded
///
/// A failing sink is logged as a database or export failure and skipped;
/// the remaining sinks still run.
pub fn flush_all(sinks: &mut [Box<dyn RecordSink>], records: &[ArticleRecord]) -> Vec<FlushReport> {
    if records.is_empty() {
        tracing::warn!("No articles collected; exporting an empty result set");
    }

    sinks
        .iter_mut()
        .filter_map(|sink| match sink.flush(records) {
            Ok(report) => Some(report),
            Err(e) => {
                let e = HarvestError::from(e);
                tracing::error!("Failed to write {} sink: {}", sink.name(), e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct FailingSink;

    impl RecordSink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        fn flush(&mut self, _records: &[ArticleRecord]) -> StorageResult<FlushReport> {
            Err(StorageError::MalformedRecord("boom".to_string()))
        }
    }

    fn output(dir: &Path) -> OutputConfig {
        OutputConfig {
            csv_dir: dir.display().to_string(),
            database_path: dir.join("articles.db").display().to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_sinks_without_database() {
        let dir = TempDir::new().unwrap();
        let sinks = open_sinks(&output(dir.path()), false);

        let names: Vec<_> = sinks.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["csv"]);
    }

    #[test]
    fn test_flush_all_writes_every_sink() {
        let dir = TempDir::new().unwrap();
        let mut sinks = open_sinks(&output(dir.path()), true);
        let records = vec![ArticleRecord::new(
            "A",
            "https://en.wikipedia.org/wiki/A",
            "s",
            vec![],
            "",
        )];

        let reports = flush_all(&mut sinks, &records);

        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.rows == 1));
        assert!(dir.path().join("articles.db").exists());
    }

    #[test]
    fn test_unopenable_database_is_left_out() {
        let dir = TempDir::new().unwrap();
        let config = OutputConfig {
            csv_dir: dir.path().display().to_string(),
            database_path: dir.path().join("missing").join("a.db").display().to_string(),
            ..Default::default()
        };

        let sinks = open_sinks(&config, true);
        assert_eq!(sinks.len(), 1);
    }

    #[test]
    fn test_failing_sink_does_not_stop_others() {
        let dir = TempDir::new().unwrap();
        let mut sinks: Vec<Box<dyn RecordSink>> = vec![
            Box::new(FailingSink),
            Box::new(CsvExporter::new(dir.path(), "articles")),
        ];

        let reports = flush_all(&mut sinks, &[]);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].rows, 0);
    }
}
