//! SQLite storage implementation
//!
//! This module provides the relational sink: an append-only `articles` table.

use crate::record::{ArticleRecord, ArticleRow};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{FlushReport, RecordSink, StorageError, StorageResult};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
    location: String,
}

impl SqliteStorage {
    /// Opens or creates the database file, creating the table if absent
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn,
            location: path.display().to_string(),
        })
    }

    /// Creates an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn,
            location: ":memory:".to_string(),
        })
    }

    /// Appends every record inside one transaction
    pub fn insert_articles(&mut self, records: &[ArticleRecord]) -> StorageResult<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO articles (title, url, summary, categories, image_url, date_scraped)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;

            for record in records {
                let row = ArticleRow::from(record);
                stmt.execute(params![
                    row.title,
                    row.url,
                    row.summary,
                    row.categories,
                    row.image_url,
                    row.date_scraped
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!("Saved {} articles to database {}", records.len(), self.location);
        Ok(records.len())
    }

    /// Reads every stored article in insertion order
    pub fn load_articles(&self) -> StorageResult<Vec<ArticleRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, url, summary, categories, image_url, date_scraped
             FROM articles ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ArticleRow {
                    title: row.get(0)?,
                    url: row.get(1)?,
                    summary: row.get(2)?,
                    categories: row.get(3)?,
                    image_url: row.get(4)?,
                    date_scraped: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| {
                let url = row.url.clone();
                ArticleRecord::try_from(row)
                    .map_err(|e| StorageError::MalformedRecord(format!("{}: {}", url, e)))
            })
            .collect()
    }
}

impl RecordSink for SqliteStorage {
    fn name(&self) -> &str {
        "database"
    }

    fn flush(&mut self, records: &[ArticleRecord]) -> StorageResult<FlushReport> {
        let rows = self.insert_articles(records)?;
        Ok(FlushReport {
            rows,
            location: self.location.clone(),
        })
    }
}
