//! Article records and the in-memory record store
//!
//! An [`ArticleRecord`] is created once at extraction time and never mutated.
//! Records accumulate in a [`RecordStore`] for the lifetime of a run and are
//! flushed to the storage sinks at the end.

mod store;

pub use store::RecordStore;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Summary value used when the introductory paragraph is missing
pub const SUMMARY_NOT_FOUND: &str = "Summary not found";

/// Delimiter used when categories are rendered as a single string
pub const CATEGORY_DELIMITER: char = '|';

/// Format of `date_scraped` in every sink
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One extracted article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Human-readable heading (never empty)
    pub title: String,

    /// Address of the source page (never empty)
    pub url: String,

    /// Introductory text, or [`SUMMARY_NOT_FOUND`]
    pub summary: String,

    /// Category names in page order, or a single curated-zone label
    pub categories: Vec<String>,

    /// Representative image, empty when none was located
    pub image_url: String,

    /// Extraction instant, second resolution
    pub date_scraped: NaiveDateTime,
}

impl ArticleRecord {
    /// Creates a record stamped with the current time
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        summary: impl Into<String>,
        categories: Vec<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            summary: summary.into(),
            categories,
            image_url: image_url.into(),
            date_scraped: scrape_timestamp(),
        }
    }

    /// Creates a record from a curated region, labelled instead of categorised
    pub fn labelled(
        title: impl Into<String>,
        url: impl Into<String>,
        summary: impl Into<String>,
        label: &str,
    ) -> Self {
        Self::new(title, url, summary, vec![label.to_string()], "")
    }

    /// Returns true if both key fields are present
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }

    /// Categories rendered as one pipe-joined string
    pub fn categories_joined(&self) -> String {
        join_categories(&self.categories)
    }
}

/// Joins categories with [`CATEGORY_DELIMITER`]
pub fn join_categories(categories: &[String]) -> String {
    categories.join(&CATEGORY_DELIMITER.to_string())
}

/// Splits a pipe-joined category string back into its parts
///
/// The empty string yields no categories rather than one empty category.
pub fn split_categories(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined
        .split(CATEGORY_DELIMITER)
        .map(|s| s.to_string())
        .collect()
}

/// Current local time truncated to whole seconds
pub fn scrape_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Flat row shape shared by the CSV and SQLite sinks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRow {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub categories: String,
    pub image_url: String,
    pub date_scraped: String,
}

impl From<&ArticleRecord> for ArticleRow {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            title: record.title.clone(),
            url: record.url.clone(),
            summary: record.summary.clone(),
            categories: record.categories_joined(),
            image_url: record.image_url.clone(),
            date_scraped: record.date_scraped.format(DATE_FORMAT).to_string(),
        }
    }
}

impl TryFrom<ArticleRow> for ArticleRecord {
    type Error = chrono::ParseError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let date_scraped = NaiveDateTime::parse_from_str(&row.date_scraped, DATE_FORMAT)?;
        Ok(Self {
            categories: split_categories(&row.categories),
            title: row.title,
            url: row.url,
            summary: row.summary,
            image_url: row.image_url,
            date_scraped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_timestamp_has_second_resolution() {
        assert_eq!(scrape_timestamp().nanosecond(), 0);
    }

    #[test]
    fn test_labelled_record() {
        let record = ArticleRecord::labelled(
            "Ada Lovelace",
            "https://en.wikipedia.org/wiki/Ada_Lovelace",
            "English mathematician",
            "Featured",
        );
        assert_eq!(record.categories_joined(), "Featured");
        assert_eq!(record.image_url, "");
        assert!(record.is_complete());
    }

    #[test]
    fn test_incomplete_record() {
        let record = ArticleRecord::new("  ", "https://x.org/wiki/A", "", vec![], "");
        assert!(!record.is_complete());

        let record = ArticleRecord::new("A", "", "", vec![], "");
        assert!(!record.is_complete());
    }

    #[test]
    fn test_split_categories() {
        assert_eq!(split_categories(""), Vec::<String>::new());
        assert_eq!(
            split_categories("Living people|1990 births"),
            vec!["Living people".to_string(), "1990 births".to_string()]
        );
    }

    #[test]
    fn test_row_conversion_preserves_fields() {
        let record = ArticleRecord::new(
            "Rust",
            "https://en.wikipedia.org/wiki/Rust",
            "Rust is an iron oxide.",
            vec!["Corrosion".to_string(), "Iron".to_string()],
            "https://upload.wikimedia.org/rust.jpg",
        );

        let row = ArticleRow::from(&record);
        assert_eq!(row.categories, "Corrosion|Iron");

        let back = ArticleRecord::try_from(row).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_row_with_bad_date_is_rejected() {
        let row = ArticleRow {
            title: "A".to_string(),
            url: "https://x.org/wiki/A".to_string(),
            summary: String::new(),
            categories: String::new(),
            image_url: String::new(),
            date_scraped: "yesterday".to_string(),
        };
        assert!(ArticleRecord::try_from(row).is_err());
    }
}
