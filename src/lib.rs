//! Wiki-Harvest: an article harvester for encyclopedia-style sites
//!
//! This crate collects structured article records from a hyperlinked corpus by
//! combining direct-page extraction, keyword search, breadth-first link crawling
//! and random sampling into a bounded, deduplicated result set, and then
//! persists that set to a CSV export and an optional SQLite store.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;
pub mod session;
pub mod storage;
pub mod strategy;

use thiserror::Error;

/// Main error type for Wiki-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to navigate to {target}: {reason}")]
    Navigation { target: String, reason: String },

    #[error("No title element found on {url}")]
    TitleNotFound { url: String },

    #[error("Not an article page: {url}")]
    NotAnArticlePage { url: String },

    #[error("No page has been loaded yet")]
    NoPageLoaded,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    #[error("Storage error: {0}")]
    Storage(storage::StorageError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl HarvestError {
    /// Creates a navigation failure for the given target
    pub fn navigation(target: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Navigation {
            target: target.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<storage::StorageError> for HarvestError {
    fn from(error: storage::StorageError) -> Self {
        match error {
            storage::StorageError::Sqlite(e) => Self::Database(e),
            storage::StorageError::Csv(e) => Self::Export(e),
            storage::StorageError::Io(e) => Self::Io(e),
            other => Self::Storage(other),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// An expected structural region was absent from a loaded document
///
/// Every lookup that can produce this has a declared fallback at its call
/// site. A missing title surfaces as [`HarvestError::TitleNotFound`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Element not found: {selector}")]
pub struct ElementNotFound {
    pub selector: String,
}

impl ElementNotFound {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

/// Result type alias for Wiki-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for a single structural lookup
pub type Lookup<T> = std::result::Result<T, ElementNotFound>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlController, CrawlState};
pub use record::{ArticleRecord, RecordStore};
pub use session::{HttpSession, PageLoader};
