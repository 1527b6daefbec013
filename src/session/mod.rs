//! Page loading sessions
//!
//! This module contains the page-loading collaborator used by every
//! acquisition strategy:
//! - `PageLoader`: navigate to a target and expose the loaded page
//! - `Document`: a parsed, queryable view of a loaded page
//! - `HttpSession`: the reqwest-backed loader used by the binary
//! - `Pacer`: the fixed pause inserted after navigation

mod document;
mod http;
#[cfg(test)]
mod memory;
mod pacing;

pub use document::{element_text, Document, NamedSelector};
pub use http::{build_http_client, HttpSession};
#[cfg(test)]
pub use memory::StaticSite;
pub use pacing::Pacer;

use crate::{HarvestError, Result};
use async_trait::async_trait;
use url::Url;

/// A page held by a session after a successful navigation
#[derive(Debug, Clone)]
pub struct LoadedPage {
    /// Resolved address after redirects
    pub url: Url,

    /// Raw HTML body
    pub body: String,
}

impl LoadedPage {
    pub fn new(url: Url, body: impl Into<String>) -> Self {
        Self {
            url,
            body: body.into(),
        }
    }

    /// Parses the body into a queryable document
    pub fn document(&self) -> Document {
        Document::parse(&self.url, &self.body)
    }
}

/// A browsing session able to navigate and expose the current page
///
/// Implementations keep the previously loaded page when a navigation fails.
#[async_trait]
pub trait PageLoader: Send {
    /// Navigates to `target`, blocking until the page is loaded or fails
    async fn load(&mut self, target: &str) -> Result<()>;

    /// The page loaded by the last successful navigation
    fn current(&self) -> Option<&LoadedPage>;

    /// Resolved address of the current page
    fn current_target(&self) -> Option<&str> {
        self.current().map(|page| page.url.as_str())
    }

    /// Parses the current page into a document
    fn document(&self) -> Result<Document> {
        self.current()
            .map(LoadedPage::document)
            .ok_or(HarvestError::NoPageLoaded)
    }
}
