//! Per-field article extraction
//!
//! Each field has one lookup returning [`Lookup`]. Only the title lookup is
//! load-bearing; every other miss is replaced by the field's declared default:
//!
//! | Field | Lookup | Default |
//! |-------|--------|---------|
//! | title | first heading text | none, extraction fails |
//! | url | resolved page address | always available |
//! | summary | first non-empty intro paragraph | `"Summary not found"` |
//! | categories | category-link texts, in order | empty |
//! | image_url | first infobox/thumbnail image | empty |

use crate::extract::SiteSelectors;
use crate::record::{ArticleRecord, RecordStore, SUMMARY_NOT_FOUND};
use crate::session::{element_text, Document};
use crate::{HarvestError, Lookup, Result};
use std::sync::Arc;

/// Extracts one [`ArticleRecord`] from a loaded article page
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    selectors: Arc<SiteSelectors>,
}

impl FieldExtractor {
    pub fn new(selectors: Arc<SiteSelectors>) -> Self {
        Self { selectors }
    }

    /// Extracts a record, failing only when the title is missing
    pub fn extract(&self, document: &Document) -> Result<ArticleRecord> {
        let url = document.url().to_string();
        let title = self
            .title(document)
            .map_err(|_| HarvestError::TitleNotFound { url: url.clone() })?;

        let summary = with_default(self.summary(document), "summary", || {
            SUMMARY_NOT_FOUND.to_string()
        });
        let categories = with_default(self.categories(document), "categories", Vec::new);
        let image_url = with_default(self.image_url(document), "image_url", String::new);

        Ok(ArticleRecord::new(title, url, summary, categories, image_url))
    }

    /// Extracts a record and appends it to `store`
    ///
    /// A missing title is logged and yields `None` instead of an error.
    pub fn extract_into(
        &self,
        document: &Document,
        store: &mut RecordStore,
    ) -> Option<ArticleRecord> {
        match self.extract(document) {
            Ok(record) => {
                tracing::info!("Extracted data from article: {}", record.title);
                store.push(record.clone()).then_some(record)
            }
            Err(e) => {
                tracing::error!("Error extracting article data: {}", e);
                None
            }
        }
    }

    fn title(&self, document: &Document) -> Lookup<String> {
        let heading = document.first(&self.selectors.title)?;
        let text = element_text(heading);
        if text.is_empty() {
            return Err(self.selectors.title.miss());
        }
        Ok(text)
    }

    fn summary(&self, document: &Document) -> Lookup<String> {
        document
            .all(&self.selectors.summary)
            .map(element_text)
            .find(|text| !text.is_empty())
            .ok_or_else(|| self.selectors.summary.miss())
    }

    fn categories(&self, document: &Document) -> Lookup<Vec<String>> {
        let categories: Vec<String> = document
            .all(&self.selectors.categories)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect();

        if categories.is_empty() {
            return Err(self.selectors.categories.miss());
        }
        Ok(categories)
    }

    fn image_url(&self, document: &Document) -> Lookup<String> {
        let image = document.first(&self.selectors.image)?;
        image
            .value()
            .attr("src")
            .and_then(|src| document.resolve(src))
            .map(|url| url.to_string())
            .ok_or_else(|| self.selectors.image.miss())
    }
}

/// Combines a field lookup with its declared default
fn with_default<T>(lookup: Lookup<T>, field: &str, default: impl FnOnce() -> T) -> T {
    lookup.unwrap_or_else(|miss| {
        tracing::debug!("Using default for {} ({})", field, miss);
        default()
    })
}
