//! Outbound article-link harvesting
//!
//! # Filter Rules
//!
//! **Include:**
//! - `<a href>` anchors inside the main content region
//! - Targets on the site's own origin under the article path
//!
//! **Exclude:**
//! - Namespace pages (a `:` or a further `/` after the article path)
//! - Any target containing a denylisted namespace marker
//! - Repeats of a target already harvested from the same page
//! - Links back to the page itself, including bare `#fragment` anchors
//!
//! Fragments are dropped, so `/wiki/Rust#History` harvests as `/wiki/Rust`.

use crate::config::SiteConfig;
use crate::extract::SiteSelectors;
use crate::session::{element_text, Document};
use crate::ConfigError;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// A plausible next-hop article target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    /// Anchor text as displayed
    pub text: String,

    /// Absolute target address
    pub href: String,
}

/// Harvests article links from a loaded page
#[derive(Debug, Clone)]
pub struct LinkHarvester {
    selectors: Arc<SiteSelectors>,
    base: Url,
    site: SiteConfig,
}

impl LinkHarvester {
    pub fn new(selectors: Arc<SiteSelectors>, site: &SiteConfig) -> Result<Self, ConfigError> {
        let base = Url::parse(&site.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", site.base_url, e)))?;

        Ok(Self {
            selectors,
            base,
            site: site.clone(),
        })
    }

    /// Returns up to `cap` candidates in document order
    ///
    /// Scanning stops as soon as `cap` candidates are collected, so the cap
    /// selects the first qualifying anchors rather than the best ones. A page
    /// without a content region yields an empty list.
    pub fn harvest(&self, document: &Document, cap: usize) -> Vec<LinkCandidate> {
        let content = match document.first(&self.selectors.content) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("No links harvested from {}: {}", document.url(), e);
                return Vec::new();
            }
        };

        let mut page = document.url().clone();
        page.set_fragment(None);

        let mut candidates = Vec::new();
        let mut seen = HashSet::new();

        for anchor in self.selectors.anchor.all_in(content) {
            if candidates.len() >= cap {
                break;
            }

            let Some(target) = anchor
                .value()
                .attr("href")
                .filter(|href| !href.trim_start().starts_with('#'))
                .and_then(|href| document.resolve(href))
                .and_then(|url| self.accept(url, &page))
            else {
                continue;
            };

            if seen.insert(target.clone()) {
                candidates.push(LinkCandidate {
                    text: element_text(anchor),
                    href: target,
                });
            }
        }

        tracing::debug!(
            "Harvested {} links from {}",
            candidates.len(),
            document.url()
        );
        candidates
    }

    /// Normalizes `url` and returns it if it is an article target other than `page`
    fn accept(&self, mut url: Url, page: &Url) -> Option<String> {
        if url.origin() != self.base.origin() {
            return None;
        }

        let name = url.path().strip_prefix(self.site.article_path.as_str())?;
        if name.is_empty() || name.contains('/') || name.contains(':') {
            return None;
        }

        url.set_fragment(None);
        if url == *page {
            return None;
        }

        let target = url.to_string();
        if self.site.is_denylisted(&target) {
            return None;
        }

        Some(target)
    }
}
