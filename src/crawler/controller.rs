//! Breadth-first crawl controller
//!
//! The crawl starts from the page the loader currently holds and walks the
//! article-link graph level by level:
//! - The start page is extracted first and always counts against the budget
//! - Its links are enqueued at depth 1, then the frontier is consumed FIFO
//! - Pages at `depth < max_depth` contribute up to `link_fanout` links each
//! - The walk stops when the frontier empties or the budget is spent
//!
//! Navigation failures skip the entry. Extraction failures yield no record
//! but the page still counts as loaded and its links are still harvested.

use crate::config::{CrawlerConfig, SiteConfig};
use crate::crawler::CrawlState;
use crate::extract::{FieldExtractor, LinkHarvester, SiteSelectors};
use crate::record::RecordStore;
use crate::session::PageLoader;
use crate::{ConfigError, HarvestError, Result};
use std::sync::Arc;
use url::Url;

/// Drives one bounded breadth-first crawl at a time
#[derive(Debug, Clone)]
pub struct CrawlController {
    site: SiteConfig,
    max_depth: u32,
    max_articles: usize,
    link_fanout: usize,
    extractor: FieldExtractor,
    harvester: LinkHarvester,
}

impl CrawlController {
    pub fn new(
        crawler: &CrawlerConfig,
        site: &SiteConfig,
        selectors: Arc<SiteSelectors>,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            site: site.clone(),
            max_depth: crawler.max_depth,
            max_articles: crawler.max_articles,
            link_fanout: crawler.link_fanout,
            extractor: FieldExtractor::new(selectors.clone()),
            harvester: LinkHarvester::new(selectors, site)?,
        })
    }

    /// Overrides the depth and article limits for subsequent crawls
    pub fn with_limits(mut self, max_depth: u32, max_articles: usize) -> Self {
        self.max_depth = max_depth;
        self.max_articles = max_articles;
        self
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn max_articles(&self) -> usize {
        self.max_articles
    }

    /// Crawls outward from the loader's current page
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlState)` - The traversal state at the end of the walk
    /// * `Err(HarvestError::NotAnArticlePage)` - The current page is not an article; nothing was loaded
    /// * `Err(HarvestError::NoPageLoaded)` - The loader holds no page
    pub async fn crawl<L>(&self, loader: &mut L, store: &mut RecordStore) -> Result<CrawlState>
    where
        L: PageLoader + ?Sized,
    {
        if self.max_articles == 0 {
            return Err(HarvestError::InvalidInput(
                "max_articles must be at least 1".to_string(),
            ));
        }

        let start = loader
            .current()
            .map(|page| page.url.clone())
            .ok_or(HarvestError::NoPageLoaded)?;

        if !self.site.is_article_url(&start) {
            tracing::warn!(
                "Not on an article page ({}), can't crawl related articles",
                start
            );
            return Err(HarvestError::NotAnArticlePage {
                url: start.to_string(),
            });
        }

        let mut state = CrawlState::new();
        state.visited.mark_loaded(start.as_str());
        state.record_visit(start.as_str(), 0);
        self.process_current(loader, store, &mut state, 0)?;

        while state.pages_loaded() < self.max_articles {
            let Some(entry) = state.next_entry() else {
                break;
            };

            if !state.visited.mark_loaded(&entry.target) {
                tracing::trace!("Skipping already loaded {}", entry.target);
                continue;
            }

            if let Err(e) = loader.load(&entry.target).await {
                tracing::warn!("Skipping {}: {}", entry.target, e);
                state.load_failures += 1;
                continue;
            }

            if let Some(resolved) = loader.current_target().map(str::to_string) {
                if resolved != entry.target && !state.visited.mark_loaded(&resolved) {
                    tracing::debug!(
                        "{} resolved to already loaded {}, skipping",
                        entry.target,
                        resolved
                    );
                    continue;
                }
            }

            state.record_visit(&entry.target, entry.depth);
            self.process_current(loader, store, &mut state, entry.depth)?;
        }

        tracing::info!(
            "Crawled {} articles to depth {} of {} ({} records, {} left in frontier)",
            state.pages_loaded(),
            state.max_depth_reached(),
            self.max_depth,
            state.records_extracted,
            state.frontier.len()
        );

        Ok(state)
    }

    /// Extracts the loader's current page and enqueues its links
    fn process_current<L>(
        &self,
        loader: &L,
        store: &mut RecordStore,
        state: &mut CrawlState,
        depth: u32,
    ) -> Result<()>
    where
        L: PageLoader + ?Sized,
    {
        let document = loader.document()?;

        if self.extractor.extract_into(&document, store).is_some() {
            state.records_extracted += 1;
        }

        if state.pages_loaded() >= self.max_articles || depth >= self.max_depth {
            return Ok(());
        }

        for link in self.harvester.harvest(&document, self.link_fanout) {
            if state.enqueue(&link.href, depth + 1) {
                tracing::trace!("Queued {} at depth {}", link.href, depth + 1);
            }
        }
        Ok(())
    }

    /// Returns true if `target` would pass the crawl precondition
    pub fn accepts_start(&self, target: &str) -> bool {
        Url::parse(target)
            .map(|url| self.site.is_article_url(&url))
            .unwrap_or(false)
    }
}
