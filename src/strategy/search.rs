//! Search-then-crawl

use crate::config::SiteConfig;
use crate::crawler::{CrawlController, CrawlState};
use crate::record::RecordStore;
use crate::session::{PageLoader, Pacer};
use crate::{HarvestError, Result};
use url::Url;

/// Submits a search query and crawls outward from wherever it lands
///
/// An exact title match lands on the article itself. Disambiguation pages
/// are crawled like any other article; a results listing lives outside the
/// article path and fails the crawl precondition.
#[derive(Debug, Clone)]
pub struct SearchCrawl {
    site: SiteConfig,
    controller: CrawlController,
    settle: Pacer,
}

impl SearchCrawl {
    pub fn new(site: SiteConfig, controller: CrawlController, settle: Pacer) -> Self {
        Self {
            site,
            controller,
            settle,
        }
    }

    /// Address of the search request for `term`
    pub fn search_url(&self, term: &str) -> Result<Url> {
        let mut url = self.site.url_for(&self.site.search_path)?;
        url.query_pairs_mut()
            .append_pair("search", term)
            .append_pair("title", "Special:Search")
            .append_pair("go", "Go");
        Ok(url)
    }

    pub async fn run<L>(
        &self,
        loader: &mut L,
        store: &mut RecordStore,
        term: &str,
    ) -> Result<CrawlState>
    where
        L: PageLoader + ?Sized,
    {
        let term = term.trim();
        if term.is_empty() {
            tracing::warn!("No search term provided");
            return Err(HarvestError::InvalidInput(
                "search term cannot be empty".to_string(),
            ));
        }

        let target = self.search_url(term)?;
        loader.load(target.as_str()).await?;
        self.settle.pause().await;
        tracing::info!("Searched for term: {}", term);

        self.controller.crawl(loader, store).await
    }
}
