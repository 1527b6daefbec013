//! Acquisition strategies layered on the crawl and extraction engine
//!
//! - `FeaturedHarvest`: curated main-page zones plus an archive top-up
//! - `RandomSampler`: repeated loads of the random-article endpoint
//! - `SearchCrawl`: a search query followed by a crawl from the landing page
//!
//! All three append to the same [`RecordStore`](crate::record::RecordStore).

mod featured;
mod random;
mod search;

pub use featured::{FeaturedHarvest, FeaturedOutcome, ARCHIVE_LIMIT, ITEMS_PER_ZONE};
pub use random::{RandomSampler, SampleOutcome, SampleStop};
pub use search::SearchCrawl;

use crate::config::Config;
use crate::crawler::CrawlController;
use crate::extract::{FieldExtractor, RegionExtractor, SiteSelectors};
use crate::session::Pacer;
use crate::ConfigError;
use std::sync::Arc;

/// Every strategy, wired from one configuration
#[derive(Debug, Clone)]
pub struct Strategies {
    pub featured: FeaturedHarvest,
    pub random: RandomSampler,
    pub search: SearchCrawl,
    pub crawl: CrawlController,
}

impl Strategies {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let selectors = Arc::new(SiteSelectors::new(&config.selectors)?);
        let crawl = CrawlController::new(&config.crawler, &config.site, selectors.clone())?;

        Ok(Self {
            featured: FeaturedHarvest::new(
                config.site.clone(),
                RegionExtractor::new(selectors.clone()),
            ),
            random: RandomSampler::new(
                config.site.clone(),
                config.sampling.clone(),
                FieldExtractor::new(selectors),
                Pacer::from_millis(config.pacing.sample_delay_ms),
            ),
            search: SearchCrawl::new(
                config.site.clone(),
                crawl.clone(),
                Pacer::from_millis(config.pacing.search_settle_ms),
            ),
            crawl,
        })
    }
}
