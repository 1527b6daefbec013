//! Featured-content harvest from the main page's curated zones

use crate::config::SiteConfig;
use crate::extract::{CuratedZone, RegionExtractor};
use crate::record::RecordStore;
use crate::session::PageLoader;
use crate::Result;

/// Items taken from each digest zone
pub const ITEMS_PER_ZONE: usize = 5;

/// Anchors taken from the featured archive listing
pub const ARCHIVE_LIMIT: usize = 10;

/// Records gathered by one featured harvest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeaturedOutcome {
    /// Records taken from the main-page zones
    pub zone_records: usize,

    /// Records taken from the archive top-up
    pub archive_records: usize,
}

impl FeaturedOutcome {
    pub fn total(&self) -> usize {
        self.zone_records + self.archive_records
    }
}

/// Harvests the curated main-page zones, topping up from the archive
#[derive(Debug, Clone)]
pub struct FeaturedHarvest {
    site: SiteConfig,
    regions: RegionExtractor,
}

impl FeaturedHarvest {
    pub fn new(site: SiteConfig, regions: RegionExtractor) -> Self {
        Self { site, regions }
    }

    /// Runs the harvest, aiming for `target` records
    ///
    /// Failing to load the main page fails the strategy. A missing zone or an
    /// unreachable archive only reduces the number of records collected.
    pub async fn run<L>(
        &self,
        loader: &mut L,
        store: &mut RecordStore,
        target: usize,
    ) -> Result<FeaturedOutcome>
    where
        L: PageLoader + ?Sized,
    {
        let main_page = self.site.url_for(&self.site.main_page)?;
        loader.load(main_page.as_str()).await?;

        let mut outcome = FeaturedOutcome::default();
        {
            let document = loader.document()?;

            match self.regions.lead_feature(&document) {
                Ok(Some(record)) => outcome.zone_records += usize::from(store.push(record)),
                Ok(None) => tracing::warn!("Lead feature has no usable link"),
                Err(e) => tracing::warn!("Lead feature not found: {}", e),
            }

            for zone in CuratedZone::DIGESTS {
                match self.regions.digest(&document, zone, ITEMS_PER_ZONE) {
                    Ok(records) => outcome.zone_records += store.extend(records),
                    Err(e) => tracing::warn!("{} zone not found: {}", zone.label(), e),
                }
            }
        }

        if outcome.total() < target {
            outcome.archive_records = self.top_up(loader, store, target - outcome.total()).await;
        }

        tracing::info!(
            "Extracted {} featured and main page articles ({} from archive)",
            outcome.total(),
            outcome.archive_records
        );
        Ok(outcome)
    }

    async fn top_up<L>(&self, loader: &mut L, store: &mut RecordStore, needed: usize) -> usize
    where
        L: PageLoader + ?Sized,
    {
        let archive = match self.site.url_for(&self.site.featured_archive) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Invalid featured archive path: {}", e);
                return 0;
            }
        };

        if let Err(e) = loader.load(archive.as_str()).await {
            tracing::warn!("Featured archive unavailable: {}", e);
            return 0;
        }

        let records = match loader.document() {
            Ok(document) => self.regions.archive_entries(&document, ARCHIVE_LIMIT),
            Err(e) => {
                tracing::warn!("Featured archive unreadable: {}", e);
                return 0;
            }
        };

        store.extend(records.into_iter().take(needed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;
    use crate::extract::SiteSelectors;
    use crate::session::StaticSite;
    use crate::HarvestError;
    use std::sync::Arc;

    const MAIN: &str = "https://en.wikipedia.org/wiki/Main_Page";
    const ARCHIVE: &str =
        "https://en.wikipedia.org/wiki/Wikipedia:Today%27s_featured_article/Archives";

    fn harvest() -> FeaturedHarvest {
        let selectors = Arc::new(SiteSelectors::new(&SelectorConfig::default()).unwrap());
        FeaturedHarvest::new(SiteConfig::default(), RegionExtractor::new(selectors))
    }

    fn digest(id: &str, prefix: &str, count: usize) -> String {
        let items: String = (0..count)
            .map(|i| format!(r#"<li><a href="/wiki/{prefix}_{i}">{prefix} {i}</a> item.</li>"#))
            .collect();
        format!(r#"<div id="{id}"><ul>{items}</ul></div>"#)
    }

    fn main_page(news: usize, trivia: usize, otd: usize) -> String {
        format!(
            r#"<html><body>
               <div id="mp-tfa"><p>The <b><a href="/wiki/Ferris">Ferris</a></b> crab.</p></div>
               {}{}{}
               </body></html>"#,
            digest("mp-itn", "News", news),
            digest("mp-dyk", "Fact", trivia),
            digest("mp-otd", "Day", otd)
        )
    }

    fn archive_page(count: usize) -> String {
        let items: String = (0..count)
            .map(|i| format!(r#"<li><a href="/wiki/Archive_{i}">Archive {i}</a></li>"#))
            .collect();
        format!(r#"<div id="mw-content-text"><ul>{items}</ul></div>"#)
    }

    #[tokio::test]
    async fn test_zones_capped_at_five_items() {
        let mut site = StaticSite::new();
        site.add_page(MAIN, main_page(8, 8, 8));

        let mut store = RecordStore::new();
        let outcome = harvest().run(&mut site, &mut store, 10).await.unwrap();

        assert_eq!(outcome.zone_records, 16);
        assert_eq!(outcome.archive_records, 0);
        assert_eq!(store.records()[0].categories, vec!["Featured"]);
        let labels: Vec<_> = store.iter().map(|r| r.categories[0].as_str()).collect();
        assert_eq!(labels.iter().filter(|l| **l == "In the news").count(), 5);
        assert_eq!(labels.iter().filter(|l| **l == "Did you know").count(), 5);
        assert_eq!(labels.iter().filter(|l| **l == "On this day").count(), 5);
        assert_eq!(site.history(), [MAIN.to_string()]);
    }

    #[tokio::test]
    async fn test_archive_tops_up_to_target() {
        let mut site = StaticSite::new();
        site.add_page(MAIN, main_page(1, 1, 0))
            .add_page(ARCHIVE, archive_page(12));

        let mut store = RecordStore::new();
        let outcome = harvest().run(&mut site, &mut store, 10).await.unwrap();

        assert_eq!(outcome.zone_records, 3);
        assert_eq!(outcome.archive_records, 7);
        assert_eq!(store.len(), 10);
        let last = store.last().unwrap();
        assert_eq!(last.summary, "Featured article archive: Archive 6");
        assert_eq!(last.categories, vec!["Featured archive"]);
    }

    #[tokio::test]
    async fn test_archive_limited_to_ten_entries() {
        let mut site = StaticSite::new();
        site.add_page(MAIN, "<html><body></body></html>")
            .add_page(ARCHIVE, archive_page(30));

        let mut store = RecordStore::new();
        let outcome = harvest().run(&mut site, &mut store, 25).await.unwrap();

        assert_eq!(outcome.zone_records, 0);
        assert_eq!(outcome.archive_records, 10);
    }

    #[tokio::test]
    async fn test_missing_archive_keeps_zone_records() {
        let mut site = StaticSite::new();
        site.add_page(MAIN, main_page(2, 0, 0));

        let mut store = RecordStore::new();
        let outcome = harvest().run(&mut site, &mut store, 10).await.unwrap();

        assert_eq!(outcome.total(), 3);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_unreachable_main_page_fails() {
        let mut site = StaticSite::new();
        let mut store = RecordStore::new();
        let result = harvest().run(&mut site, &mut store, 10).await;

        assert!(matches!(result, Err(HarvestError::Navigation { .. })));
        assert!(store.is_empty());
    }
}
