//! Permissive extraction from the curated main-page zones
//!
//! Zone items are not full article pages, so there is no title-element
//! precondition: the title and address come from whatever anchor the item
//! holds, and items without a usable anchor are skipped.

use crate::extract::SiteSelectors;
use crate::record::ArticleRecord;
use crate::session::{element_text, Document, NamedSelector};
use crate::Lookup;
use scraper::ElementRef;
use std::sync::Arc;

/// One of the curated zones on the main page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuratedZone {
    LeadFeature,
    News,
    Trivia,
    OnThisDay,
}

impl CuratedZone {
    /// The three list-shaped zones, in page order
    pub const DIGESTS: [CuratedZone; 3] = [Self::News, Self::Trivia, Self::OnThisDay];

    /// Label stored in place of categories
    pub fn label(&self) -> &'static str {
        match self {
            Self::LeadFeature => "Featured",
            Self::News => "In the news",
            Self::Trivia => "Did you know",
            Self::OnThisDay => "On this day",
        }
    }
}

/// Label for records taken from the featured archive listing
pub const ARCHIVE_LABEL: &str = "Featured archive";

/// Extracts labelled records from curated regions
#[derive(Debug, Clone)]
pub struct RegionExtractor {
    selectors: Arc<SiteSelectors>,
}

impl RegionExtractor {
    pub fn new(selectors: Arc<SiteSelectors>) -> Self {
        Self { selectors }
    }

    fn zone_selector(&self, zone: CuratedZone) -> &NamedSelector {
        match zone {
            CuratedZone::LeadFeature => &self.selectors.lead_feature,
            CuratedZone::News => &self.selectors.news,
            CuratedZone::Trivia => &self.selectors.trivia,
            CuratedZone::OnThisDay => &self.selectors.on_this_day,
        }
    }

    /// The lead feature record
    ///
    /// The title anchor is the bold link in the blurb, falling back to the
    /// first link in the zone. The summary is the zone's first paragraph.
    pub fn lead_feature(&self, document: &Document) -> Lookup<Option<ArticleRecord>> {
        let zone = document.first(self.zone_selector(CuratedZone::LeadFeature))?;

        let anchor = self
            .selectors
            .lead_feature_link
            .first_in(zone)
            .or_else(|_| self.selectors.anchor.first_in(zone));
        let summary = self
            .selectors
            .paragraph
            .first_in(zone)
            .map(element_text)
            .unwrap_or_else(|_| element_text(zone));

        Ok(anchor.ok().and_then(|anchor| {
            labelled_record(document, anchor, summary, CuratedZone::LeadFeature.label())
        }))
    }

    /// Up to `limit` records from one digest zone
    pub fn digest(
        &self,
        document: &Document,
        zone: CuratedZone,
        limit: usize,
    ) -> Lookup<Vec<ArticleRecord>> {
        let region = document.first(self.zone_selector(zone))?;

        Ok(self
            .selectors
            .digest_item
            .all_in(region)
            .take(limit)
            .filter_map(|item| {
                let anchor = self.selectors.anchor.first_in(item).ok()?;
                labelled_record(document, anchor, element_text(item), zone.label())
            })
            .collect())
    }

    /// Up to `limit` records from the featured archive listing
    pub fn archive_entries(&self, document: &Document, limit: usize) -> Vec<ArticleRecord> {
        document
            .all(&self.selectors.archive_links)
            .take(limit)
            .filter_map(|anchor| {
                let title = element_text(anchor);
                let summary = format!("Featured article archive: {}", title);
                labelled_record(document, anchor, summary, ARCHIVE_LABEL)
            })
            .collect()
    }
}

/// Builds a record from an anchor, or `None` if it has no text or target
fn labelled_record(
    document: &Document,
    anchor: ElementRef<'_>,
    summary: String,
    label: &str,
) -> Option<ArticleRecord> {
    let title = element_text(anchor);
    let url = anchor
        .value()
        .attr("href")
        .and_then(|href| document.resolve(href))?;

    if title.is_empty() {
        tracing::debug!("Skipping untitled {} item ({})", label, url);
        return None;
    }
    Some(ArticleRecord::labelled(title, url.to_string(), summary, label))
}
