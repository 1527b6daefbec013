//! Page-to-record extraction
//!
//! This module turns a loaded [`Document`](crate::session::Document) into data:
//! - `FieldExtractor`: one `ArticleRecord` per article page, with a fallback for each field
//! - `LinkHarvester`: the ordered, capped list of next-hop article links
//! - `RegionExtractor`: permissive extraction from the curated main-page zones
//! - `SiteSelectors`: the compiled structural selectors shared by all three

mod fields;
mod links;
mod regions;
mod selectors;

pub use fields::FieldExtractor;
pub use links::{LinkCandidate, LinkHarvester};
pub use regions::{CuratedZone, RegionExtractor};
pub use selectors::SiteSelectors;
