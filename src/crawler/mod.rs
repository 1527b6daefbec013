//! Crawler module for bounded breadth-first link traversal
//!
//! This module contains the core crawling logic, including:
//! - The visited set and FIFO frontier for one crawl call
//! - Depth and article-budget accounting
//! - Coordination of page loading, field extraction and link harvesting

mod controller;
mod state;

pub use controller::CrawlController;
pub use state::{CrawlQueueEntry, CrawlState, VisitedSet};
