//! End-of-run statistics
//!
//! This module summarises what a run collected and where it was written.

use crate::record::{RecordStore, SUMMARY_NOT_FOUND};
use crate::storage::FlushReport;
use std::time::Duration;

/// Run statistics summary
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    /// Records added by each strategy, in the order the strategies ran
    pub records_by_strategy: Vec<(String, usize)>,

    /// Total records held at the end of the run
    pub total_records: usize,

    /// Records whose summary was found
    pub with_summary: usize,

    /// Records with a representative image
    pub with_image: usize,

    /// Records with at least one category or label
    pub with_categories: usize,

    /// Successful sink flushes
    pub sinks: Vec<FlushReport>,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunStatistics {
    /// Computes field coverage over every record in the store
    pub fn from_store(store: &RecordStore) -> Self {
        let mut stats = Self {
            total_records: store.len(),
            ..Default::default()
        };

        for record in store {
            if record.summary != SUMMARY_NOT_FOUND && !record.summary.is_empty() {
                stats.with_summary += 1;
            }
            if !record.image_url.is_empty() {
                stats.with_image += 1;
            }
            if !record.categories.is_empty() {
                stats.with_categories += 1;
            }
        }
        stats
    }

    /// Records how many records a strategy contributed
    pub fn record_strategy(&mut self, name: impl Into<String>, added: usize) {
        self.records_by_strategy.push((name.into(), added));
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Total articles collected: {}", stats.total_records);
    println!("  Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
    println!();

    if !stats.records_by_strategy.is_empty() {
        println!("Articles by Strategy:");
        for (name, count) in &stats.records_by_strategy {
            println!("  {}: {}", name, count);
        }
        println!();
    }

    println!("Field Coverage:");
    for (label, count) in [
        ("Summary", stats.with_summary),
        ("Image", stats.with_image),
        ("Categories", stats.with_categories),
    ] {
        println!(
            "  {}: {} ({:.1}%)",
            label,
            count,
            percentage(count, stats.total_records)
        );
    }
    println!();

    if stats.sinks.is_empty() {
        println!("No output was written.");
    } else {
        println!("Output:");
        for report in &stats.sinks {
            println!("  {} rows -> {}", report.rows, report.location);
        }
    }
}
