//! Output module for end-of-run reporting
//!
//! This module handles printing the statistics of a finished run: records per
//! strategy, field coverage and the sinks that were written.

pub mod stats;

pub use stats::{print_statistics, RunStatistics};
