//! Traversal state for one crawl invocation
//!
//! A [`CrawlState`] is created at the start of a crawl call and handed back to
//! the caller when the call returns. Nothing here outlives that call unless the
//! caller keeps it.

use std::collections::{HashMap, VecDeque};

/// A `(target, depth)` pair in the traversal frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlQueueEntry {
    pub target: String,
    pub depth: u32,
}

impl CrawlQueueEntry {
    pub fn new(target: impl Into<String>, depth: u32) -> Self {
        Self {
            target: target.into(),
            depth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Queued,
    Loaded,
}

/// Targets already enqueued or loaded during one crawl
///
/// The set only grows. A target moves from queued to loaded at most once.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    marks: HashMap<String, Mark>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `target` as enqueued, returning false if it was already known
    pub fn mark_queued(&mut self, target: &str) -> bool {
        if self.marks.contains_key(target) {
            return false;
        }
        self.marks.insert(target.to_string(), Mark::Queued);
        true
    }

    /// Records `target` as loaded, returning false if it was already loaded
    pub fn mark_loaded(&mut self, target: &str) -> bool {
        match self.marks.insert(target.to_string(), Mark::Loaded) {
            Some(Mark::Loaded) => false,
            _ => true,
        }
    }

    pub fn contains(&self, target: &str) -> bool {
        self.marks.contains_key(target)
    }

    /// Number of distinct targets seen
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

/// Everything a crawl call knows when it returns
#[derive(Debug, Clone, Default)]
pub struct CrawlState {
    /// Every target enqueued or loaded
    pub visited: VisitedSet,

    /// Entries discovered but never reached
    pub frontier: VecDeque<CrawlQueueEntry>,

    /// Pages loaded, in the order they were loaded
    pub visit_order: Vec<CrawlQueueEntry>,

    /// Records appended to the store
    pub records_extracted: usize,

    /// Frontier entries whose navigation failed
    pub load_failures: usize,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `target` to the frontier unless it was seen before
    pub fn enqueue(&mut self, target: &str, depth: u32) -> bool {
        if !self.visited.mark_queued(target) {
            return false;
        }
        self.frontier.push_back(CrawlQueueEntry::new(target, depth));
        true
    }

    /// Pops the oldest frontier entry
    pub fn next_entry(&mut self) -> Option<CrawlQueueEntry> {
        self.frontier.pop_front()
    }

    /// Records a successfully loaded page
    pub fn record_visit(&mut self, target: &str, depth: u32) {
        self.visit_order.push(CrawlQueueEntry::new(target, depth));
    }

    /// Pages loaded so far, which is what the article budget counts
    pub fn pages_loaded(&self) -> usize {
        self.visit_order.len()
    }

    /// Deepest level reached by any loaded page
    pub fn max_depth_reached(&self) -> u32 {
        self.visit_order.iter().map(|e| e.depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_queued_once() {
        let mut visited = VisitedSet::new();
        assert!(visited.mark_queued("a"));
        assert!(!visited.mark_queued("a"));
        assert_eq!(visited.len(), 1);
        assert!(visited.mark_loaded("a"));
    }

    #[test]
    fn test_mark_loaded_transitions_from_queued() {
        let mut visited = VisitedSet::new();
        visited.mark_queued("a");
        assert!(visited.mark_loaded("a"));
        assert!(!visited.mark_loaded("a"));
        assert!(!visited.mark_queued("a"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_enqueue_is_fifo_and_deduplicated() {
        let mut state = CrawlState::new();
        assert!(state.enqueue("a", 1));
        assert!(state.enqueue("b", 1));
        assert!(!state.enqueue("a", 2));

        assert_eq!(state.next_entry(), Some(CrawlQueueEntry::new("a", 1)));
        assert_eq!(state.next_entry(), Some(CrawlQueueEntry::new("b", 1)));
        assert_eq!(state.next_entry(), None);
    }

    #[test]
    fn test_visit_accounting() {
        let mut state = CrawlState::new();
        state.record_visit("seed", 0);
        state.record_visit("a", 1);
        state.record_visit("b", 2);

        assert_eq!(state.pages_loaded(), 3);
        assert_eq!(state.max_depth_reached(), 2);
    }
}
