//! Running header/footer removal.
//!
//! Counts the normalized keys of the first few segments of every page. A key
//! seen at least `threshold * page_count` times is treated as boilerplate and
//! every segment carrying it is removed, anywhere on any page.
//!
//! The heuristic is purely textual: a legitimately repeated line near the top
//! of most pages (an epigraph, say) is removed too.

use std::collections::{HashMap, HashSet};

use crate::model::Segment;

use super::options::{ReflowOptions, DEFAULT_BOILERPLATE_THRESHOLD, DEFAULT_HEADER_WINDOW};

/// Outcome of a boilerplate pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoilerplateReport {
    /// Keys classified as boilerplate, sorted
    pub keys: Vec<String>,
    /// Number of segments removed across all pages
    pub removed: usize,
}

/// Detects and strips segments repeating across most pages.
#[derive(Debug, Clone, Copy)]
pub struct BoilerplateFilter {
    header_window: usize,
    threshold: f64,
}

impl BoilerplateFilter {
    /// Create a filter with the given window and frequency threshold.
    pub fn new(header_window: usize, threshold: f64) -> Self {
        Self {
            header_window,
            threshold,
        }
    }

    /// Create a filter from reflow options.
    pub fn from_options(options: &ReflowOptions) -> Self {
        Self::new(options.header_window, options.boilerplate_threshold)
    }

    /// Keys whose header-window frequency reaches the threshold.
    pub fn detect<P: AsRef<[Segment]>>(&self, pages: &[P]) -> HashSet<String> {
        if pages.is_empty() {
            return HashSet::new();
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        for page in pages {
            for segment in page.as_ref().iter().take(self.header_window) {
                *counts.entry(segment.normalized_key()).or_insert(0) += 1;
            }
        }

        let page_count = pages.len() as f64;
        counts
            .into_iter()
            .filter(|(_, count)| *count as f64 / page_count >= self.threshold)
            .map(|(key, _)| key)
            .collect()
    }

    /// Remove boilerplate segments from every page in place.
    ///
    /// Survivors keep their relative order.
    pub fn filter(&self, pages: &mut [Vec<Segment>]) -> BoilerplateReport {
        let keys = self.detect(&*pages);
        if keys.is_empty() {
            return BoilerplateReport::default();
        }

        let mut removed = 0;
        for page in pages.iter_mut() {
            let before = page.len();
            page.retain(|segment| !keys.contains(&segment.normalized_key()));
            removed += before - page.len();
        }

        let mut keys: Vec<String> = keys.into_iter().collect();
        keys.sort();
        log::info!(
            "Removed {} boilerplate segments ({} distinct keys)",
            removed,
            keys.len()
        );
        BoilerplateReport { keys, removed }
    }
}

impl Default for BoilerplateFilter {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_WINDOW, DEFAULT_BOILERPLATE_THRESHOLD)
    }
}
