// src/filter/skip.rs

use crate::filter::pattern::PathPattern;

/// Negative override for a filter.
///
/// Suppresses an otherwise-positive relevance match when every changed file
/// is matched by at least one of these patterns ("only documentation
/// changed" style rules).
#[derive(Debug, Clone, Default)]
pub struct SkipCondition {
    patterns: Vec<PathPattern>,
}

impl SkipCondition {
    pub fn new(patterns: Vec<PathPattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[PathPattern] {
        &self.patterns
    }

    /// An empty condition behaves as if absent.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True iff the condition is non-empty and every path matches at least
    /// one pattern.
    ///
    /// An empty `paths` sequence is vacuously all-matching. That cannot make
    /// a filter relevant on its own (relevance also requires a positive file
    /// match), but callers using this method directly should be aware of it.
    pub fn all_match(&self, paths: &[String]) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        paths
            .iter()
            .all(|path| self.patterns.iter().any(|pat| pat.matches(path)))
    }
}
