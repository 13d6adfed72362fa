// src/filter/pattern.rs

use std::cell::OnceCell;

use regex::Regex;

use crate::errors::{Result, StalecheckError};

/// A single regular expression over a repository-relative file path.
///
/// The expression is compiled on first use and the compiled form is cached
/// on the pattern. Catalog loading forces compilation via [`compile`], so a
/// malformed expression fails at load time and match calls on a loaded
/// catalog never observe a compile error.
///
/// The compile cache is a plain `OnceCell`; the decision loop is strictly
/// single-threaded, so no synchronisation is needed.
///
/// [`compile`]: PathPattern::compile
#[derive(Debug, Clone)]
pub struct PathPattern {
    expression: String,
    compiled: OnceCell<Regex>,
}

impl PathPattern {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            compiled: OnceCell::new(),
        }
    }

    /// The raw expression this pattern was built from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Compile the expression if it has not been compiled yet and return the
    /// compiled regex.
    pub fn compile(&self) -> Result<&Regex> {
        if let Some(re) = self.compiled.get() {
            return Ok(re);
        }
        let re = Regex::new(&self.expression).map_err(|source| {
            StalecheckError::PatternError {
                expression: self.expression.clone(),
                source,
            }
        })?;
        Ok(self.compiled.get_or_init(|| re))
    }

    /// Search-semantics match of the expression against `path`.
    ///
    /// The expression is not anchored unless it anchors itself. A pattern
    /// that fails to compile matches nothing; loaded catalogs have already
    /// compiled every pattern, so that branch is unreachable after load.
    pub fn matches(&self, path: &str) -> bool {
        self.compile().map(|re| re.is_match(path)).unwrap_or(false)
    }
}
