//! Integrity checks for MSH documents
//!
//! Checks never fail. Every problem becomes a human-readable message in a
//! [`CheckResult`], so one malformed vertex never hides the rest.

mod document;
mod material;
mod segment;

pub use segment::validate_vertex;

/// Errors and warnings collected by an integrity check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl CheckResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record a warning
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Errors in the order they were found
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Warnings in the order they were found
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// True when no errors were recorded; warnings do not count
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when nothing at all was recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Concatenate `other` onto this result
    ///
    /// Associative and order-preserving: `a.merge(b).merge(c)` equals
    /// `a.merge(b.merge(c))`.
    pub fn merge(mut self, other: CheckResult) -> CheckResult {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }

    /// Merge a sequence of results in order
    pub fn merge_all(results: impl IntoIterator<Item = CheckResult>) -> CheckResult {
        results.into_iter().fold(CheckResult::new(), CheckResult::merge)
    }

    /// Prefix every message, e.g. with the path of the checked record
    pub fn with_prefix(self, prefix: &str) -> CheckResult {
        let prefixed = |messages: Vec<String>| {
            messages
                .into_iter()
                .map(|m| format!("{}: {}", prefix, m))
                .collect()
        };
        CheckResult {
            errors: prefixed(self.errors),
            warnings: prefixed(self.warnings),
        }
    }
}

/// Types that can report problems with their own data
pub trait CheckIntegrity {
    /// Run every check and collect the findings
    fn check_integrity(&self) -> CheckResult;
}
