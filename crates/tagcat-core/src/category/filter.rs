//! Filter Categorizer
//!
//! 正規表現フィルタに一致する項目を1つのカテゴリにまとめる。

use regex::Regex;

use super::types::{Category, CategoryMetadata, RawCategory};

/// Filter text flagged as the universal query
pub const UNIVERSAL_FILTER: &str = ".*";

/// Outcome of compiling user-entered filter text
#[derive(Debug, Clone)]
pub enum FilterPattern {
    Valid(Regex),
    /// The text did not compile; the reason is kept for diagnostics
    Invalid(String),
}

impl FilterPattern {
    /// Compile `filter`. Malformed text is an expected outcome, not an error.
    pub fn compile(filter: &str) -> Self {
        match Regex::new(filter) {
            Ok(re) => Self::Valid(re),
            Err(e) => Self::Invalid(e.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Unanchored match; an invalid pattern matches nothing
    pub fn matches(&self, item: &str) -> bool {
        match self {
            Self::Valid(re) => re.is_match(item),
            Self::Invalid(_) => false,
        }
    }
}

/// Collect the items matching `filter` into a single search-results category
/// named after the filter text.
///
/// Always returns exactly one category. If `filter` does not compile, the
/// category is empty and flagged `valid_regex: false`. `universal_regex` is a
/// literal comparison against `.*`, so `""` is not flagged even though it
/// matches everything.
pub fn categorize_by_filter<S: AsRef<str>>(items: &[S], filter: &str) -> Vec<RawCategory> {
    let pattern = FilterPattern::compile(filter);
    if let FilterPattern::Invalid(reason) = &pattern {
        tracing::debug!(filter, %reason, "filter is not a valid regex");
    }

    let mut category = Category::new(
        filter,
        CategoryMetadata::SearchResults {
            valid_regex: pattern.is_valid(),
            universal_regex: filter == UNIVERSAL_FILTER,
        },
    );
    category.items = items
        .iter()
        .filter(|item| pattern.matches(item.as_ref()))
        .map(|item| item.as_ref().to_string())
        .collect();

    vec![category]
}
