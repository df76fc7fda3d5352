//! Categorizer
//!
//! フィルタカテゴリとプレフィックスグループを結合する。

use super::filter::categorize_by_filter;
use super::prefix::{partition, DEFAULT_SEPARATOR};
use super::types::RawCategory;

/// Standard categorization: the search-results category for `filter`
/// first, followed by the prefix groups under the default separator.
pub fn categorize<S: AsRef<str>>(items: &[S], filter: &str) -> Vec<RawCategory> {
    categorize_with_separator(items, filter, DEFAULT_SEPARATOR)
}

/// Same as [`categorize`] with an explicit prefix separator
pub fn categorize_with_separator<S: AsRef<str>>(
    items: &[S],
    filter: &str,
    separator: &str,
) -> Vec<RawCategory> {
    let mut categories = categorize_by_filter(items, filter);
    categories.extend(partition(items, separator));

    tracing::debug!(
        items = items.len(),
        categories = categories.len(),
        filter,
        "categorized items"
    );
    categories
}
