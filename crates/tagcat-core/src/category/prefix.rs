//! Prefix Partitioner
//!
//! 区切り文字の手前の文字列でグループ化する（商集合）。

use std::collections::HashMap;

use super::types::{Category, CategoryMetadata, RawCategory};

/// Default separator for prefix groups
pub const DEFAULT_SEPARATOR: &str = "/";

/// Group key of `item`: everything before the first `separator`, or the
/// whole item when the separator does not occur. An empty separator
/// occurs at offset 0, so every key is empty.
pub fn prefix_of<'a>(item: &'a str, separator: &str) -> &'a str {
    match item.find(separator) {
        Some(index) => &item[..index],
        None => item,
    }
}

/// Partition `items` into groups sharing a `separator`-prefix.
///
/// Groups appear in first-occurrence order of their key and items keep
/// their input order within each group. Every item lands in exactly one
/// group, so an item such as `"a"` joins the `"a"` group of `"a/b"`.
pub fn partition<S: AsRef<str>>(items: &[S], separator: &str) -> Vec<RawCategory> {
    let mut categories: Vec<RawCategory> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let item: &str = item.as_ref();
        let name = prefix_of(item, separator);

        let index = *index_by_name.entry(name).or_insert_with(|| {
            categories.push(Category::new(name, CategoryMetadata::PrefixGroup));
            categories.len() - 1
        });
        categories[index].items.push(item.to_string());
    }

    tracing::trace!(
        items = items.len(),
        groups = categories.len(),
        separator,
        "partitioned by prefix"
    );
    categories
}
