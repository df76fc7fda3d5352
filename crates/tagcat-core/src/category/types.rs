//! Category data model
//!
//! 分類結果の共通データ構造。UI側は `metadata.type` で分岐する。

use serde::{Deserialize, Serialize};

/// Why a category exists.
///
/// Serialized with an internal `type` tag so consumers can branch on it:
/// `{"type":"SEARCH_RESULTS","validRegex":true,"universalRegex":false}` or
/// `{"type":"PREFIX_GROUP"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryMetadata {
    /// Items matched against a user-supplied regex filter
    #[serde(rename_all = "camelCase")]
    SearchResults {
        /// Whether the filter compiled
        valid_regex: bool,
        /// Whether the filter text is literally `.*`
        universal_regex: bool,
    },
    /// Items sharing a separator-delimited prefix
    PrefixGroup,
}

impl CategoryMetadata {
    pub fn is_search_results(&self) -> bool {
        matches!(self, Self::SearchResults { .. })
    }

    pub fn is_prefix_group(&self) -> bool {
        matches!(self, Self::PrefixGroup)
    }
}

/// A named group of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category<T> {
    pub name: String,
    pub metadata: CategoryMetadata,
    pub items: Vec<T>,
}

impl<T> Category<T> {
    pub fn new(name: impl Into<String>, metadata: CategoryMetadata) -> Self {
        Self {
            name: name.into(),
            metadata,
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the items, keeping `name` and `metadata`
    pub fn map_items<U, F>(self, f: F) -> Category<U>
    where
        F: FnMut(T) -> U,
    {
        Category {
            name: self.name,
            metadata: self.metadata,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Intermediate categorization of plain strings
pub type RawCategory = Category<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_json_shape() {
        let search = CategoryMetadata::SearchResults {
            valid_regex: true,
            universal_regex: false,
        };
        let json = serde_json::to_value(search).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "SEARCH_RESULTS",
                "validRegex": true,
                "universalRegex": false,
            })
        );

        let prefix = serde_json::to_value(CategoryMetadata::PrefixGroup).unwrap();
        assert_eq!(prefix, serde_json::json!({"type": "PREFIX_GROUP"}));
    }

    #[test]
    fn test_metadata_parses_tagged_json() {
        let parsed: CategoryMetadata = serde_json::from_str(
            r#"{"type":"SEARCH_RESULTS","validRegex":false,"universalRegex":true}"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            CategoryMetadata::SearchResults {
                valid_regex: false,
                universal_regex: true,
            }
        );
    }

    #[test]
    fn test_map_items_keeps_name_and_metadata() {
        let mut category = Category::new("a", CategoryMetadata::PrefixGroup);
        category.items = vec!["a/b".to_string(), "a/c".to_string()];

        let lengths = category.map_items(|s| s.len());
        assert_eq!(lengths.name, "a");
        assert!(lengths.metadata.is_prefix_group());
        assert_eq!(lengths.items, vec![3, 3]);
    }
}
