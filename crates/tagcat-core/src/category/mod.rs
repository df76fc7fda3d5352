//! # Category Module
//!
//! 文字列識別子の集合を、名前付き・順序付きのカテゴリに分類する。
//!
//! ## 分類方式
//!
//! - **Search results**: 正規表現フィルタに一致した項目（常に1カテゴリ）
//! - **Prefix group**: 区切り文字の手前の文字列が同じ項目
//!
//! ## モジュール構成
//!
//! - `types`: `Category` と `CategoryMetadata`
//! - `filter`: 正規表現フィルタによる分類
//! - `prefix`: プレフィックスによる分割
//! - `categorizer`: 両者の結合
//!
//! ## 使用例
//!
//! ```rust
//! use tagcat_core::category::{categorize, CategoryMetadata};
//!
//! let tags = ["loss/train", "loss/eval", "accuracy"];
//! let categories = categorize(&tags, "eval");
//!
//! // 先頭は常に検索結果カテゴリ
//! assert_eq!(categories[0].name, "eval");
//! assert_eq!(categories[0].items, vec!["loss/eval".to_string()]);
//!
//! // 続いてプレフィックスグループ（初出順）
//! assert_eq!(categories[1].name, "loss");
//! assert_eq!(categories[1].metadata, CategoryMetadata::PrefixGroup);
//! assert_eq!(categories[2].name, "accuracy");
//! ```

mod categorizer;
mod filter;
mod prefix;
mod types;

// Re-exports
pub use categorizer::{categorize, categorize_with_separator};
pub use filter::{categorize_by_filter, FilterPattern, UNIVERSAL_FILTER};
pub use prefix::{partition, prefix_of, DEFAULT_SEPARATOR};
pub use types::{Category, CategoryMetadata, RawCategory};
