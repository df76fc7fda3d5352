pub mod category;
pub mod config;
pub mod error;
pub mod run_to_tag;
pub mod tags;

pub use config::{CategorizeConfig, Config};
pub use error::{Result, TagCatError};
pub use run_to_tag::RunToTag;
pub use tags::{
    categorize_run_tag_combinations, categorize_run_tag_combinations_with_separator,
    categorize_tags, categorize_tags_with_separator, RunTagCategory, RunTagItem, TagCategory,
    TagItem,
};

// Category system
pub use category::{
    categorize, categorize_by_filter, categorize_with_separator, partition, Category,
    CategoryMetadata, FilterPattern, RawCategory, DEFAULT_SEPARATOR,
};
