//! Tag and run/tag expansion
//!
//! Lifts the string categorization over a [`RunToTag`] mapping: each tag is
//! annotated with the selected runs that contain it, and can be exploded
//! further into one item per (run, tag) pair.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::{categorize_with_separator, Category, DEFAULT_SEPARATOR};
use crate::error::{Result, TagCatError};
use crate::run_to_tag::RunToTag;

/// A tag together with the selected runs that recorded it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagItem {
    pub tag: String,
    pub runs: Vec<String>,
}

/// A single (run, tag) combination
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunTagItem {
    pub tag: String,
    pub run: String,
}

pub type TagCategory = Category<TagItem>;
pub type RunTagCategory = Category<RunTagItem>;

/// Categorize every tag in `run_to_tag`, annotating each with the runs of
/// `selected_runs` (in that order) that contain it.
///
/// The tag universe covers all runs of the mapping regardless of the
/// selection, so a tag no selected run contains still appears with empty
/// `runs`.
///
/// # Errors
///
/// Returns [`TagCatError::UnknownRun`] if a selected run is not a key of
/// `run_to_tag`.
pub fn categorize_tags<S: AsRef<str>>(
    run_to_tag: &RunToTag,
    selected_runs: &[S],
    filter: &str,
) -> Result<Vec<TagCategory>> {
    categorize_tags_with_separator(run_to_tag, selected_runs, filter, DEFAULT_SEPARATOR)
}

/// Same as [`categorize_tags`] with an explicit prefix separator
pub fn categorize_tags_with_separator<S: AsRef<str>>(
    run_to_tag: &RunToTag,
    selected_runs: &[S],
    filter: &str,
    separator: &str,
) -> Result<Vec<TagCategory>> {
    let tag_to_runs = runs_by_tag(run_to_tag, selected_runs)?;
    let tags = run_to_tag.tags();
    let categories = categorize_with_separator(&tags, filter, separator);

    Ok(categories
        .into_iter()
        .map(|category| {
            category.map_items(|tag| {
                let runs = tag_to_runs.get(tag.as_str()).cloned().unwrap_or_default();
                TagItem { tag, runs }
            })
        })
        .collect())
}

/// Categorize (run, tag) pairs: like [`categorize_tags`], with each tag
/// item exploded into one item per run.
///
/// # Errors
///
/// Returns [`TagCatError::UnknownRun`] if a selected run is not a key of
/// `run_to_tag`.
pub fn categorize_run_tag_combinations<S: AsRef<str>>(
    run_to_tag: &RunToTag,
    selected_runs: &[S],
    filter: &str,
) -> Result<Vec<RunTagCategory>> {
    categorize_run_tag_combinations_with_separator(
        run_to_tag,
        selected_runs,
        filter,
        DEFAULT_SEPARATOR,
    )
}

/// Same as [`categorize_run_tag_combinations`] with an explicit prefix separator
pub fn categorize_run_tag_combinations_with_separator<S: AsRef<str>>(
    run_to_tag: &RunToTag,
    selected_runs: &[S],
    filter: &str,
    separator: &str,
) -> Result<Vec<RunTagCategory>> {
    let tag_categories =
        categorize_tags_with_separator(run_to_tag, selected_runs, filter, separator)?;
    Ok(tag_categories.into_iter().map(explode_category).collect())
}

fn explode_category(category: TagCategory) -> RunTagCategory {
    let items = category
        .items
        .into_iter()
        .flat_map(|TagItem { tag, runs }| {
            runs.into_iter().map(move |run| RunTagItem {
                tag: tag.clone(),
                run,
            })
        })
        .collect();

    Category {
        name: category.name,
        metadata: category.metadata,
        items,
    }
}

/// Map each tag to the selected runs containing it, in selection order
fn runs_by_tag<'a, S: AsRef<str>>(
    run_to_tag: &'a RunToTag,
    selected_runs: &[S],
) -> Result<HashMap<&'a str, Vec<String>>> {
    let mut tag_to_runs: HashMap<&str, Vec<String>> = HashMap::new();

    for run in selected_runs {
        let run: &str = run.as_ref();
        let Some(tags) = run_to_tag.get(run) else {
            tracing::warn!(run, "selected run is missing from run-to-tag mapping");
            return Err(TagCatError::UnknownRun {
                run: run.to_string(),
            });
        };
        for tag in tags {
            tag_to_runs
                .entry(tag.as_str())
                .or_default()
                .push(run.to_string());
        }
    }

    Ok(tag_to_runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryMetadata;

    fn sample() -> RunToTag {
        [
            ("run1", vec!["loss/train", "loss/eval"]),
            ("run2", vec!["loss/train", "acc"]),
            ("run3", vec!["images/sample"]),
        ]
        .into_iter()
        .collect()
    }

    fn tag_item(tag: &str, runs: &[&str]) -> TagItem {
        TagItem {
            tag: tag.to_string(),
            runs: runs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn run_tag(run: &str, tag: &str) -> RunTagItem {
        RunTagItem {
            tag: tag.to_string(),
            run: run.to_string(),
        }
    }

    #[test]
    fn test_categorize_tags_annotates_selected_runs() {
        let result = categorize_tags(&sample(), &["run2", "run1"], "loss").unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!(result[0].name, "loss");
        assert!(result[0].metadata.is_search_results());
        assert_eq!(
            result[0].items,
            vec![
                tag_item("loss/train", &["run2", "run1"]),
                tag_item("loss/eval", &["run1"]),
            ]
        );

        let names: Vec<&str> = result[1..].iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["loss", "acc", "images"]);
        assert_eq!(result[2].items, vec![tag_item("acc", &["run2"])]);
    }

    #[test]
    fn test_unselected_tag_keeps_empty_runs() {
        let result = categorize_tags(&sample(), &["run1"], "").unwrap();

        let images = result.iter().find(|c| c.name == "images").unwrap();
        assert_eq!(images.metadata, CategoryMetadata::PrefixGroup);
        assert_eq!(images.items, vec![tag_item("images/sample", &[])]);
    }

    #[test]
    fn test_no_selected_runs() {
        let selected: [&str; 0] = [];
        let result = categorize_tags(&sample(), &selected, ".*").unwrap();
        assert_eq!(result[0].len(), 4);
        assert!(result
            .iter()
            .flat_map(|c| c.items.iter())
            .all(|item| item.runs.is_empty()));
    }

    #[test]
    fn test_unknown_selected_run_fails_fast() {
        let err = categorize_tags(&sample(), &["run1", "ghost"], "").unwrap_err();
        match err {
            TagCatError::UnknownRun { run } => assert_eq!(run, "ghost"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_lists_are_not_shared_between_categories() {
        let mut result = categorize_tags(&sample(), &["run1"], "").unwrap();
        result[0].items[0].runs.push("mutated".to_string());

        let loss = result.iter().find(|c| c.name == "loss").unwrap();
        assert_eq!(loss.items[0], tag_item("loss/train", &["run1"]));
    }

    #[test]
    fn test_run_tag_combinations_flatten_in_order() {
        let result =
            categorize_run_tag_combinations(&sample(), &["run1", "run2"], "train").unwrap();

        assert_eq!(result[0].name, "train");
        assert_eq!(
            result[0].items,
            vec![run_tag("run1", "loss/train"), run_tag("run2", "loss/train")]
        );

        let loss = &result[1];
        assert_eq!(loss.name, "loss");
        assert_eq!(
            loss.items,
            vec![
                run_tag("run1", "loss/train"),
                run_tag("run2", "loss/train"),
                run_tag("run1", "loss/eval"),
            ]
        );

        let images = result.iter().find(|c| c.name == "images").unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn test_run_tag_combinations_unknown_run() {
        assert!(matches!(
            categorize_run_tag_combinations(&sample(), &["nope"], ""),
            Err(TagCatError::UnknownRun { .. })
        ));
    }

    #[test]
    fn test_custom_separator_for_tags() {
        let mapping: RunToTag = [("r", vec!["a.b", "a.c", "d"])].into_iter().collect();
        let result = categorize_tags_with_separator(&mapping, &["r"], "", ".").unwrap();
        let names: Vec<&str> = result.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["", "a", "d"]);
    }
}
