//! Run-to-tag mapping
//!
//! The payload supplied by the data backend: each run name maps to the tags
//! recorded for it. Runs keep their insertion (or document) order.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;

/// Insertion-ordered mapping from run name to its tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunToTag {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl RunToTag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the tags of `run`.
    ///
    /// A replaced run keeps its original position.
    pub fn insert(&mut self, run: impl Into<String>, tags: Vec<String>) {
        let run = run.into();
        match self.index.get(&run) {
            Some(&i) => self.entries[i].1 = tags,
            None => {
                self.index.insert(run.clone(), self.entries.len());
                self.entries.push((run, tags));
            }
        }
    }

    pub fn get(&self, run: &str) -> Option<&[String]> {
        self.index
            .get(run)
            .map(|&i| self.entries[i].1.as_slice())
    }

    pub fn contains_run(&self, run: &str) -> bool {
        self.index.contains_key(run)
    }

    /// Run names in mapping order
    pub fn runs(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(run, _)| run.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(run, tags)| (run.as_str(), tags.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct tags across all runs, in order of first occurrence
    /// (runs visited in mapping order).
    pub fn tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for (_, run_tags) in &self.entries {
            for tag in run_tags {
                if seen.insert(tag.as_str()) {
                    tags.push(tag.clone());
                }
            }
        }
        tags
    }

    /// Parse the backend's `{"run": ["tag", ...]}` JSON payload
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON payload from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mapping = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            runs = mapping.len(),
            "loaded run-to-tag mapping"
        );
        Ok(mapping)
    }
}

impl<K, V> FromIterator<(K, V)> for RunToTag
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (run, tags) in iter {
            mapping.insert(run, tags.into_iter().map(Into::into).collect());
        }
        mapping
    }
}

impl Serialize for RunToTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (run, tags) in &self.entries {
            map.serialize_entry(run, tags)?;
        }
        map.end()
    }
}

struct RunToTagVisitor;

impl<'de> Visitor<'de> for RunToTagVisitor {
    type Value = RunToTag;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from run name to a list of tag names")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<RunToTag, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mapping = RunToTag::new();
        while let Some((run, tags)) = access.next_entry::<String, Vec<String>>()? {
            mapping.insert(run, tags);
        }
        Ok(mapping)
    }
}

impl<'de> Deserialize<'de> for RunToTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(RunToTagVisitor)
    }
}
