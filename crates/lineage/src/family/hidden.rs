//! Collapsed-generation view state

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Person ids whose children are collapsed in the view
///
/// Mirrors the `{ [personId]: boolean }` map kept by the UI: an id counts as
/// hidden only while its value is `true`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HiddenGenerations(BTreeMap<String, bool>);

impl HiddenGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the UI map from JSON
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    pub fn hide(&mut self, id: impl Into<String>) {
        self.0.insert(id.into(), true);
    }

    pub fn show(&mut self, id: impl Into<String>) {
        self.0.insert(id.into(), false);
    }

    /// Flip the state of one id and return the new state
    pub fn toggle(&mut self, id: impl Into<String>) -> bool {
        let entry = self.0.entry(id.into()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Number of ids currently hidden
    pub fn len(&self) -> usize {
        self.0.values().filter(|hidden| **hidden).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over hidden ids
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, hidden)| **hidden)
            .map(|(id, _)| id.as_str())
    }
}

impl FromIterator<String> for HiddenGenerations {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().map(|id| (id, true)).collect())
    }
}

impl FromIterator<(String, bool)> for HiddenGenerations {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for HiddenGenerations {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}
