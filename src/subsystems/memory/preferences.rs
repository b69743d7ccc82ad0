//! Preference accumulator — what the user said they like, in order.

use serde::{Deserialize, Serialize};

/// Ordered list of stated preferences.
///
/// Append-only: entries are never removed, merged, or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceStore {
    entries: Vec<String>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already-normalised preference.
    pub fn record(&mut self, text: impl Into<String>) {
        self.entries.push(text.into());
    }

    /// Entries joined with `", "`, or `"none"` when nothing was recorded.
    pub fn summarize(&self) -> String {
        if self.entries.is_empty() {
            "none".to_string()
        } else {
            self.entries.join(", ")
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
