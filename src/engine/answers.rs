//! Flat answer storage shared by top-level fields and compound sub-fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single answer. The variant depends on the field type that produced it:
/// text-like fields store [`AnswerValue::Text`], checkboxes store
/// [`AnswerValue::Flag`], checkbox groups store [`AnswerValue::Selections`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Text(String),
    Selections(Vec<String>),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Equality against a conditional-rule value. Flags compare against the
    /// literals `true`/`false`; selection lists never match (no single-value
    /// equality is defined for them).
    pub fn matches(&self, expected: &str) -> bool {
        match self {
            AnswerValue::Text(value) => value == expected,
            AnswerValue::Flag(flag) => {
                (*flag && expected == "true") || (!*flag && expected == "false")
            }
            AnswerValue::Selections(_) => false,
        }
    }
}

/// Mutable flat map from field name to answer.
///
/// Unset is distinct from empty: a field the user never touched has no entry,
/// while an unchecked-then-rechecked checkbox group holds an empty list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerStore {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an answer, overwriting any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: AnswerValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<AnswerValue> {
        self.values.remove(key)
    }

    /// Checkbox-group toggle: appends the option when absent (creating the
    /// list if the field was unset), removes it by value-equality when
    /// present. Relative order of the remaining entries is preserved.
    pub fn toggle_selection(&mut self, key: &str, option: &str) {
        let entry = self
            .values
            .entry(key.to_string())
            .or_insert_with(|| AnswerValue::Selections(Vec::new()));
        if !matches!(entry, AnswerValue::Selections(_)) {
            *entry = AnswerValue::Selections(Vec::new());
        }
        if let AnswerValue::Selections(items) = entry {
            if let Some(position) = items.iter().position(|item| item == option) {
                items.remove(position);
            } else {
                items.push(option.to_string());
            }
        }
    }

    /// True when the answer under `key` equals `expected`. Unset never
    /// matches.
    pub fn matches(&self, key: &str, expected: &str) -> bool {
        self.values
            .get(key)
            .map(|value| value.matches(expected))
            .unwrap_or(false)
    }

    /// Discards every answer. Used when the selected form changes or a
    /// submission succeeds.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.values.iter()
    }

    /// Flat key-value payload for the submission endpoint.
    pub fn to_payload(&self) -> serde_json::Map<String, Value> {
        self.values
            .iter()
            .filter_map(|(key, value)| {
                serde_json::to_value(value)
                    .ok()
                    .map(|json| (key.clone(), json))
            })
            .collect()
    }
}
