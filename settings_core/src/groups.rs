//! Presentation groups
//!
//! A group is a labelled, ordered subset of the declared settings. Groups
//! are listed in presentation order (top to bottom) and never share a key.

use crate::value::SettingKey;

/// Named, labelled, ordered set of setting keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingGroup {
    id: String,
    label: String,
    keys: Vec<SettingKey>,
}

impl SettingGroup {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            keys: Vec::new(),
        }
    }

    /// Appends a key (builder style)
    pub fn item(mut self, key: impl Into<SettingKey>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Appends several keys in order
    pub fn items<K: Into<SettingKey>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.keys.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn keys(&self) -> &[SettingKey] {
        &self.keys
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k.as_str() == key)
    }
}
