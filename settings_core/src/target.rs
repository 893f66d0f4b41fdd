//! Configurable target interface
//!
//! A target is the external object a session reads from and writes to,
//! addressed purely by setting key.

use crate::value::{SettingKey, SettingValue};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors reported by a target
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("unknown key: {0}")]
    UnknownKey(String),

    #[error("{0} has no getter")]
    WriteOnly(String),

    #[error("{key} rejected: {reason}")]
    Rejected { key: String, reason: String },
}

/// Generic key/value access to a configurable object
///
/// A failing `set` must leave the target's other settings untouched.
pub trait ConfigTarget {
    /// Reads the current value of `key`
    fn get(&self, key: &str) -> Result<SettingValue, TargetError>;

    /// Applies one setting
    fn set(&mut self, key: &str, value: SettingValue) -> Result<(), TargetError>;
}

impl<T: ConfigTarget + ?Sized> ConfigTarget for &mut T {
    fn get(&self, key: &str) -> Result<SettingValue, TargetError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: SettingValue) -> Result<(), TargetError> {
        (**self).set(key, value)
    }
}

/// Map-backed target
///
/// Keys never written read as [`TargetError::UnknownKey`]. Keys marked
/// read-only reject every `set`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryTarget {
    values: BTreeMap<SettingKey, SettingValue>,
    read_only: BTreeSet<SettingKey>,
}

impl InMemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style initial value
    pub fn with_value(mut self, key: impl Into<SettingKey>, value: impl Into<SettingValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Marks a key as rejecting writes
    pub fn with_read_only(mut self, key: impl Into<SettingKey>) -> Self {
        self.read_only.insert(key.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &BTreeMap<SettingKey, SettingValue> {
        &self.values
    }
}

impl ConfigTarget for InMemoryTarget {
    fn get(&self, key: &str) -> Result<SettingValue, TargetError> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| TargetError::UnknownKey(key.to_string()))
    }

    fn set(&mut self, key: &str, value: SettingValue) -> Result<(), TargetError> {
        if self.read_only.contains(key) {
            return Err(TargetError::Rejected {
                key: key.to_string(),
                reason: "read-only".to_string(),
            });
        }
        self.values.insert(SettingKey::new(key), value);
        Ok(())
    }
}
