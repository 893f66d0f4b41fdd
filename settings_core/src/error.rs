//! Error types for the settings model

use crate::target::TargetError;
use crate::value::{SettingKey, ValueKind};
use thiserror::Error;

/// Settings model errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Unknown setting key: {0}")]
    UnknownSettingKey(SettingKey),

    #[error("Unknown enum kind: {0}")]
    UnknownEnumKind(String),

    #[error("Schema integrity error: {0}")]
    SchemaIntegrity(#[from] IntegrityError),

    #[error("Setting {key} expects a {expected} value, got {found}")]
    KindMismatch {
        key: SettingKey,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Setting {key} has no choice {value}")]
    InvalidChoice { key: SettingKey, value: String },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: SettingKey, reason: String },

    #[error("Target rejected {key}: {source}")]
    TargetSetFailed {
        key: SettingKey,
        #[source]
        source: TargetError,
    },
}

/// Load-time schema violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("setting {0} declared more than once")]
    DuplicateSetting(SettingKey),

    #[error("setting {key} references missing enum {enum_name}")]
    MissingEnum { key: SettingKey, enum_name: String },

    #[error("enum {0} declared more than once")]
    DuplicateEnum(String),

    #[error("enum {0} has no choices")]
    EmptyEnum(String),

    #[error("enum {enum_name} repeats value {value}")]
    DuplicateChoice { enum_name: String, value: String },

    #[error("enum {enum_name} repeats label {label}")]
    DuplicateLabel { enum_name: String, label: String },

    #[error("group {group} references undeclared setting {key}")]
    UndeclaredGroupKey { group: String, key: SettingKey },

    #[error("group {group} lists setting {key} more than once")]
    DuplicateGroupKey { group: String, key: SettingKey },

    #[error("setting {key} appears in both {first} and {second}")]
    KeyInTwoGroups {
        key: SettingKey,
        first: String,
        second: String,
    },

    #[error("group {0} declared more than once")]
    DuplicateGroup(String),
}

/// Result type for settings operations
pub type Result<T> = core::result::Result<T, SettingsError>;
