//! # Edit Commands
//!
//! Command-line edits applied to a settings session.
//!
//! ## Command Set
//!
//! - `key=value` - Stage `value` for `key` (parsed against the key's kind)
//! - `!key` - Drop the staged value for `key`

use settings_core::{ConfigTarget, SettingsError, SettingsSession};
use thiserror::Error;

/// Edit command error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid edit: {0}")]
    InvalidEdit(String),

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Cannot apply {edit}: {source}")]
    Rejected {
        edit: String,
        #[source]
        source: SettingsError,
    },
}

/// One edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Stage the parsed value
    Set { key: String, value: String },

    /// Drop a staged value
    Unset { key: String },
}

impl EditCommand {
    /// Parses an edit string
    pub fn parse(input: &str) -> Result<EditCommand, CommandError> {
        let input = input.trim();

        if let Some(key) = input.strip_prefix('!') {
            let key = key.trim();
            if key.is_empty() {
                return Err(CommandError::InvalidEdit(input.to_string()));
            }
            return Ok(EditCommand::Unset {
                key: key.to_string(),
            });
        }

        let (key, value) = input
            .split_once('=')
            .ok_or_else(|| CommandError::InvalidEdit(input.to_string()))?;
        let key = key.trim();
        let value = value.trim();

        if key.is_empty() {
            return Err(CommandError::InvalidEdit(input.to_string()));
        }
        if value.is_empty() {
            return Err(CommandError::MissingValue(key.to_string()));
        }

        Ok(EditCommand::Set {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        match self {
            EditCommand::Set { key, .. } | EditCommand::Unset { key } => key,
        }
    }

    /// Applies the edit to `session`
    ///
    /// Values are parsed and checked against the schema before staging, so a
    /// wrong kind or unknown choice never reaches the pending set.
    pub fn apply<T: ConfigTarget + ?Sized>(
        &self,
        session: &mut SettingsSession<'_, T>,
    ) -> Result<(), CommandError> {
        let rejected = |source: SettingsError| CommandError::Rejected {
            edit: self.to_string(),
            source,
        };

        match self {
            EditCommand::Set { key, value } => {
                let parsed = session
                    .schema()
                    .parse_value(key, value)
                    .map_err(rejected)?;
                session.stage_checked(key, parsed).map_err(rejected)?;
            }
            EditCommand::Unset { key } => {
                session.schema().describe(key).map_err(rejected)?;
                if session.unstage(key).is_none() {
                    tracing::debug!(key = %key, "nothing staged");
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for EditCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditCommand::Set { key, value } => write!(f, "{}={}", key, value),
            EditCommand::Unset { key } => write!(f, "!{}", key),
        }
    }
}
