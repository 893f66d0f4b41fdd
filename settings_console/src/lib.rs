//! # Settings Console (Demo)
//!
//! A text-mode front end for the editor settings model.
//! It is NOT an editor and NOT a general configuration tool.
//!
//! One run opens a session on an [`EditorProperties`] target, stages a named
//! settings document and command-line edits, renders the settings form, then
//! commits (or discards on a dry run).

pub mod commands;
pub mod form;

use commands::{CommandError, EditCommand};
use editor_settings::EditorProperties;
use settings_core::persistence::{self, NamedSettingsData, PersistenceError};
use settings_core::{CommitReport, FallbackDefaults, SettingSchema, SettingsError, TargetError};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Console error types
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid editor properties in {path}: {source}")]
    InvalidEditor {
        path: PathBuf,
        #[source]
        source: TargetError,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Console run configuration
#[derive(Debug, Clone, Default)]
pub struct ConsoleConfig {
    /// Editor properties (JSON) to start from
    pub editor: Option<PathBuf>,
    /// Fallback defaults (JSON) for the schema
    pub fallback: Option<PathBuf>,
    /// Named settings document to stage before the edits
    pub load: Option<PathBuf>,
    /// Where to write the named document of the edited values
    pub export: Option<PathBuf>,
    /// `key=value` and `!key` edits, applied in order
    pub edits: Vec<String>,
    /// Discard instead of committing
    pub dry_run: bool,
    /// Print help text under each row
    pub with_help: bool,
}

/// Result of one console run
#[derive(Debug, Clone)]
pub struct ConsoleOutput {
    /// Rendered form, showing staged values
    pub form: String,
    /// Named document of the values shown in the form
    pub exported: NamedSettingsData,
    /// Present unless the run was a dry run
    pub report: Option<CommitReport>,
    /// Entries dropped by a dry run
    pub discarded: usize,
    /// Editor state after the run
    pub editor: EditorProperties,
}

impl ConsoleOutput {
    /// Commit summary, one line per failure
    pub fn summary(&self) -> String {
        let mut out = String::new();
        match &self.report {
            Some(report) => {
                let _ = writeln!(
                    out,
                    "Applied {} of {} change(s)",
                    report.applied.len(),
                    report.attempted()
                );
                for (key, err) in &report.failures {
                    let _ = writeln!(out, "  {}: {}", key, err);
                }
            }
            None => {
                let _ = writeln!(out, "Dry run: discarded {} change(s)", self.discarded);
            }
        }
        out
    }

    /// True unless a commit left keys unapplied
    pub fn succeeded(&self) -> bool {
        self.report.as_ref().map_or(true, CommitReport::is_complete)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ConsoleError> {
    fs::read(path).map_err(|source| ConsoleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_editor(path: Option<&Path>) -> Result<EditorProperties, ConsoleError> {
    let Some(path) = path else {
        return Ok(EditorProperties::new());
    };
    let bytes = read_file(path)?;
    let editor: EditorProperties =
        serde_json::from_slice(&bytes).map_err(|source| ConsoleError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    editor.validate().map_err(|source| ConsoleError::InvalidEditor {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(editor)
}

fn load_fallback(path: &Path) -> Result<FallbackDefaults, ConsoleError> {
    let bytes = read_file(path)?;
    FallbackDefaults::from_json(&bytes).map_err(|source| ConsoleError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Editor schema, rebuilt with the fallbacks in `fallback` when given
pub fn load_schema(
    fallback: Option<&Path>,
) -> Result<Cow<'static, SettingSchema>, ConsoleError> {
    match fallback {
        Some(path) => {
            let schema = editor_settings::build_schema(load_fallback(path)?)?;
            Ok(Cow::Owned(schema))
        }
        None => Ok(Cow::Borrowed(editor_settings::schema()?)),
    }
}

/// Runs one stage / render / commit cycle
pub fn run(config: &ConsoleConfig) -> Result<ConsoleOutput, ConsoleError> {
    let edits = config
        .edits
        .iter()
        .map(|edit| EditCommand::parse(edit))
        .collect::<Result<Vec<_>, _>>()?;

    let loaded = load_schema(config.fallback.as_deref())?;
    let schema: &SettingSchema = &loaded;

    let mut editor = load_editor(config.editor.as_deref())?;
    let mut session = schema.session(&mut editor);

    if let Some(path) = &config.load {
        let data = persistence::deserialize_named(&read_file(path)?)?;
        let values = persistence::import_named(schema, &data)?;
        let staged = session.stage_all(values)?;
        tracing::info!(path = %path.display(), staged, "staged settings document");
    }

    for edit in &edits {
        edit.apply(&mut session)?;
    }

    let form = form::render_form(&form::build_form(&session)?, config.with_help);
    let exported = session.export_effective()?;

    if let Some(path) = &config.export {
        let bytes = persistence::serialize_named(&exported)?;
        fs::write(path, bytes).map_err(|source| ConsoleError::Io {
            path: path.clone(),
            source,
        })?;
    }

    let (report, discarded) = if config.dry_run {
        (None, session.discard())
    } else {
        (Some(session.commit()), 0)
    };
    drop(session);

    Ok(ConsoleOutput {
        form,
        exported,
        report,
        discarded,
        editor,
    })
}
