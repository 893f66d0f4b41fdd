//! The editor's setting table
//!
//! The table is built once per process. A table that fails its integrity
//! checks stays failed: every later call returns the same error.

use crate::enums;
use crate::keys;
use settings_core::{
    ConfigTarget, FallbackDefaults, SettingDescriptor, SettingGroup, SettingSchema,
    SettingsError, SettingsSession,
};
use std::sync::OnceLock;

static EDITOR_SCHEMA: OnceLock<Result<SettingSchema, SettingsError>> = OnceLock::new();

/// Process-wide editor schema
pub fn schema() -> Result<&'static SettingSchema, SettingsError> {
    EDITOR_SCHEMA
        .get_or_init(|| build_schema(FallbackDefaults::default()))
        .as_ref()
        .map_err(Clone::clone)
}

/// Editor groups in presentation order
pub fn groups() -> Result<&'static [SettingGroup], SettingsError> {
    Ok(schema()?.groups())
}

/// Opens a session on the process-wide schema
pub fn session<T: ConfigTarget + ?Sized>(
    target: &mut T,
) -> Result<SettingsSession<'_, T>, SettingsError> {
    Ok(SettingsSession::new(schema()?, target))
}

/// Builds a fresh editor schema with the given fallback constants
pub fn build_schema(fallback: FallbackDefaults) -> Result<SettingSchema, SettingsError> {
    let builder = enums::descriptors()
        .into_iter()
        .fold(SettingSchema::builder(), |builder, descriptor| {
            builder.enum_descriptor(descriptor)
        });

    builder
        .fallback(fallback)
        // Boolean settings
        .setting(
            SettingDescriptor::boolean(keys::TAB_INDENTS, "Tab indents")
                .with_help("Use the tab key to indent text"),
        )
        .setting(
            SettingDescriptor::boolean(keys::BACKSPACE_UNINDENTS, "Backspace unindents")
                .with_help("Backspace will unindent a line instead of just deleting a character"),
        )
        .setting(
            SettingDescriptor::boolean(keys::AUTO_INDENT, "Auto-indent")
                .with_help("Automatically indent text to match the preceding line"),
        )
        .setting(
            SettingDescriptor::boolean(keys::INDENTATION_GUIDES, "Indentation guides")
                .with_help("Display visible guidelines to help keep indentation consistent"),
        )
        .setting(
            SettingDescriptor::boolean(keys::INDENTATIONS_USE_TABS, "Use tab character")
                .with_help("Tab key inserts an actual tab character instead of spaces"),
        )
        .setting(
            SettingDescriptor::boolean(keys::EOL_VISIBILITY, "Show CR/LF")
                .with_help("Display a visible icon for carriage return and line feeds"),
        )
        .setting(
            SettingDescriptor::boolean(keys::MARGIN_LINE_NUMBERS, "Line numbers")
                .with_help("Show line numbers in the margin"),
        )
        // Color settings
        .setting(SettingDescriptor::color(keys::COLOR, "Text color").with_help("Default text color"))
        .setting(
            SettingDescriptor::color(keys::PAPER, "Paper color")
                .with_help("Default background color"),
        )
        // Numeric settings
        .setting(
            SettingDescriptor::number(keys::EDGE_COLUMN, "Text width")
                .with_help("Number of characters per line before wrapping occurs"),
        )
        .setting(
            SettingDescriptor::number(keys::TAB_WIDTH, "Tab width").with_help(
                "Width of tabs in characters, or the number of spaces to insert when tab is pressed",
            ),
        )
        // Multiple-choice settings
        .setting(
            SettingDescriptor::enumerated(keys::BRACE_MATCHING, enums::BRACE_MATCH, "Brace Matching")
                .with_help("Whether and how to highlight matching {} [] () braces"),
        )
        .setting(
            SettingDescriptor::enumerated(keys::EDGE_MODE, enums::EDGE_MODE, "Edge Mode")
                .with_help("How the edge of the text width is indicated"),
        )
        .setting(
            SettingDescriptor::enumerated(keys::EOL_MODE, enums::EOL_MODE, "Line Endings")
                .with_help("End lines with carriage return and/or line feed"),
        )
        .setting(
            SettingDescriptor::enumerated(keys::FOLDING, enums::FOLD_STYLE, "Folding")
                .with_help("What kind of icons to display for code-folding"),
        )
        .setting(
            SettingDescriptor::enumerated(
                keys::WHITESPACE_VISIBILITY,
                enums::WHITESPACE_VISIBILITY,
                "Whitespace",
            )
            .with_help("Whether whitespace is indicated with visible markers"),
        )
        .setting(
            SettingDescriptor::enumerated(keys::WRAP_MODE, enums::WRAP_MODE, "Wrap Mode")
                .with_help("How to wrap text when it reaches the text width"),
        )
        .setting(
            SettingDescriptor::enumerated(keys::LANGUAGE, enums::LANGUAGE, "Language")
                .with_help("Syntax highlighting language"),
        )
        // Groups, top to bottom
        .group(SettingGroup::new("colors", "Colors").items([keys::COLOR, keys::PAPER]))
        .group(SettingGroup::new("indentation", "Indentation").items([
            keys::TAB_WIDTH,
            keys::TAB_INDENTS,
            keys::BACKSPACE_UNINDENTS,
            keys::AUTO_INDENT,
            keys::INDENTATION_GUIDES,
            keys::INDENTATIONS_USE_TABS,
        ]))
        .group(SettingGroup::new("wrapping", "Wrapping").items([
            keys::EDGE_MODE,
            keys::WRAP_MODE,
            keys::EDGE_COLUMN,
        ]))
        .group(SettingGroup::new("formatting", "Formatting").items([
            keys::WHITESPACE_VISIBILITY,
            keys::EOL_MODE,
            keys::EOL_VISIBILITY,
        ]))
        .group(SettingGroup::new("coding_aids", "Coding aids").items([
            keys::LANGUAGE,
            keys::FOLDING,
            keys::BRACE_MATCHING,
        ]))
        .build()
}
