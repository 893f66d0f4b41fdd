//! Editor configuration properties
//!
//! `EditorProperties` is the editor-side configuration object a settings
//! session reads and writes. It validates every write and leaves the other
//! properties untouched when one is rejected.

use crate::enums;
use crate::keys;
use serde::{Deserialize, Serialize};
use settings_core::{ChoiceValue, Color, ConfigTarget, SettingValue, TargetError};
use std::collections::BTreeMap;

/// Typed editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorProperties {
    pub tab_indents: bool,
    pub backspace_unindents: bool,
    pub auto_indent: bool,
    pub indentation_guides: bool,
    pub indentations_use_tabs: bool,
    pub eol_visibility: bool,
    pub margin_line_numbers: bool,
    pub color: Color,
    pub paper: Color,
    pub edge_column: i64,
    pub tab_width: i64,
    pub brace_matching: i64,
    pub edge_mode: i64,
    pub eol_mode: i64,
    pub folding: i64,
    pub whitespace_visibility: i64,
    pub wrap_mode: i64,
    pub language: String,
    /// Colors set through keys that have no getter
    #[serde(skip)]
    write_only: BTreeMap<String, Color>,
}

impl Default for EditorProperties {
    fn default() -> Self {
        Self {
            tab_indents: true,
            backspace_unindents: false,
            auto_indent: false,
            indentation_guides: false,
            indentations_use_tabs: true,
            eol_visibility: false,
            margin_line_numbers: false,
            color: Color::BLACK,
            paper: Color::WHITE,
            edge_column: 80,
            tab_width: 8,
            brace_matching: 0,
            edge_mode: 0,
            eol_mode: 2,
            folding: 0,
            whitespace_visibility: 0,
            wrap_mode: 0,
            language: "None".to_string(),
            write_only: BTreeMap::new(),
        }
    }
}

impl EditorProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written to a write-only color key
    pub fn write_only_color(&self, key: &str) -> Option<Color> {
        self.write_only.get(key).copied()
    }

    /// Applies the checks `set` enforces to every property
    ///
    /// Deserialized properties skip `set`, so loaders call this before use.
    pub fn validate(&self) -> Result<(), TargetError> {
        check_tab_width(self.tab_width)?;
        check_edge_column(self.edge_column)?;
        check_language(&self.language)?;
        let codes = [
            (keys::BRACE_MATCHING, enums::BRACE_MATCH, self.brace_matching),
            (keys::EDGE_MODE, enums::EDGE_MODE, self.edge_mode),
            (keys::EOL_MODE, enums::EOL_MODE, self.eol_mode),
            (keys::FOLDING, enums::FOLD_STYLE, self.folding),
            (
                keys::WHITESPACE_VISIBILITY,
                enums::WHITESPACE_VISIBILITY,
                self.whitespace_visibility,
            ),
            (keys::WRAP_MODE, enums::WRAP_MODE, self.wrap_mode),
        ];
        for (key, kind, code) in codes {
            check_choice(key, kind, code)?;
        }
        Ok(())
    }

    fn bool_field(&mut self, key: &str) -> Option<&mut bool> {
        match key {
            keys::TAB_INDENTS => Some(&mut self.tab_indents),
            keys::BACKSPACE_UNINDENTS => Some(&mut self.backspace_unindents),
            keys::AUTO_INDENT => Some(&mut self.auto_indent),
            keys::INDENTATION_GUIDES => Some(&mut self.indentation_guides),
            keys::INDENTATIONS_USE_TABS => Some(&mut self.indentations_use_tabs),
            keys::EOL_VISIBILITY => Some(&mut self.eol_visibility),
            keys::MARGIN_LINE_NUMBERS => Some(&mut self.margin_line_numbers),
            _ => None,
        }
    }

    fn color_field(&mut self, key: &str) -> Option<&mut Color> {
        match key {
            keys::COLOR => Some(&mut self.color),
            keys::PAPER => Some(&mut self.paper),
            _ => None,
        }
    }

    /// Mutable code field and the enum kind it draws from
    fn choice_field(&mut self, key: &str) -> Option<(&mut i64, &'static str)> {
        match key {
            keys::BRACE_MATCHING => Some((&mut self.brace_matching, enums::BRACE_MATCH)),
            keys::EDGE_MODE => Some((&mut self.edge_mode, enums::EDGE_MODE)),
            keys::EOL_MODE => Some((&mut self.eol_mode, enums::EOL_MODE)),
            keys::FOLDING => Some((&mut self.folding, enums::FOLD_STYLE)),
            keys::WHITESPACE_VISIBILITY => {
                Some((&mut self.whitespace_visibility, enums::WHITESPACE_VISIBILITY))
            }
            keys::WRAP_MODE => Some((&mut self.wrap_mode, enums::WRAP_MODE)),
            _ => None,
        }
    }
}

fn rejected(key: &str, reason: impl Into<String>) -> TargetError {
    TargetError::Rejected {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn expect_kind(key: &str, expected: &str, value: &SettingValue) -> TargetError {
    rejected(key, format!("expected {}, got {}", expected, value.kind()))
}

fn check_choice(key: &str, kind: &str, code: i64) -> Result<(), TargetError> {
    let known = enums::integer_choices(kind)
        .map_or(false, |table| table.iter().any(|&(v, _)| v == code));
    if !known {
        return Err(rejected(key, format!("{} is not a {} value", code, kind)));
    }
    Ok(())
}

fn check_tab_width(width: i64) -> Result<(), TargetError> {
    if width < 1 {
        return Err(rejected(keys::TAB_WIDTH, "tab width must be at least 1"));
    }
    Ok(())
}

fn check_edge_column(column: i64) -> Result<(), TargetError> {
    if column < 0 {
        return Err(rejected(keys::EDGE_COLUMN, "text width cannot be negative"));
    }
    Ok(())
}

fn check_language(name: &str) -> Result<(), TargetError> {
    if !enums::LANGUAGE_CHOICES.iter().any(|&(n, _)| n == name) {
        return Err(rejected(keys::LANGUAGE, format!("no lexer for {}", name)));
    }
    Ok(())
}

impl ConfigTarget for EditorProperties {
    fn get(&self, key: &str) -> Result<SettingValue, TargetError> {
        let value = match key {
            keys::TAB_INDENTS => SettingValue::Boolean(self.tab_indents),
            keys::BACKSPACE_UNINDENTS => SettingValue::Boolean(self.backspace_unindents),
            keys::AUTO_INDENT => SettingValue::Boolean(self.auto_indent),
            keys::INDENTATION_GUIDES => SettingValue::Boolean(self.indentation_guides),
            keys::INDENTATIONS_USE_TABS => SettingValue::Boolean(self.indentations_use_tabs),
            keys::EOL_VISIBILITY => SettingValue::Boolean(self.eol_visibility),
            keys::MARGIN_LINE_NUMBERS => SettingValue::Boolean(self.margin_line_numbers),
            keys::COLOR => SettingValue::Color(self.color),
            keys::PAPER => SettingValue::Color(self.paper),
            keys::EDGE_COLUMN => SettingValue::Number(self.edge_column),
            keys::TAB_WIDTH => SettingValue::Number(self.tab_width),
            keys::BRACE_MATCHING => SettingValue::Choice(ChoiceValue::Integer(self.brace_matching)),
            keys::EDGE_MODE => SettingValue::Choice(ChoiceValue::Integer(self.edge_mode)),
            keys::EOL_MODE => SettingValue::Choice(ChoiceValue::Integer(self.eol_mode)),
            keys::FOLDING => SettingValue::Choice(ChoiceValue::Integer(self.folding)),
            keys::WHITESPACE_VISIBILITY => {
                SettingValue::Choice(ChoiceValue::Integer(self.whitespace_visibility))
            }
            keys::WRAP_MODE => SettingValue::Choice(ChoiceValue::Integer(self.wrap_mode)),
            keys::LANGUAGE => SettingValue::Choice(ChoiceValue::Name(self.language.clone())),
            other if keys::WRITE_ONLY_COLORS.contains(&other) => {
                return Err(TargetError::WriteOnly(other.to_string()))
            }
            other => return Err(TargetError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    fn set(&mut self, key: &str, value: SettingValue) -> Result<(), TargetError> {
        if let Some(field) = self.bool_field(key) {
            *field = value
                .as_boolean()
                .ok_or_else(|| expect_kind(key, "boolean", &value))?;
            return Ok(());
        }

        if let Some(field) = self.color_field(key) {
            *field = value
                .as_color()
                .ok_or_else(|| expect_kind(key, "color", &value))?;
            return Ok(());
        }

        if let Some((field, kind)) = self.choice_field(key) {
            let code = match value {
                SettingValue::Choice(ChoiceValue::Integer(code)) => code,
                other => return Err(expect_kind(key, "integer choice", &other)),
            };
            check_choice(key, kind, code)?;
            *field = code;
            return Ok(());
        }

        match key {
            keys::TAB_WIDTH => {
                let width = value
                    .as_number()
                    .ok_or_else(|| expect_kind(key, "number", &value))?;
                check_tab_width(width)?;
                self.tab_width = width;
            }
            keys::EDGE_COLUMN => {
                let column = value
                    .as_number()
                    .ok_or_else(|| expect_kind(key, "number", &value))?;
                check_edge_column(column)?;
                self.edge_column = column;
            }
            keys::LANGUAGE => {
                let name = match value {
                    SettingValue::Choice(ChoiceValue::Name(name)) => name,
                    other => return Err(expect_kind(key, "language name", &other)),
                };
                check_language(&name)?;
                tracing::debug!(language = %name, "editor language changed");
                self.language = name;
            }
            other if keys::WRITE_ONLY_COLORS.contains(&other) => {
                let color = value
                    .as_color()
                    .ok_or_else(|| expect_kind(key, "color", &value))?;
                self.write_only.insert(other.to_string(), color);
            }
            other => return Err(TargetError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}
