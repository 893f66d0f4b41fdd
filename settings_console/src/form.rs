//! Text form rendering
//!
//! Turns a session into rows of form controls, grouped the way the schema
//! groups them, and draws them as plain text.

use settings_core::{
    Color, ConfigTarget, SettingKey, SettingValue, SettingsError, SettingsSession, ValueKind,
};
use std::fmt::Write as _;

/// Control shown for one setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Checkbox(bool),
    SpinBox(i64),
    ColorSwatch(Color),
    ComboBox {
        options: Vec<String>,
        /// `None` when the value is not one of the options
        selected: Option<usize>,
    },
    /// Value whose kind disagrees with the declaration
    Raw(String),
}

/// One labelled control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub key: SettingKey,
    pub label: String,
    pub help: Option<String>,
    pub control: Control,
    /// Staged and different from the current value
    pub modified: bool,
}

/// Labelled block of rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormGroup {
    pub label: String,
    pub rows: Vec<FormRow>,
}

/// Builds one row per grouped key, showing staged values where present
pub fn build_form<T: ConfigTarget + ?Sized>(
    session: &SettingsSession<'_, T>,
) -> Result<Vec<FormGroup>, SettingsError> {
    let schema = session.schema();
    schema
        .groups()
        .iter()
        .map(|group| -> Result<FormGroup, SettingsError> {
            let rows = group
                .keys()
                .iter()
                .map(|key| build_row(session, key))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FormGroup {
                label: group.label().to_string(),
                rows,
            })
        })
        .collect()
}

fn build_row<T: ConfigTarget + ?Sized>(
    session: &SettingsSession<'_, T>,
    key: &SettingKey,
) -> Result<FormRow, SettingsError> {
    let schema = session.schema();
    let descriptor = schema.describe(key.as_str())?;
    let value = session.effective_value(key.as_str())?;

    let control = match (descriptor.kind(), &value) {
        (ValueKind::Boolean, SettingValue::Boolean(v)) => Control::Checkbox(*v),
        (ValueKind::Number, SettingValue::Number(v)) => Control::SpinBox(*v),
        (ValueKind::Color, SettingValue::Color(v)) => Control::ColorSwatch(*v),
        (ValueKind::Enumerated, SettingValue::Choice(choice)) => {
            match schema.choices(key.as_str())? {
                Some(choices) => Control::ComboBox {
                    options: choices.choices().iter().map(|c| c.label.clone()).collect(),
                    selected: choices.position(choice),
                },
                None => Control::Raw(value.to_string()),
            }
        }
        _ => Control::Raw(value.to_string()),
    };

    Ok(FormRow {
        key: key.clone(),
        label: descriptor.label().to_string(),
        help: descriptor.help().map(str::to_string),
        control,
        modified: session.is_modified(key.as_str()),
    })
}

/// Draws the form as text, one group per block
pub fn render_form(groups: &[FormGroup], with_help: bool) -> String {
    let width = groups
        .iter()
        .flat_map(|g| g.rows.iter())
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "[{}]", group.label);
        for row in &group.rows {
            let marker = if row.modified { '*' } else { ' ' };
            let _ = writeln!(
                out,
                " {} {:<width$}  {}",
                marker,
                row.label,
                render_control(&row.control),
                width = width
            );
            if with_help {
                if let Some(help) = &row.help {
                    let _ = writeln!(out, "   {:<width$}  ({})", "", help, width = width);
                }
            }
        }
        out.push('\n');
    }
    out
}

fn render_control(control: &Control) -> String {
    match control {
        Control::Checkbox(true) => "[x]".to_string(),
        Control::Checkbox(false) => "[ ]".to_string(),
        Control::SpinBox(v) => format!("[{:>5}]", v),
        Control::ColorSwatch(c) => format!("[{}]", c),
        Control::ComboBox { options, selected } => {
            let current = selected
                .and_then(|i| options.get(i))
                .map(String::as_str)
                .unwrap_or("?");
            format!("<{}>", current)
        }
        Control::Raw(text) => format!("{{{}}}", text),
    }
}
