//! Named settings documents
//!
//! A named document stores settings as plain JSON with enumerated values
//! written by their display label, so the file stays readable and survives
//! renumbering of the underlying constants.

use crate::error::SettingsError;
use crate::schema::SettingSchema;
use crate::value::{ChoiceValue, Color, SettingKey, SettingValue, ValueKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Serializable settings document
/// Uses BTreeMap for stable ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSettingsData {
    /// Version of the document format (for future migrations)
    pub version: u32,
    /// Setting key to JSON value
    pub settings: BTreeMap<String, Value>,
}

impl NamedSettingsData {
    /// Current version of the document format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            settings: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

impl Default for NamedSettingsData {
    fn default() -> Self {
        Self::new()
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur while reading or writing named documents
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PersistenceError {
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize settings: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid value for {key}: {value}")]
    InvalidEntry { key: String, value: Value },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Converts typed values into a named document
pub fn export_named<'v>(
    schema: &SettingSchema,
    values: impl IntoIterator<Item = (&'v SettingKey, &'v SettingValue)>,
) -> PersistenceResult<NamedSettingsData> {
    let mut data = NamedSettingsData::new();
    for (key, value) in values {
        schema.describe(key.as_str())?;
        let json = match value {
            SettingValue::Boolean(v) => Value::Bool(*v),
            SettingValue::Number(v) => Value::from(*v),
            SettingValue::Color(v) => Value::String(v.name()),
            SettingValue::Choice(choice) => match schema.choices(key.as_str())? {
                Some(choices) => match choices.label_for(choice) {
                    Some(label) => Value::String(label.to_string()),
                    None => raw_choice(choice),
                },
                None => raw_choice(choice),
            },
        };
        data.settings.insert(key.as_str().to_string(), json);
    }
    Ok(data)
}

fn raw_choice(choice: &ChoiceValue) -> Value {
    match choice {
        ChoiceValue::Integer(v) => Value::from(*v),
        ChoiceValue::Name(v) => Value::String(v.clone()),
    }
}

/// Resolves a named document into typed values
///
/// Every key must be declared and every value must fit its kind.
pub fn import_named(
    schema: &SettingSchema,
    data: &NamedSettingsData,
) -> PersistenceResult<BTreeMap<SettingKey, SettingValue>> {
    let mut values = BTreeMap::new();
    for (key, json) in &data.settings {
        let descriptor = schema.describe(key)?;
        let invalid = || PersistenceError::InvalidEntry {
            key: key.clone(),
            value: json.clone(),
        };

        let value = match descriptor.kind() {
            ValueKind::Boolean => SettingValue::Boolean(json.as_bool().ok_or_else(invalid)?),
            ValueKind::Number => SettingValue::Number(json.as_i64().ok_or_else(invalid)?),
            ValueKind::Color => {
                let text = json.as_str().ok_or_else(invalid)?;
                SettingValue::Color(Color::from_hex(text).ok_or_else(invalid)?)
            }
            ValueKind::Enumerated => {
                let choices = schema
                    .choices(key)?
                    .ok_or_else(|| SettingsError::UnknownEnumKind(key.clone()))?;
                let choice = match json {
                    Value::String(text) => choices
                        .value_for_label(text)
                        .cloned()
                        .unwrap_or_else(|| ChoiceValue::name(text.as_str())),
                    Value::Number(n) => ChoiceValue::Integer(n.as_i64().ok_or_else(invalid)?),
                    _ => return Err(invalid()),
                };
                if !choices.contains(&choice) {
                    return Err(invalid());
                }
                SettingValue::Choice(choice)
            }
        };
        values.insert(descriptor.key().clone(), value);
    }
    Ok(values)
}

/// Serializes a named document to JSON bytes
pub fn serialize_named(data: &NamedSettingsData) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec_pretty(data).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
}

/// Deserializes a named document from JSON bytes
pub fn deserialize_named(bytes: &[u8]) -> PersistenceResult<NamedSettingsData> {
    let data: NamedSettingsData = serde_json::from_slice(bytes)
        .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

    // Check version compatibility
    if data.version != NamedSettingsData::CURRENT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(data.version));
    }

    Ok(data)
}

/// Attempts to load a document from bytes, falling back to an empty one on error
pub fn load_named_safe(bytes: &[u8]) -> NamedSettingsData {
    match deserialize_named(bytes) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable settings document");
            NamedSettingsData::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::EnumDescriptor;
    use crate::schema::SettingDescriptor;

    fn schema() -> SettingSchema {
        SettingSchema::builder()
            .enum_descriptor(
                EnumDescriptor::new("FoldStyle")
                    .choice(ChoiceValue::Integer(0), "None")
                    .choice(ChoiceValue::Integer(1), "Plain")
                    .choice(ChoiceValue::Integer(3), "Boxed"),
            )
            .enum_descriptor(
                EnumDescriptor::new("Language")
                    .choice(ChoiceValue::name("None"), "Plain text")
                    .choice(ChoiceValue::name("Python"), "Python"),
            )
            .setting(SettingDescriptor::number("tabWidth", "Tab width"))
            .setting(SettingDescriptor::boolean("autoIndent", "Auto-indent"))
            .setting(SettingDescriptor::color("paper", "Paper color"))
            .setting(SettingDescriptor::enumerated("folding", "FoldStyle", "Folding"))
            .setting(SettingDescriptor::enumerated("language", "Language", "Language"))
            .build()
            .unwrap()
    }

    fn values() -> BTreeMap<SettingKey, SettingValue> {
        let mut values = BTreeMap::new();
        values.insert(SettingKey::new("tabWidth"), SettingValue::Number(2));
        values.insert(SettingKey::new("autoIndent"), SettingValue::Boolean(true));
        values.insert(SettingKey::new("paper"), SettingValue::Color(Color::WHITE));
        values.insert(
            SettingKey::new("folding"),
            SettingValue::Choice(ChoiceValue::Integer(3)),
        );
        values
    }

    #[test]
    fn test_named_data_creation() {
        let data = NamedSettingsData::new();
        assert_eq!(data.version, NamedSettingsData::CURRENT_VERSION);
        assert!(data.is_empty());
    }

    #[test]
    fn test_export_writes_enum_labels() {
        let schema = schema();
        let data = export_named(&schema, &values()).unwrap();

        assert_eq!(data.len(), 4);
        assert_eq!(data.settings["folding"], Value::String("Boxed".to_string()));
        assert_eq!(data.settings["paper"], Value::String("#ffffff".to_string()));
        assert_eq!(data.settings["tabWidth"], Value::from(2));
        assert_eq!(data.settings["autoIndent"], Value::Bool(true));
    }

    #[test]
    fn test_import_restores_typed_values() {
        let schema = schema();
        let data = export_named(&schema, &values()).unwrap();
        let imported = import_named(&schema, &data).unwrap();
        assert_eq!(imported, values());
    }

    #[test]
    fn test_import_accepts_raw_choice_values() {
        let schema = schema();
        let mut data = NamedSettingsData::new();
        data.settings.insert("folding".to_string(), Value::from(1));
        data.settings
            .insert("language".to_string(), Value::String("Python".to_string()));

        let imported = import_named(&schema, &data).unwrap();
        assert_eq!(
            imported[&SettingKey::new("folding")],
            SettingValue::Choice(ChoiceValue::Integer(1))
        );
        assert_eq!(
            imported[&SettingKey::new("language")],
            SettingValue::Choice(ChoiceValue::name("Python"))
        );
    }

    #[test]
    fn test_import_rejects_unknown_key() {
        let schema = schema();
        let mut data = NamedSettingsData::new();
        data.settings.insert("caretWidth".to_string(), Value::from(2));

        let result = import_named(&schema, &data);
        assert!(matches!(
            result,
            Err(PersistenceError::Settings(SettingsError::UnknownSettingKey(_)))
        ));
    }

    #[test]
    fn test_import_rejects_wrong_shape() {
        let schema = schema();
        for (key, value) in [
            ("tabWidth", Value::String("4".to_string())),
            ("autoIndent", Value::from(1)),
            ("paper", Value::String("white".to_string())),
            ("folding", Value::String("Circled".to_string())),
            ("folding", Value::from(2)),
        ] {
            let mut data = NamedSettingsData::new();
            data.settings.insert(key.to_string(), value);
            assert!(
                matches!(import_named(&schema, &data), Err(PersistenceError::InvalidEntry { .. })),
                "{} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_serialize_deserialize() {
        let schema = schema();
        let data = export_named(&schema, &values()).unwrap();

        let bytes = serialize_named(&data).unwrap();
        let deserialized = deserialize_named(&bytes).unwrap();

        assert_eq!(data, deserialized);
    }

    #[test]
    fn test_stable_key_ordering_in_json() {
        let schema = schema();
        let bytes = serialize_named(&export_named(&schema, &values()).unwrap()).unwrap();
        let json_str = core::str::from_utf8(&bytes).unwrap();

        let a_pos = json_str.find("autoIndent").unwrap();
        let f_pos = json_str.find("folding").unwrap();
        let t_pos = json_str.find("tabWidth").unwrap();

        assert!(a_pos < f_pos);
        assert!(f_pos < t_pos);
    }

    #[test]
    fn test_deserialize_invalid_json() {
        let result = deserialize_named(b"{ invalid json }");
        assert!(matches!(result, Err(PersistenceError::DeserializationFailed(_))));
    }

    #[test]
    fn test_deserialize_unsupported_version() {
        let json = r#"{
            "version": 999,
            "settings": {}
        }"#;
        let result = deserialize_named(json.as_bytes());
        assert_eq!(result, Err(PersistenceError::UnsupportedVersion(999)));
    }

    #[test]
    fn test_load_named_safe_with_invalid_data() {
        let loaded = load_named_safe(b"{ invalid json }");
        assert_eq!(loaded, NamedSettingsData::new());
    }
}
