//! Setting schema
//!
//! The schema is declared once from a literal table through
//! [`SchemaBuilder`] and is immutable afterwards. `build` checks every
//! cross-reference (enum kinds, group keys) and refuses to produce a schema
//! that violates them.

use crate::enums::{EnumDescriptor, EnumRegistry};
use crate::error::{IntegrityError, Result, SettingsError};
use crate::fallback::FallbackDefaults;
use crate::groups::SettingGroup;
use crate::session::SettingsSession;
use crate::target::ConfigTarget;
use crate::value::{ChoiceValue, Color, SettingKey, SettingValue, ValueKind};
use std::collections::BTreeMap;

/// Declaration of one configurable key
///
/// `enum_kind` is present exactly when `kind` is [`ValueKind::Enumerated`];
/// the constructors are the only way to build a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDescriptor {
    key: SettingKey,
    kind: ValueKind,
    label: String,
    help: Option<String>,
    enum_kind: Option<String>,
}

impl SettingDescriptor {
    fn with_kind(key: impl Into<SettingKey>, kind: ValueKind, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            label: label.into(),
            help: None,
            enum_kind: None,
        }
    }

    pub fn boolean(key: impl Into<SettingKey>, label: impl Into<String>) -> Self {
        Self::with_kind(key, ValueKind::Boolean, label)
    }

    pub fn number(key: impl Into<SettingKey>, label: impl Into<String>) -> Self {
        Self::with_kind(key, ValueKind::Number, label)
    }

    pub fn color(key: impl Into<SettingKey>, label: impl Into<String>) -> Self {
        Self::with_kind(key, ValueKind::Color, label)
    }

    /// Choice-type setting whose valid values come from `enum_kind`
    pub fn enumerated(
        key: impl Into<SettingKey>,
        enum_kind: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        let mut descriptor = Self::with_kind(key, ValueKind::Enumerated, label);
        descriptor.enum_kind = Some(enum_kind.into());
        descriptor
    }

    /// Tooltip / help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn key(&self) -> &SettingKey {
        &self.key
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn enum_kind(&self) -> Option<&str> {
        self.enum_kind.as_deref()
    }
}

/// Collects the literal schema table and validates it
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    settings: Vec<SettingDescriptor>,
    enums: Vec<EnumDescriptor>,
    groups: Vec<SettingGroup>,
    fallback: FallbackDefaults,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn setting(mut self, descriptor: SettingDescriptor) -> Self {
        self.settings.push(descriptor);
        self
    }

    pub fn enum_descriptor(mut self, descriptor: EnumDescriptor) -> Self {
        self.enums.push(descriptor);
        self
    }

    pub fn group(mut self, group: SettingGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn fallback(mut self, fallback: FallbackDefaults) -> Self {
        self.fallback = fallback;
        self
    }

    /// Validates the table and freezes it into a schema
    pub fn build(self) -> Result<SettingSchema> {
        let enums = EnumRegistry::from_descriptors(self.enums)?;

        let mut index = BTreeMap::new();
        for (position, descriptor) in self.settings.iter().enumerate() {
            if index.insert(descriptor.key.clone(), position).is_some() {
                return Err(IntegrityError::DuplicateSetting(descriptor.key.clone()).into());
            }
            if let Some(enum_name) = descriptor.enum_kind() {
                if !enums.contains(enum_name) {
                    return Err(IntegrityError::MissingEnum {
                        key: descriptor.key.clone(),
                        enum_name: enum_name.to_string(),
                    }
                    .into());
                }
            }
        }

        let mut owner: BTreeMap<&SettingKey, &str> = BTreeMap::new();
        for (i, group) in self.groups.iter().enumerate() {
            if self.groups[..i].iter().any(|g| g.id() == group.id()) {
                return Err(IntegrityError::DuplicateGroup(group.id().to_string()).into());
            }
            for (j, key) in group.keys().iter().enumerate() {
                if !index.contains_key(key) {
                    return Err(IntegrityError::UndeclaredGroupKey {
                        group: group.id().to_string(),
                        key: key.clone(),
                    }
                    .into());
                }
                if group.keys()[..j].contains(key) {
                    return Err(IntegrityError::DuplicateGroupKey {
                        group: group.id().to_string(),
                        key: key.clone(),
                    }
                    .into());
                }
                if let Some(first) = owner.insert(key, group.id()) {
                    return Err(IntegrityError::KeyInTwoGroups {
                        key: key.clone(),
                        first: first.to_string(),
                        second: group.id().to_string(),
                    }
                    .into());
                }
            }
        }

        tracing::debug!(
            settings = self.settings.len(),
            enums = enums.len(),
            groups = self.groups.len(),
            "setting schema loaded"
        );

        Ok(SettingSchema {
            settings: self.settings,
            index,
            enums,
            groups: self.groups,
            fallback: self.fallback,
        })
    }
}

/// Immutable schema: setting descriptors, enum registry and groups
#[derive(Debug, Clone, PartialEq)]
pub struct SettingSchema {
    settings: Vec<SettingDescriptor>,
    index: BTreeMap<SettingKey, usize>,
    enums: EnumRegistry,
    groups: Vec<SettingGroup>,
    fallback: FallbackDefaults,
}

impl SettingSchema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Descriptor for a declared key
    pub fn describe(&self, key: &str) -> Result<&SettingDescriptor> {
        self.index
            .get(key)
            .map(|&i| &self.settings[i])
            .ok_or_else(|| SettingsError::UnknownSettingKey(SettingKey::new(key)))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &SettingKey> {
        self.settings.iter().map(|d| &d.key)
    }

    /// Descriptors in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &SettingDescriptor> {
        self.settings.iter()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn enums(&self) -> &EnumRegistry {
        &self.enums
    }

    pub fn fallbacks(&self) -> &FallbackDefaults {
        &self.fallback
    }

    /// Groups in presentation order
    pub fn groups(&self) -> &[SettingGroup] {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&SettingGroup> {
        self.groups.iter().find(|g| g.id() == id)
    }

    /// Group presenting `key`, if any
    pub fn group_of(&self, key: &str) -> Option<&SettingGroup> {
        self.groups.iter().find(|g| g.contains(key))
    }

    /// Declared keys that no group presents
    pub fn ungrouped_keys(&self) -> impl Iterator<Item = &SettingKey> {
        self.keys()
            .filter(move |k| self.group_of(k.as_str()).is_none())
    }

    /// Enum domain of an enumerated key; `None` for other kinds
    pub fn choices(&self, key: &str) -> Result<Option<&EnumDescriptor>> {
        match self.describe(key)?.enum_kind() {
            Some(kind) => self.enums.lookup(kind).map(Some),
            None => Ok(None),
        }
    }

    /// Value shown when the target has nothing for `key`
    pub fn fallback_value(&self, key: &str) -> Result<SettingValue> {
        let descriptor = self.describe(key)?;
        let value = match descriptor.kind() {
            ValueKind::Boolean => SettingValue::Boolean(self.fallback.boolean),
            ValueKind::Number => SettingValue::Number(self.fallback.number),
            ValueKind::Color => SettingValue::Color(self.fallback.color),
            ValueKind::Enumerated => {
                let choices = self.enum_of(descriptor)?;
                match choices.first() {
                    Some(first) => SettingValue::Choice(first.value.clone()),
                    None => {
                        return Err(IntegrityError::EmptyEnum(choices.name().to_string()).into())
                    }
                }
            }
        };
        Ok(value)
    }

    /// Checks kind compatibility and, for enumerated keys, choice membership
    pub fn check_value(&self, key: &str, value: &SettingValue) -> Result<()> {
        let descriptor = self.describe(key)?;
        if value.kind() != descriptor.kind() {
            return Err(SettingsError::KindMismatch {
                key: descriptor.key.clone(),
                expected: descriptor.kind(),
                found: value.kind(),
            });
        }
        if let SettingValue::Choice(choice) = value {
            if !self.enum_of(descriptor)?.contains(choice) {
                return Err(SettingsError::InvalidChoice {
                    key: descriptor.key.clone(),
                    value: choice.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parses user text into a typed value for `key`
    ///
    /// Booleans accept `true/false`, `on/off`, `yes/no` and `1/0`. Colors
    /// take `#rrggbb`. Enumerated keys match a display label first, then an
    /// underlying value.
    pub fn parse_value(&self, key: &str, text: &str) -> Result<SettingValue> {
        let descriptor = self.describe(key)?;
        let text = text.trim();
        let invalid = |reason: String| SettingsError::InvalidValue {
            key: descriptor.key.clone(),
            reason,
        };

        match descriptor.kind() {
            ValueKind::Boolean => match text.to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(SettingValue::Boolean(true)),
                "false" | "off" | "no" | "0" => Ok(SettingValue::Boolean(false)),
                _ => Err(invalid(format!("not a boolean: {}", text))),
            },
            ValueKind::Number => text
                .parse::<i64>()
                .map(SettingValue::Number)
                .map_err(|e| invalid(format!("{}: {}", text, e))),
            ValueKind::Color => Color::from_hex(text)
                .map(SettingValue::Color)
                .ok_or_else(|| invalid(format!("not a #rrggbb color: {}", text))),
            ValueKind::Enumerated => {
                let choices = self.enum_of(descriptor)?;
                if let Some(value) = choices.value_for_label(text) {
                    return Ok(SettingValue::Choice(value.clone()));
                }
                let raw = match text.parse::<i64>() {
                    Ok(v) => ChoiceValue::Integer(v),
                    Err(_) => ChoiceValue::name(text),
                };
                if choices.contains(&raw) {
                    Ok(SettingValue::Choice(raw))
                } else {
                    Err(SettingsError::InvalidChoice {
                        key: descriptor.key.clone(),
                        value: text.to_string(),
                    })
                }
            }
        }
    }

    /// Display text for a value: choice labels for enumerated keys,
    /// canonical text otherwise
    pub fn format_value(&self, key: &str, value: &SettingValue) -> Result<String> {
        let descriptor = self.describe(key)?;
        if let (ValueKind::Enumerated, SettingValue::Choice(choice)) = (descriptor.kind(), value) {
            if let Some(label) = self.enum_of(descriptor)?.label_for(choice) {
                return Ok(label.to_string());
            }
        }
        Ok(value.to_string())
    }

    /// Opens a settings session bound to `target`
    pub fn session<'a, T: ConfigTarget + ?Sized>(
        &'a self,
        target: &'a mut T,
    ) -> SettingsSession<'a, T> {
        SettingsSession::new(self, target)
    }

    fn enum_of(&self, descriptor: &SettingDescriptor) -> Result<&EnumDescriptor> {
        let kind = descriptor
            .enum_kind()
            .ok_or_else(|| SettingsError::UnknownEnumKind(descriptor.key.to_string()))?;
        self.enums.lookup(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_mode() -> EnumDescriptor {
        EnumDescriptor::new("WrapMode")
            .choice(ChoiceValue::Integer(0), "None")
            .choice(ChoiceValue::Integer(1), "Word")
    }

    fn language() -> EnumDescriptor {
        EnumDescriptor::new("Language")
            .choice(ChoiceValue::name("Plain"), "Plain text")
            .choice(ChoiceValue::name("Python"), "Python")
    }

    fn schema() -> SettingSchema {
        SettingSchema::builder()
            .enum_descriptor(wrap_mode())
            .enum_descriptor(language())
            .setting(SettingDescriptor::number("tabWidth", "Tab width").with_help("Width of tabs"))
            .setting(SettingDescriptor::boolean("autoIndent", "Auto-indent"))
            .setting(SettingDescriptor::color("paper", "Paper color"))
            .setting(SettingDescriptor::enumerated("wrapMode", "WrapMode", "Wrap Mode"))
            .setting(SettingDescriptor::enumerated("language", "Language", "Language"))
            .setting(SettingDescriptor::boolean("marginLineNumbers", "Line numbers"))
            .group(SettingGroup::new("indent", "Indentation").items(["tabWidth", "autoIndent"]))
            .group(SettingGroup::new("misc", "Misc").items(["paper", "wrapMode", "language"]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_describe_declared_key() {
        let schema = schema();
        let descriptor = schema.describe("tabWidth").unwrap();
        assert_eq!(descriptor.kind(), ValueKind::Number);
        assert_eq!(descriptor.label(), "Tab width");
        assert_eq!(descriptor.help(), Some("Width of tabs"));
        assert_eq!(descriptor.enum_kind(), None);
    }

    #[test]
    fn test_describe_unknown_key() {
        let schema = schema();
        assert_eq!(
            schema.describe("caretWidth"),
            Err(SettingsError::UnknownSettingKey(SettingKey::new("caretWidth")))
        );
    }

    #[test]
    fn test_enumerated_iff_enum_kind() {
        let schema = schema();
        for descriptor in schema.iter() {
            assert_eq!(
                descriptor.kind() == ValueKind::Enumerated,
                descriptor.enum_kind().is_some(),
                "{}",
                descriptor.key()
            );
        }
    }

    #[test]
    fn test_keys_in_declaration_order() {
        let schema = schema();
        let keys: Vec<&str> = schema.keys().map(SettingKey::as_str).collect();
        assert_eq!(
            keys,
            ["tabWidth", "autoIndent", "paper", "wrapMode", "language", "marginLineNumbers"]
        );
    }

    #[test]
    fn test_groups_and_ungrouped() {
        let schema = schema();
        assert_eq!(schema.groups().len(), 2);
        assert_eq!(schema.groups()[0].label(), "Indentation");
        assert_eq!(schema.group_of("paper").unwrap().id(), "misc");
        assert!(schema.group("missing").is_none());

        let ungrouped: Vec<&str> = schema.ungrouped_keys().map(SettingKey::as_str).collect();
        assert_eq!(ungrouped, ["marginLineNumbers"]);
    }

    #[test]
    fn test_missing_enum_rejected() {
        let result = SettingSchema::builder()
            .setting(SettingDescriptor::enumerated("folding", "FoldStyle", "Folding"))
            .build();
        assert_eq!(
            result,
            Err(SettingsError::SchemaIntegrity(IntegrityError::MissingEnum {
                key: SettingKey::new("folding"),
                enum_name: "FoldStyle".to_string(),
            }))
        );
    }

    #[test]
    fn test_undeclared_group_key_rejected() {
        let result = SettingSchema::builder()
            .setting(SettingDescriptor::boolean("autoIndent", "Auto-indent"))
            .group(SettingGroup::new("indent", "Indentation").items(["autoIndent", "tabWidth"]))
            .build();
        assert!(matches!(
            result,
            Err(SettingsError::SchemaIntegrity(IntegrityError::UndeclaredGroupKey { .. }))
        ));
    }

    #[test]
    fn test_key_in_two_groups_rejected() {
        let result = SettingSchema::builder()
            .setting(SettingDescriptor::color("color", "Text color"))
            .group(SettingGroup::new("colors", "Colors").item("color"))
            .group(SettingGroup::new("other", "Other").item("color"))
            .build();
        assert_eq!(
            result,
            Err(SettingsError::SchemaIntegrity(IntegrityError::KeyInTwoGroups {
                key: SettingKey::new("color"),
                first: "colors".to_string(),
                second: "other".to_string(),
            }))
        );
    }

    #[test]
    fn test_key_repeated_in_one_group_rejected() {
        let result = SettingSchema::builder()
            .setting(SettingDescriptor::boolean("autoIndent", "Auto-indent"))
            .group(SettingGroup::new("indent", "Indentation").items(["autoIndent", "autoIndent"]))
            .build();
        assert_eq!(
            result,
            Err(SettingsError::SchemaIntegrity(IntegrityError::DuplicateGroupKey {
                group: "indent".to_string(),
                key: SettingKey::new("autoIndent"),
            }))
        );
    }

    #[test]
    fn test_duplicate_setting_and_group_rejected() {
        let result = SettingSchema::builder()
            .setting(SettingDescriptor::boolean("autoIndent", "Auto-indent"))
            .setting(SettingDescriptor::number("autoIndent", "Again"))
            .build();
        assert!(matches!(
            result,
            Err(SettingsError::SchemaIntegrity(IntegrityError::DuplicateSetting(_)))
        ));

        let result = SettingSchema::builder()
            .group(SettingGroup::new("colors", "Colors"))
            .group(SettingGroup::new("colors", "Colours"))
            .build();
        assert!(matches!(
            result,
            Err(SettingsError::SchemaIntegrity(IntegrityError::DuplicateGroup(_)))
        ));
    }

    #[test]
    fn test_fallback_values() {
        let schema = schema();
        assert_eq!(schema.fallback_value("autoIndent"), Ok(SettingValue::Boolean(false)));
        assert_eq!(schema.fallback_value("tabWidth"), Ok(SettingValue::Number(0)));
        assert_eq!(schema.fallback_value("paper"), Ok(SettingValue::Color(Color::RED)));
        assert_eq!(
            schema.fallback_value("wrapMode"),
            Ok(SettingValue::Choice(ChoiceValue::Integer(0)))
        );
    }

    #[test]
    fn test_configured_fallbacks() {
        let schema = SettingSchema::builder()
            .setting(SettingDescriptor::number("edgeColumn", "Text width"))
            .fallback(FallbackDefaults {
                number: 5,
                ..FallbackDefaults::default()
            })
            .build()
            .unwrap();
        assert_eq!(schema.fallback_value("edgeColumn"), Ok(SettingValue::Number(5)));
    }

    #[test]
    fn test_check_value() {
        let schema = schema();
        assert!(schema.check_value("tabWidth", &SettingValue::Number(8)).is_ok());
        assert_eq!(
            schema.check_value("tabWidth", &SettingValue::Boolean(true)),
            Err(SettingsError::KindMismatch {
                key: SettingKey::new("tabWidth"),
                expected: ValueKind::Number,
                found: ValueKind::Boolean,
            })
        );
        assert!(matches!(
            schema.check_value("wrapMode", &SettingValue::Choice(ChoiceValue::Integer(7))),
            Err(SettingsError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn test_parse_value_per_kind() {
        let schema = schema();
        assert_eq!(schema.parse_value("autoIndent", "On"), Ok(SettingValue::Boolean(true)));
        assert_eq!(schema.parse_value("autoIndent", "0"), Ok(SettingValue::Boolean(false)));
        assert_eq!(schema.parse_value("tabWidth", " 8 "), Ok(SettingValue::Number(8)));
        assert_eq!(
            schema.parse_value("paper", "#FFFFFF"),
            Ok(SettingValue::Color(Color::WHITE))
        );
        assert_eq!(
            schema.parse_value("wrapMode", "word"),
            Ok(SettingValue::Choice(ChoiceValue::Integer(1)))
        );
        assert_eq!(
            schema.parse_value("wrapMode", "1"),
            Ok(SettingValue::Choice(ChoiceValue::Integer(1)))
        );
        assert_eq!(
            schema.parse_value("language", "Python"),
            Ok(SettingValue::Choice(ChoiceValue::name("Python")))
        );
    }

    #[test]
    fn test_parse_value_errors() {
        let schema = schema();
        assert!(matches!(
            schema.parse_value("autoIndent", "maybe"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            schema.parse_value("tabWidth", "four"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            schema.parse_value("wrapMode", "Whitespace"),
            Err(SettingsError::InvalidChoice { .. })
        ));
        assert!(matches!(
            schema.parse_value("nope", "1"),
            Err(SettingsError::UnknownSettingKey(_))
        ));
    }

    #[test]
    fn test_format_value() {
        let schema = schema();
        let value = SettingValue::Choice(ChoiceValue::name("Plain"));
        assert_eq!(schema.format_value("language", &value).unwrap(), "Plain text");
        assert_eq!(
            schema.format_value("paper", &SettingValue::Color(Color::BLACK)).unwrap(),
            "#000000"
        );
    }

    #[test]
    fn test_choices_for_non_enumerated_is_none() {
        let schema = schema();
        assert!(schema.choices("tabWidth").unwrap().is_none());
        assert_eq!(schema.choices("wrapMode").unwrap().unwrap().name(), "WrapMode");
    }
}
