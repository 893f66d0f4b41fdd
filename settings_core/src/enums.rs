//! Enumerated value registry
//!
//! Maps an enum kind name to its ordered `(value, label)` choices. Order is
//! significant: it is the on-screen order and the first entry is the fallback
//! when a target has no value.

use crate::error::{IntegrityError, Result, SettingsError};
use crate::value::ChoiceValue;
use std::collections::BTreeMap;

/// One selectable entry of an enumerated domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumChoice {
    pub value: ChoiceValue,
    pub label: String,
}

/// Named, ordered list of valid choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    name: String,
    choices: Vec<EnumChoice>,
}

impl EnumDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            choices: Vec::new(),
        }
    }

    /// Appends a choice (builder style)
    pub fn choice(mut self, value: ChoiceValue, label: impl Into<String>) -> Self {
        self.choices.push(EnumChoice {
            value,
            label: label.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn choices(&self) -> &[EnumChoice] {
        &self.choices
    }

    /// First choice, used as the default selection
    pub fn first(&self) -> Option<&EnumChoice> {
        self.choices.first()
    }

    /// Index of `value` in display order
    pub fn position(&self, value: &ChoiceValue) -> Option<usize> {
        self.choices.iter().position(|c| &c.value == value)
    }

    pub fn contains(&self, value: &ChoiceValue) -> bool {
        self.position(value).is_some()
    }

    pub fn label_for(&self, value: &ChoiceValue) -> Option<&str> {
        self.choices
            .iter()
            .find(|c| &c.value == value)
            .map(|c| c.label.as_str())
    }

    /// Looks a choice up by its display label (case-insensitive)
    pub fn value_for_label(&self, label: &str) -> Option<&ChoiceValue> {
        self.choices
            .iter()
            .find(|c| c.label.eq_ignore_ascii_case(label))
            .map(|c| &c.value)
    }

    fn validate(&self) -> core::result::Result<(), IntegrityError> {
        if self.choices.is_empty() {
            return Err(IntegrityError::EmptyEnum(self.name.clone()));
        }
        for (i, choice) in self.choices.iter().enumerate() {
            if self.choices[..i].iter().any(|c| c.value == choice.value) {
                return Err(IntegrityError::DuplicateChoice {
                    enum_name: self.name.clone(),
                    value: choice.value.to_string(),
                });
            }
            // labels are matched case-insensitively on import
            if self.choices[..i]
                .iter()
                .any(|c| c.label.eq_ignore_ascii_case(&choice.label))
            {
                return Err(IntegrityError::DuplicateLabel {
                    enum_name: self.name.clone(),
                    label: choice.label.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Immutable registry of enumerated domains
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumRegistry {
    enums: BTreeMap<String, EnumDescriptor>,
}

impl EnumRegistry {
    /// Builds a registry, rejecting empty or duplicate domains and repeated values
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = EnumDescriptor>,
    ) -> core::result::Result<Self, IntegrityError> {
        let mut enums = BTreeMap::new();
        for descriptor in descriptors {
            descriptor.validate()?;
            if enums.contains_key(descriptor.name()) {
                return Err(IntegrityError::DuplicateEnum(descriptor.name.clone()));
            }
            enums.insert(descriptor.name.clone(), descriptor);
        }
        Ok(Self { enums })
    }

    /// Ordered choices for an enum kind
    pub fn lookup(&self, kind: &str) -> Result<&EnumDescriptor> {
        self.enums
            .get(kind)
            .ok_or_else(|| SettingsError::UnknownEnumKind(kind.to_string()))
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.enums.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnumDescriptor> {
        self.enums.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_mode() -> EnumDescriptor {
        EnumDescriptor::new("WrapMode")
            .choice(ChoiceValue::Integer(0), "None")
            .choice(ChoiceValue::Integer(1), "Word")
            .choice(ChoiceValue::Integer(2), "Character")
    }

    #[test]
    fn test_lookup_preserves_order() {
        let registry = EnumRegistry::from_descriptors([wrap_mode()]).unwrap();
        let descriptor = registry.lookup("WrapMode").unwrap();

        let labels: Vec<&str> = descriptor.choices().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["None", "Word", "Character"]);
        assert_eq!(descriptor.first().unwrap().value, ChoiceValue::Integer(0));
    }

    #[test]
    fn test_lookup_unknown_kind() {
        let registry = EnumRegistry::from_descriptors([wrap_mode()]).unwrap();
        assert_eq!(
            registry.lookup("FoldStyle"),
            Err(SettingsError::UnknownEnumKind("FoldStyle".to_string()))
        );
    }

    #[test]
    fn test_label_and_position() {
        let descriptor = wrap_mode();
        assert_eq!(descriptor.label_for(&ChoiceValue::Integer(1)), Some("Word"));
        assert_eq!(descriptor.position(&ChoiceValue::Integer(2)), Some(2));
        assert_eq!(descriptor.position(&ChoiceValue::Integer(9)), None);
        assert_eq!(
            descriptor.value_for_label("character"),
            Some(&ChoiceValue::Integer(2))
        );
        assert!(!descriptor.contains(&ChoiceValue::name("Word")));
    }

    #[test]
    fn test_empty_enum_rejected() {
        let result = EnumRegistry::from_descriptors([EnumDescriptor::new("Empty")]);
        assert_eq!(result, Err(IntegrityError::EmptyEnum("Empty".to_string())));
    }

    #[test]
    fn test_duplicate_value_rejected() {
        let descriptor = EnumDescriptor::new("EolMode")
            .choice(ChoiceValue::Integer(0), "Windows")
            .choice(ChoiceValue::Integer(0), "Unix");
        let result = EnumRegistry::from_descriptors([descriptor]);
        assert!(matches!(result, Err(IntegrityError::DuplicateChoice { .. })));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let descriptor = EnumDescriptor::new("Mode")
            .choice(ChoiceValue::Integer(0), "Word")
            .choice(ChoiceValue::Integer(1), "word");
        assert_eq!(
            EnumRegistry::from_descriptors([descriptor]),
            Err(IntegrityError::DuplicateLabel {
                enum_name: "Mode".to_string(),
                label: "word".to_string(),
            })
        );
    }

    #[test]
    fn test_duplicate_enum_rejected() {
        let result = EnumRegistry::from_descriptors([wrap_mode(), wrap_mode()]);
        assert_eq!(
            result,
            Err(IntegrityError::DuplicateEnum("WrapMode".to_string()))
        );
    }
}
