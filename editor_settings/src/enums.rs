//! Enumerated domains of the editor
//!
//! Integer domains use the editor widget's own constants; order is the
//! on-screen order, and the first entry is what a form shows when the
//! editor reports nothing.

use settings_core::{ChoiceValue, EnumDescriptor};

pub const BRACE_MATCH: &str = "BraceMatch";
pub const EDGE_MODE: &str = "EdgeMode";
pub const EOL_MODE: &str = "EolMode";
pub const FOLD_STYLE: &str = "FoldStyle";
pub const WHITESPACE_VISIBILITY: &str = "WhitespaceVisibility";
pub const WRAP_MODE: &str = "WrapMode";
pub const LANGUAGE: &str = "Language";

pub const BRACE_MATCH_CHOICES: &[(i64, &str)] = &[(0, "None"), (1, "Strict"), (2, "Sloppy")];

pub const EDGE_MODE_CHOICES: &[(i64, &str)] = &[
    (0, "None"),
    (1, "Line"),
    (2, "Background"),
    (3, "Multiple lines"),
];

pub const EOL_MODE_CHOICES: &[(i64, &str)] = &[
    (0, "Windows (CR LF)"),
    (2, "Unix (LF)"),
    (1, "Mac (CR)"),
];

pub const FOLD_STYLE_CHOICES: &[(i64, &str)] = &[
    (0, "None"),
    (1, "Plain"),
    (2, "Circled"),
    (3, "Boxed"),
    (4, "Circled tree"),
    (5, "Boxed tree"),
];

pub const WHITESPACE_VISIBILITY_CHOICES: &[(i64, &str)] = &[
    (0, "Invisible"),
    (1, "Visible"),
    (2, "Visible after indent"),
    (3, "Visible only in indent"),
];

pub const WRAP_MODE_CHOICES: &[(i64, &str)] = &[
    (0, "None"),
    (1, "Word"),
    (2, "Character"),
    (3, "Whitespace"),
];

/// Highlighting languages: `(lexer name, label)`
pub const LANGUAGE_CHOICES: &[(&str, &str)] = &[
    ("None", "Plain text"),
    ("Bash", "Bash"),
    ("Batch", "Batch"),
    ("CMake", "CMake"),
    ("CPP", "C/C++"),
    ("CSharp", "C#"),
    ("CSS", "CSS"),
    ("Diff", "Diff"),
    ("HTML", "HTML"),
    ("Java", "Java"),
    ("JavaScript", "JavaScript"),
    ("JSON", "JSON"),
    ("Lua", "Lua"),
    ("Makefile", "Makefile"),
    ("Markdown", "Markdown"),
    ("Matlab", "Matlab"),
    ("Pascal", "Pascal"),
    ("Perl", "Perl"),
    ("Python", "Python"),
    ("Ruby", "Ruby"),
    ("SQL", "SQL"),
    ("TeX", "TeX"),
    ("XML", "XML"),
    ("YAML", "YAML"),
];

/// Integer table for an enum kind, if it has one
pub fn integer_choices(kind: &str) -> Option<&'static [(i64, &'static str)]> {
    match kind {
        BRACE_MATCH => Some(BRACE_MATCH_CHOICES),
        EDGE_MODE => Some(EDGE_MODE_CHOICES),
        EOL_MODE => Some(EOL_MODE_CHOICES),
        FOLD_STYLE => Some(FOLD_STYLE_CHOICES),
        WHITESPACE_VISIBILITY => Some(WHITESPACE_VISIBILITY_CHOICES),
        WRAP_MODE => Some(WRAP_MODE_CHOICES),
        _ => None,
    }
}

fn integer_descriptor(kind: &str, table: &[(i64, &str)]) -> EnumDescriptor {
    table
        .iter()
        .fold(EnumDescriptor::new(kind), |descriptor, &(value, label)| {
            descriptor.choice(ChoiceValue::Integer(value), label)
        })
}

/// All editor enum domains
pub fn descriptors() -> Vec<EnumDescriptor> {
    let mut descriptors: Vec<EnumDescriptor> = [
        BRACE_MATCH,
        EDGE_MODE,
        EOL_MODE,
        FOLD_STYLE,
        WHITESPACE_VISIBILITY,
        WRAP_MODE,
    ]
    .iter()
    .filter_map(|&kind| integer_choices(kind).map(|table| integer_descriptor(kind, table)))
    .collect();

    descriptors.push(
        LANGUAGE_CHOICES
            .iter()
            .fold(EnumDescriptor::new(LANGUAGE), |descriptor, &(name, label)| {
                descriptor.choice(ChoiceValue::name(name), label)
            }),
    );
    descriptors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_count() {
        assert_eq!(descriptors().len(), 7);
    }

    #[test]
    fn test_eol_mode_order_is_display_order() {
        let eol = descriptors()
            .into_iter()
            .find(|d| d.name() == EOL_MODE)
            .unwrap();
        let values: Vec<ChoiceValue> = eol.choices().iter().map(|c| c.value.clone()).collect();
        assert_eq!(
            values,
            [
                ChoiceValue::Integer(0),
                ChoiceValue::Integer(2),
                ChoiceValue::Integer(1)
            ]
        );
    }

    #[test]
    fn test_language_first_entry_is_plain_text() {
        let language = descriptors()
            .into_iter()
            .find(|d| d.name() == LANGUAGE)
            .unwrap();
        let first = language.first().unwrap();
        assert_eq!(first.value, ChoiceValue::name("None"));
        assert_eq!(first.label, "Plain text");
    }

    #[test]
    fn test_integer_choices_lookup() {
        assert_eq!(integer_choices(WRAP_MODE).unwrap().len(), 4);
        assert!(integer_choices(LANGUAGE).is_none());
    }
}
