//! Setting keys, value kinds and typed values

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Setting key (the target's property name)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingKey(String);

impl SettingKey {
    /// Creates a new setting key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SettingKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for SettingKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::borrow::Borrow<str> for SettingKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Datatype category of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Boolean,
    Number,
    Color,
    Enumerated,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::Color => "color",
            ValueKind::Enumerated => "enumerated",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional, hex digits are case-insensitive)
    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text.trim().strip_prefix('#').unwrap_or(text.trim());
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lower-case `#rrggbb` form
    pub fn name(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s).ok_or_else(|| format!("not a #rrggbb color: {}", s))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Underlying value of one enumerated choice
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    /// Integer constant (e.g. a wrap mode code)
    Integer(i64),
    /// Symbolic name (e.g. a language)
    Name(String),
}

impl ChoiceValue {
    pub fn name(name: impl Into<String>) -> Self {
        ChoiceValue::Name(name.into())
    }
}

impl fmt::Display for ChoiceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceValue::Integer(v) => write!(f, "{}", v),
            ChoiceValue::Name(v) => write!(f, "{}", v),
        }
    }
}

/// Setting value (strongly typed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Number(i64),
    /// RGB color
    Color(Color),
    /// One entry of an enumerated domain
    Choice(ChoiceValue),
}

impl SettingValue {
    /// Kind this value is compatible with
    pub fn kind(&self) -> ValueKind {
        match self {
            SettingValue::Boolean(_) => ValueKind::Boolean,
            SettingValue::Number(_) => ValueKind::Number,
            SettingValue::Color(_) => ValueKind::Color,
            SettingValue::Choice(_) => ValueKind::Enumerated,
        }
    }

    /// Tries to get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as number
    pub fn as_number(&self) -> Option<i64> {
        match self {
            SettingValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as color
    pub fn as_color(&self) -> Option<Color> {
        match self {
            SettingValue::Color(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as enumerated choice
    pub fn as_choice(&self) -> Option<&ChoiceValue> {
        match self {
            SettingValue::Choice(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(v) => write!(f, "{}", v),
            SettingValue::Number(v) => write!(f, "{}", v),
            SettingValue::Color(v) => write!(f, "{}", v),
            SettingValue::Choice(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Boolean(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Number(v)
    }
}

impl From<Color> for SettingValue {
    fn from(v: Color) -> Self {
        SettingValue::Color(v)
    }
}

impl From<ChoiceValue> for SettingValue {
    fn from(v: ChoiceValue) -> Self {
        SettingValue::Choice(v)
    }
}
