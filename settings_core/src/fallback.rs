//! Per-kind fallback values
//!
//! Used by a session when the target has no value for a declared key.
//! Enumerated keys always fall back to the first registry entry, so they
//! are not configurable here.

use crate::value::Color;
use serde::{Deserialize, Serialize};

/// Fallback constants per value kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackDefaults {
    pub boolean: bool,
    pub number: i64,
    pub color: Color,
}

impl FallbackDefaults {
    /// Loads fallbacks from JSON; missing fields keep their defaults
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl Default for FallbackDefaults {
    fn default() -> Self {
        Self {
            boolean: false,
            number: 0,
            color: Color::RED,
        }
    }
}
