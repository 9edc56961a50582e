//! Normalized template types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A scrubbed template value.
///
/// Controller JSON stores nearly everything as text; cleaning interprets the
/// text as a boolean, an integer or a float before falling back to a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CleanValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl CleanValue {
    /// The string payload, if this value stayed textual
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// True only for the empty string
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Str(s) if s.is_empty())
    }
}

impl fmt::Display for CleanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<CleanValue> for JsonValue {
    fn from(value: CleanValue) -> Self {
        match value {
            CleanValue::Bool(b) => JsonValue::Bool(b),
            CleanValue::Int(i) => JsonValue::from(i),
            CleanValue::Float(x) => JsonValue::from(x),
            CleanValue::Str(s) => JsonValue::String(s),
        }
    }
}

/// One element of an enumeration (`Enum`, `validValues`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Int(i64),
    Str(String),
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Choice {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for Choice {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

/// Read-only, documentation-ready view of one parameter descriptor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedParameter {
    /// Parameter name as the controller knows it
    pub name: String,
    /// Ansible type (bool, str, int, list) or the untranslated vendor type
    #[serde(rename = "type")]
    pub parameter_type: Option<String>,
    pub description: String,
    pub required: bool,
    pub mandatory: bool,
    pub default: Option<CleanValue>,
    pub choices: Vec<Choice>,
    pub valid_values: Vec<Choice>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// GUI label (`annotations.DisplayName`)
    pub display_name: Option<String>,
    /// GUI section (`annotations.Section`)
    pub section: Option<String>,
    pub hidden: bool,
    pub internal: bool,
    /// Raw visibility rule (`annotations.IsShow`)
    pub is_show: Option<String>,
}
