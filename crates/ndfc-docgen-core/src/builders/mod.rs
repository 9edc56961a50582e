//! Suboption builder traits and adapters for each documentation style.
pub mod detailed;
pub mod fabric;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::documentation::Suboption;
use crate::template::normalize;
use crate::template::NormalizedParameter;

/// Known misspellings in controller parameter names
const TYPO_KEYS: &[(&str, &str)] = &[
    (
        "DEAFULT_QUEUING_POLICY_CLOUDSCALE",
        "DEFAULT_QUEUING_POLICY_CLOUDSCALE",
    ),
    ("DEAFULT_QUEUING_POLICY_OTHER", "DEFAULT_QUEUING_POLICY_OTHER"),
    (
        "DEAFULT_QUEUING_POLICY_R_SERIES",
        "DEFAULT_QUEUING_POLICY_R_SERIES",
    ),
];

/// Corrected spelling of a controller parameter name, if it is a known typo
pub fn fix_vendor_typo(name: &str) -> Option<&'static str> {
    TYPO_KEYS
        .iter()
        .find(|(typo, _)| *typo == name)
        .map(|(_, fixed)| *fixed)
}

/// How suboptions are named and which fields they carry
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DocStyle {
    /// Controller names (typos fixed); description, type, required, default, choices
    #[default]
    Fabric,
    /// snake_case names plus bounds, valid values and GUI placement
    Detailed,
}

impl DocStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fabric => "fabric",
            Self::Detailed => "detailed",
        }
    }
}

impl fmt::Display for DocStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for converting a normalized parameter into a documentation suboption.
pub trait SuboptionBuilder {
    /// Playbook option name for a controller parameter name
    fn option_name(&self, name: &str) -> String;

    fn build(&self, param: &NormalizedParameter) -> Suboption;
}

pub struct SuboptionContext;

impl SuboptionContext {
    pub fn get_builder(style: DocStyle) -> Box<dyn SuboptionBuilder> {
        match style {
            DocStyle::Fabric => Box::new(fabric::FabricSuboptionBuilder),
            DocStyle::Detailed => Box::new(detailed::DetailedSuboptionBuilder),
        }
    }
}

/// True for descriptors that end up in the documentation
pub fn is_documented(item: &JsonValue) -> bool {
    !normalize::is_internal(item)
        && !normalize::is_hidden(item)
        && normalize::get_name(item).is_some()
}

/// Map every documented controller parameter name to its playbook name.
pub fn build_translation(
    parameters: &[JsonValue],
    builder: &dyn SuboptionBuilder,
) -> HashMap<String, String> {
    parameters
        .iter()
        .filter(|item| is_documented(item))
        .filter_map(normalize::get_name)
        .map(|name| {
            let option = builder.option_name(&name);
            (name, option)
        })
        .collect()
}
