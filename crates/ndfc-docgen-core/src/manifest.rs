//! Manifest file format for documentation runs.
//!
//! A manifest collects the properties a documentation build needs (module
//! name, author, states) so they don't have to be repeated on the command
//! line. Both YAML and TOML are accepted; the format is picked from the file
//! extension.
//!
//! ```yaml
//! module_name: dcnm_fabric
//! module_author: Cisco Systems, Inc.
//! module_states: [deleted, merged, query, replaced]
//! module_default_state: merged
//! template: Easy_Fabric
//! ```

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_value::Value as SerdeValue;
use tokio::fs;

use crate::builders::DocStyle;

/// Properties for a documentation build.
///
/// Every property is optional here. Whatever is still unset when the
/// documentation is committed is reported as a usage error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocManifest {
    /// The name of the Ansible module, e.g. `dcnm_fabric`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,

    /// The author of the module, e.g. `jimi_hendrix (@jimi)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_author: Option<String>,

    /// States supported by the module
    #[serde(
        default,
        deserialize_with = "deserialize_optional_strings",
        skip_serializing_if = "Option::is_none"
    )]
    pub module_states: Option<Vec<String>>,

    /// Default state of the module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_default_state: Option<String>,

    /// Module description lines; the builder's default is used when empty
    #[serde(default, deserialize_with = "deserialize_strings")]
    pub description: Vec<String>,

    /// Suboption style
    #[serde(default)]
    pub style: DocStyle,

    /// Name of the controller template to document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl DocManifest {
    /// Load a manifest from a YAML (`.yaml`/`.yml`) or TOML (`.toml`) file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or doesn't parse.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            crate::Error::config(format!(
                "Failed to read manifest at {}: {}",
                path.display(),
                e
            ))
        })?;
        log::debug!("Loaded manifest from {}", path.display());

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let manifest = if is_toml {
            toml::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(manifest)
    }

    /// Save the manifest as YAML
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

/// Deserialize either a single string or a list of strings
fn deserialize_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::String(s) => Ok(vec![s]),
        SerdeValue::Seq(seq) => {
            let mut result = Vec::new();
            for item in seq {
                if let SerdeValue::String(s) = item {
                    result.push(s);
                } else {
                    return Err(serde::de::Error::custom(
                        "Expected string or array of strings",
                    ));
                }
            }
            Ok(result)
        }
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}

fn deserialize_optional_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_strings(deserializer).map(Some)
}
