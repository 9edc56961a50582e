//! Controller templates: loading, normalization and related helpers.
//!
//! A template is the JSON document the controller returns for
//! `.../configtemplate/rest/config/templates/<name>`. Its `parameters` array
//! holds one descriptor per configurable field.
//!
//! # Examples
//!
//! ```
//! use ndfc_docgen_core::template::NdfcTemplate;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> ndfc_docgen_core::Result<()> {
//! let mut template = NdfcTemplate::new();
//! template.set_template_dict(json!({"name": "Easy_Fabric", "parameters": []}));
//! template.load().await?;
//! assert_eq!(template.name()?, "Easy_Fabric");
//! # Ok(())
//! # }
//! ```

pub mod index;
pub mod normalize;
pub mod raw;
pub mod save;
pub mod types;

pub use index::TemplateIndex;
pub use raw::RawTemplate;
pub use save::TemplateSave;
pub use types::{Choice, CleanValue, NormalizedParameter};

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::Error;

// External imports (alphabetized)
use serde_json::Value as JsonValue;
use tokio::fs;

/// A template loaded either from memory or from a JSON file
#[derive(Debug, Default, Clone)]
pub struct NdfcTemplate {
    template_dict: Option<JsonValue>,
    template_json_file: Option<PathBuf>,
    template: Option<JsonValue>,
}

impl NdfcTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for an already-parsed template
    pub fn from_value(value: JsonValue) -> Self {
        Self {
            template_dict: None,
            template_json_file: None,
            template: Some(value),
        }
    }

    /// Shortcut for `set_template_json_file` followed by `load`
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let mut template = Self::new();
        template.set_template_json_file(path.as_ref());
        template.load().await?;
        Ok(template)
    }

    /// Template content as JSON. Takes precedence over the JSON file.
    pub fn set_template_dict(&mut self, value: JsonValue) {
        self.template_dict = Some(value);
    }

    /// Path to a file containing the template as JSON
    pub fn set_template_json_file(&mut self, path: impl Into<PathBuf>) {
        self.template_json_file = Some(path.into());
    }

    pub fn template_dict(&self) -> Option<&JsonValue> {
        self.template_dict.as_ref()
    }

    pub fn template_json_file(&self) -> Option<&Path> {
        self.template_json_file.as_deref()
    }

    /// Load the template from the dict if set, else from the JSON file.
    ///
    /// # Errors
    ///
    /// Returns a usage error if neither source was set, or an I/O or JSON
    /// error if the file can't be read.
    pub async fn load(&mut self) -> crate::Result<()> {
        if let Some(dict) = &self.template_dict {
            log::debug!("NdfcTemplate.load: loading from template_dict");
            self.template = Some(dict.clone());
            return Ok(());
        }
        let Some(path) = &self.template_json_file else {
            return Err(Error::usage(
                "Set either template_dict or template_json_file before calling NdfcTemplate.load()",
            ));
        };
        log::debug!(
            "NdfcTemplate.load: loading from template_json_file {}",
            path.display()
        );
        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::config(format!("Failed to read template {}: {}", path.display(), e))
        })?;
        self.template = Some(serde_json::from_str(&content)?);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.template.is_some()
    }

    /// The loaded template.
    ///
    /// # Errors
    ///
    /// Returns a usage error if `load` has not been called.
    pub fn template(&self) -> crate::Result<&JsonValue> {
        self.template
            .as_ref()
            .ok_or_else(|| Error::usage("Call NdfcTemplate.load() before accessing the template"))
    }

    /// Parameter descriptors of the loaded template
    pub fn parameters(&self) -> crate::Result<&[JsonValue]> {
        let template = self.template()?;
        match template.get("parameters").and_then(JsonValue::as_array) {
            Some(parameters) => Ok(parameters.as_slice()),
            None => {
                log::warn!(
                    "Template {} has no parameters",
                    normalize::get_template_name(template)
                );
                Ok(&[])
            }
        }
    }

    /// Normalized view of every named descriptor, in template order
    pub fn normalized_parameters(&self) -> crate::Result<Vec<NormalizedParameter>> {
        Ok(self
            .parameters()?
            .iter()
            .filter_map(normalize::normalize)
            .collect())
    }

    pub fn name(&self) -> crate::Result<String> {
        Ok(normalize::get_template_name(self.template()?))
    }

    pub fn description(&self) -> crate::Result<String> {
        Ok(normalize::get_template_description(self.template()?))
    }
}
