//! Saving controller templates to disk.

use std::path::PathBuf;

use serde_json::Value as JsonValue;
use tokio::fs;

use crate::Error;

/// Writes a template as JSON to `filepath/filename`
#[derive(Debug, Clone, Default)]
pub struct TemplateSave {
    filepath: Option<PathBuf>,
    filename: Option<String>,
}

impl TemplateSave {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory the template is written to
    pub fn set_filepath(&mut self, value: impl Into<PathBuf>) {
        self.filepath = Some(value.into());
    }

    /// File name, e.g. `aaa_radius.json`
    pub fn set_filename(&mut self, value: impl Into<String>) {
        self.filename = Some(value.into());
    }

    /// Full destination path.
    ///
    /// # Errors
    ///
    /// Returns a usage error if `filepath` or `filename` is unset.
    pub fn target(&self) -> crate::Result<PathBuf> {
        let filepath = self.filepath.as_ref().ok_or_else(|| {
            Error::usage("Set TemplateSave.filepath before calling TemplateSave.write_template()")
        })?;
        let filename = self.filename.as_ref().ok_or_else(|| {
            Error::usage("Set TemplateSave.filename before calling TemplateSave.write_template()")
        })?;
        Ok(filepath.join(filename))
    }

    /// Write `template` and return the path written to
    pub async fn write_template(&self, template: &JsonValue) -> crate::Result<PathBuf> {
        let target = self.target()?;
        log::debug!("Writing template to {}", target.display());
        fs::write(&target, serde_json::to_string(template)?)
            .await
            .map_err(|e| {
                Error::config(format!(
                    "Failed to write template to {}: {}",
                    target.display(),
                    e
                ))
            })?;
        Ok(target)
    }
}
