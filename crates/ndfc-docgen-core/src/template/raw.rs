//! Pretty-printing of templates exactly as the controller returned them.

use std::path::Path;

use serde_json::Value as JsonValue;

use super::NdfcTemplate;
use crate::utils::to_json_pretty;

/// Keys holding the template body; large and rarely useful when reading parameters
pub const CONTENT_KEYS: &[&str] = &["content", "newContent"];

/// An unprocessed template
#[derive(Debug, Clone)]
pub struct RawTemplate {
    template: JsonValue,
}

impl RawTemplate {
    pub fn from_value(template: JsonValue) -> Self {
        Self { template }
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let template = NdfcTemplate::from_file(path).await?;
        Ok(Self::from_value(template.template()?.clone()))
    }

    /// Remove a top-level key, returning its value if it was present
    pub fn delete_key(&mut self, key: &str) -> Option<JsonValue> {
        self.template.as_object_mut()?.remove(key)
    }

    /// Remove the template body keys (`content`, `newContent`)
    pub fn strip_content(&mut self) {
        for key in CONTENT_KEYS {
            self.delete_key(key);
        }
    }

    pub fn as_json(&self) -> &JsonValue {
        &self.template
    }

    pub fn to_yaml(&self) -> crate::Result<String> {
        Ok(serde_yaml::to_string(&self.template)?)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        to_json_pretty(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> RawTemplate {
        RawTemplate::from_value(json!({
            "name": "aaa_radius",
            "content": "##template variables ...",
            "newContent": "##template content ...",
            "parameters": [{"name": "SERVER", "parameterType": "ipAddress"}]
        }))
    }

    #[test]
    fn test_delete_key() {
        let mut raw = sample();
        assert_eq!(raw.delete_key("name"), Some(json!("aaa_radius")));
        assert_eq!(raw.delete_key("name"), None);

        let mut scalar = RawTemplate::from_value(json!("not an object"));
        assert_eq!(scalar.delete_key("name"), None);
    }

    #[test]
    fn test_strip_content_and_render() -> crate::Result<()> {
        let mut raw = sample();
        raw.strip_content();
        assert!(raw.as_json().get("content").is_none());
        assert!(raw.as_json().get("newContent").is_none());

        let yaml = raw.to_yaml()?;
        assert!(yaml.contains("name: aaa_radius"));
        assert!(!yaml.contains("##template"));

        let parsed: JsonValue = serde_json::from_str(&raw.to_json()?)?;
        assert_eq!(parsed, *raw.as_json());
        Ok(())
    }
}
