//! Index over the controller's template list.
//!
//! Some parameters enumerate other templates rather than literal values,
//! e.g. `default_network` accepts any template tagged `network`. The index
//! answers "which templates carry this tag".

use std::path::Path;

use serde_json::Value as JsonValue;

use super::normalize::{clean_text, get_name};
use super::NdfcTemplate;
use crate::Error;

/// The all-templates listing, in controller order
#[derive(Debug, Clone, Default)]
pub struct TemplateIndex {
    templates: Vec<JsonValue>,
}

impl TemplateIndex {
    /// Build an index from the template listing.
    ///
    /// Accepts the raw array returned by the controller, or an object mapping
    /// template name to template.
    pub fn from_value(value: JsonValue) -> crate::Result<Self> {
        let templates = match value {
            JsonValue::Array(items) => items,
            JsonValue::Object(map) => map
                .into_iter()
                .map(|(_, template)| template)
                .filter(JsonValue::is_object)
                .collect(),
            other => {
                return Err(Error::config(format!(
                    "Expected a list of templates, got {}",
                    json_kind(&other)
                )))
            }
        };
        log::debug!("TemplateIndex: indexed {} templates", templates.len());
        Ok(Self { templates })
    }

    /// Load the listing from a JSON file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let template = NdfcTemplate::from_file(path).await?;
        Self::from_template(&template)
    }

    /// Build the index from a loaded [`NdfcTemplate`] holding the listing.
    pub fn from_template(template: &NdfcTemplate) -> crate::Result<Self> {
        Self::from_value(template.template()?.clone())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Names of all templates whose `tags` include `tag`, in listing order.
    pub fn get_template_names_by_tag(&self, tag: &str) -> Vec<String> {
        self.templates
            .iter()
            .filter(|template| {
                template
                    .get("tags")
                    .and_then(JsonValue::as_str)
                    .is_some_and(|tags| clean_text(tags).split(',').any(|t| t.trim() == tag))
            })
            .filter_map(get_name)
            .collect()
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn listing() -> JsonValue {
        json!([
            {"name": "Default_Network_Universal", "tags": "[network]"},
            {"name": "Default_VRF_Universal", "tags": "vrf"},
            {"name": "Service_Network_Universal", "tags": "&quot;network&quot;, service"},
            {"name": "Untagged"},
            {"tags": "network"}
        ])
    }

    #[test]
    fn test_names_by_tag() -> crate::Result<()> {
        let index = TemplateIndex::from_value(listing())?;
        assert_eq!(index.len(), 5);
        assert_eq!(
            index.get_template_names_by_tag("vrf"),
            vec!["Default_VRF_Universal".to_string()]
        );
        assert_eq!(
            index.get_template_names_by_tag("service"),
            vec!["Service_Network_Universal".to_string()]
        );
        assert_eq!(
            index.get_template_names_by_tag("network"),
            vec!["Default_Network_Universal".to_string()]
        );
        assert!(index.get_template_names_by_tag("storage").is_empty());
        Ok(())
    }

    #[test]
    fn test_object_form() -> crate::Result<()> {
        let index = TemplateIndex::from_value(json!({
            "Default_VRF_Universal": {"name": "Default_VRF_Universal", "tags": "vrf"},
            "Default_VRF_Extension_Universal": {"name": "Default_VRF_Extension_Universal", "tags": "vrf,extension"}
        }))?;
        assert_eq!(
            index.get_template_names_by_tag("vrf"),
            vec![
                "Default_VRF_Universal".to_string(),
                "Default_VRF_Extension_Universal".to_string()
            ]
        );
        Ok(())
    }

    #[test]
    fn test_rejects_scalars() {
        let err = TemplateIndex::from_value(json!("templates")).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("a string")));
    }

    #[tokio::test]
    async fn test_from_file() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("templates.json");
        tokio::fs::write(&file_path, listing().to_string()).await?;
        let index = TemplateIndex::from_file(&file_path).await?;
        assert!(!index.is_empty());
        Ok(())
    }
}
