//! Ansible module documentation built from a controller template.
//!
//! [`DocBuilder`] folds every documented template parameter into the
//! `options.config.suboptions` mapping of an Ansible `DOCUMENTATION` block.
//!
//! # Examples
//!
//! ```
//! use ndfc_docgen_core::documentation::DocBuilder;
//! use ndfc_docgen_core::template::{NdfcTemplate, TemplateIndex};
//! use serde_json::json;
//!
//! # fn main() -> ndfc_docgen_core::Result<()> {
//! let template = NdfcTemplate::from_value(json!({
//!     "name": "Easy_Fabric",
//!     "parameters": [{"name": "FABRIC_NAME", "parameterType": "string"}]
//! }));
//!
//! let mut builder = DocBuilder::new();
//! builder.set_template(template);
//! builder.set_template_index(TemplateIndex::from_value(json!([]))?);
//! builder.set_module_name("dcnm_fabric");
//! builder.set_module_author("Cisco Systems, Inc.");
//! builder.set_module_states(&["deleted", "merged", "query", "replaced"])?;
//! builder.set_module_default_state("merged")?;
//! builder.commit()?;
//! println!("{}", builder.documentation_yaml()?);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::builders::{build_translation, is_documented, DocStyle, SuboptionContext};
use crate::manifest::DocManifest;
use crate::template::normalize;
use crate::template::{Choice, CleanValue, NdfcTemplate, TemplateIndex};
use crate::utils::to_json_pretty;
use crate::Error;

/// Module description used when none is configured
pub const DEFAULT_MODULE_DESCRIPTION: &str = "Manage creation and configuration of NDFC fabrics.";

/// Marker in a first choice meaning "every template carrying the tag that follows"
pub const TEMPLATES_MARKER: &str = "TEMPLATES";

/// Ansible states a module may support
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleState {
    Deleted,
    Merged,
    Overridden,
    Query,
    Replaced,
}

impl ModuleState {
    pub const ALL: [ModuleState; 5] = [
        Self::Deleted,
        Self::Merged,
        Self::Overridden,
        Self::Query,
        Self::Replaced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deleted => "deleted",
            Self::Merged => "merged",
            Self::Overridden => "overridden",
            Self::Query => "query",
            Self::Replaced => "replaced",
        }
    }
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(ModuleState::as_str).collect();
                Error::usage(format!(
                    "Invalid Ansible state {s}. Expected one of {}",
                    expected.join(",")
                ))
            })
    }
}

/// One entry under `options.config.suboptions`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Suboption {
    pub description: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub option_type: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<CleanValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub valid_values: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndfc_gui_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndfc_gui_section: Option<String>,
}

/// `options.state`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateOption {
    pub description: Vec<String>,
    #[serde(rename = "type")]
    pub option_type: String,
    pub choices: Vec<ModuleState>,
    pub default: ModuleState,
}

/// `options.config`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigOption {
    pub description: Vec<String>,
    #[serde(rename = "type")]
    pub option_type: String,
    pub elements: String,
    pub suboptions: BTreeMap<String, Suboption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocOptions {
    pub state: StateOption,
    pub config: ConfigOption,
}

/// The documentation tree, serialized verbatim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Documentation {
    pub module: String,
    pub author: String,
    pub description: Vec<String>,
    pub options: DocOptions,
}

/// Builds [`Documentation`] from a template.
///
/// Module name, author, states, default state, the template and the
/// template index are mandatory; [`DocBuilder::commit`] fails until all are
/// set.
#[derive(Debug, Default)]
pub struct DocBuilder {
    style: DocStyle,
    module_name: Option<String>,
    module_author: Option<String>,
    module_states: Option<Vec<ModuleState>>,
    module_default_state: Option<ModuleState>,
    description: Vec<String>,
    template: Option<NdfcTemplate>,
    template_index: Option<TemplateIndex>,
    translation: HashMap<String, String>,
    documentation: Option<Documentation>,
}

impl DocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded with the properties a manifest sets.
    ///
    /// Properties the manifest leaves out stay unset, so `commit` reports them.
    pub fn from_manifest(manifest: &DocManifest) -> crate::Result<Self> {
        let mut builder = Self::new();
        builder.set_style(manifest.style);
        if let Some(name) = &manifest.module_name {
            builder.set_module_name(name);
        }
        if let Some(author) = &manifest.module_author {
            builder.set_module_author(author);
        }
        if let Some(states) = &manifest.module_states {
            builder.set_module_states(states)?;
        }
        if let Some(state) = &manifest.module_default_state {
            builder.set_module_default_state(state)?;
        }
        builder.set_description(manifest.description.clone());
        Ok(builder)
    }

    pub fn set_style(&mut self, style: DocStyle) {
        self.style = style;
    }

    pub fn style(&self) -> DocStyle {
        self.style
    }

    /// The name of the module, e.g. `dcnm_fabric`
    pub fn set_module_name(&mut self, value: impl Into<String>) {
        self.module_name = Some(value.into());
    }

    pub fn module_name(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    /// The author of the module, e.g. `jimi_hendrix (@jimi)`
    pub fn set_module_author(&mut self, value: impl Into<String>) {
        self.module_author = Some(value.into());
    }

    pub fn module_author(&self) -> Option<&str> {
        self.module_author.as_deref()
    }

    /// States supported by the module.
    ///
    /// # Errors
    ///
    /// Returns a usage error, and leaves the current value untouched, if any
    /// state is not a valid Ansible state.
    pub fn set_module_states<S: AsRef<str>>(&mut self, states: &[S]) -> crate::Result<()> {
        let states = states
            .iter()
            .map(|state| state.as_ref().parse())
            .collect::<crate::Result<Vec<ModuleState>>>()?;
        self.module_states = Some(states);
        Ok(())
    }

    pub fn module_states(&self) -> Option<&[ModuleState]> {
        self.module_states.as_deref()
    }

    /// Default state of the module.
    ///
    /// # Errors
    ///
    /// Returns a usage error if `value` is not a valid Ansible state.
    pub fn set_module_default_state(&mut self, value: &str) -> crate::Result<()> {
        self.module_default_state = Some(value.parse()?);
        Ok(())
    }

    pub fn module_default_state(&self) -> Option<ModuleState> {
        self.module_default_state
    }

    /// Module description lines. An empty list selects the default description.
    pub fn set_description(&mut self, lines: Vec<String>) {
        self.description = lines;
    }

    /// The template to document. It must be loaded before `commit`.
    pub fn set_template(&mut self, template: NdfcTemplate) {
        self.template = Some(template);
    }

    /// Index used to resolve choices that reference other templates
    pub fn set_template_index(&mut self, index: TemplateIndex) {
        self.template_index = Some(index);
    }

    /// Controller name to playbook name, for documented parameters.
    /// Empty until `commit` has run.
    pub fn translation(&self) -> &HashMap<String, String> {
        &self.translation
    }

    pub fn documentation(&self) -> Option<&Documentation> {
        self.documentation.as_ref()
    }

    fn missing(&self, property: &str) -> Error {
        Error::usage(format!(
            "DocBuilder.commit: Call DocBuilder.{property} before calling DocBuilder.commit()"
        ))
    }

    /// Build the documentation for the template.
    pub fn commit(&mut self) -> crate::Result<&Documentation> {
        let template = self.template.as_ref().ok_or_else(|| self.missing("set_template"))?;
        let parameters = template.parameters()?;
        let index = self
            .template_index
            .as_ref()
            .ok_or_else(|| self.missing("set_template_index"))?;
        let module = self
            .module_name
            .clone()
            .ok_or_else(|| self.missing("set_module_name"))?;
        let author = self
            .module_author
            .clone()
            .ok_or_else(|| self.missing("set_module_author"))?;
        let states = self
            .module_states
            .clone()
            .ok_or_else(|| self.missing("set_module_states"))?;
        let default_state = self
            .module_default_state
            .ok_or_else(|| self.missing("set_module_default_state"))?;

        let builder = SuboptionContext::get_builder(self.style);
        let translation = build_translation(parameters, builder.as_ref());

        let mut suboptions = BTreeMap::new();
        for item in parameters.iter().filter(|item| is_documented(item)) {
            let Some(param) = normalize::normalize(item) else {
                continue;
            };
            let name = translation
                .get(&param.name)
                .cloned()
                .unwrap_or_else(|| param.name.clone());
            let mut suboption = builder.build(&param);
            suboption.choices = resolve_template_choices(suboption.choices, index);
            if suboptions.insert(name.clone(), suboption).is_some() {
                log::warn!("Duplicate suboption {name}; keeping the last definition");
            }
        }
        log::info!(
            "Documented {} of {} parameters for module {module}",
            suboptions.len(),
            parameters.len()
        );

        let description = if self.description.is_empty() {
            vec![DEFAULT_MODULE_DESCRIPTION.to_string()]
        } else {
            self.description.clone()
        };

        let documentation = Documentation {
            module,
            author,
            description,
            options: DocOptions {
                state: StateOption {
                    description: vec!["The state of DCNM after module completion".to_string()],
                    option_type: "str".to_string(),
                    choices: states,
                    default: default_state,
                },
                config: ConfigOption {
                    description: vec!["A list of fabric configuration dictionaries".to_string()],
                    option_type: "list".to_string(),
                    elements: "dict".to_string(),
                    suboptions,
                },
            },
        };
        self.translation = translation;
        Ok(self.documentation.insert(documentation))
    }

    fn committed(&self, method: &str) -> crate::Result<&Documentation> {
        self.documentation.as_ref().ok_or_else(|| {
            Error::usage(format!(
                "Call DocBuilder.commit() before calling DocBuilder.{method}()"
            ))
        })
    }

    /// The documentation as YAML
    pub fn documentation_yaml(&self) -> crate::Result<String> {
        Ok(serde_yaml::to_string(self.committed("documentation_yaml")?)?)
    }

    /// The documentation as JSON
    pub fn documentation_json(&self) -> crate::Result<String> {
        to_json_pretty(self.committed("documentation_json")?)
    }
}

/// Replace `TEMPLATES.<tag>` choices with the names of templates carrying `<tag>`.
fn resolve_template_choices(choices: Vec<Choice>, index: &TemplateIndex) -> Vec<Choice> {
    let Some(first) = choices.first().map(Choice::to_string) else {
        return choices;
    };
    if !first.contains(TEMPLATES_MARKER) {
        return choices;
    }
    match first.split('.').nth(1) {
        Some(tag) => {
            log::debug!("Resolving choices {first} by template tag {tag}");
            index
                .get_template_names_by_tag(tag)
                .into_iter()
                .map(Choice::Str)
                .collect()
        }
        None => {
            log::warn!("Choice {first} names no template tag; leaving choices as is");
            choices
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as JsonValue};

    fn template() -> NdfcTemplate {
        NdfcTemplate::from_value(json!({
            "name": "Easy_Fabric",
            "parameters": [
                {
                    "name": "FABRIC_TYPE",
                    "parameterType": "string",
                    "annotations": {"IsInternal": "true"}
                },
                {
                    "name": "REPLICATION_MODE",
                    "parameterType": "enum",
                    "optional": false,
                    "annotations": {
                        "Description": "Replication Mode for BUM Traffic",
                        "Enum": "Multicast,Ingress"
                    },
                    "metaProperties": {"defaultValue": "Multicast"}
                },
                {
                    "name": "SECRET_KEY",
                    "annotations": {"Section": "\"Hidden\""}
                },
                {
                    "name": "DEAFULT_QUEUING_POLICY_OTHER",
                    "parameterType": "string",
                    "optional": false,
                    "annotations": {"Description": ""}
                },
                {
                    "name": "default_network",
                    "parameterType": "string",
                    "annotations": {"Enum": "%TEMPLATES.network"},
                    "defaultValue": "Default_Network_Universal"
                },
                {"parameterType": "string"}
            ]
        }))
    }

    fn index() -> TemplateIndex {
        TemplateIndex::from_value(json!([
            {"name": "Default_Network_Universal", "tags": "network"},
            {"name": "Service_Network_Universal", "tags": "network,service"},
            {"name": "Default_VRF_Universal", "tags": "vrf"}
        ]))
        .unwrap()
    }

    fn ready_builder() -> DocBuilder {
        let mut builder = DocBuilder::new();
        builder.set_template(template());
        builder.set_template_index(index());
        builder.set_module_name("dcnm_fabric");
        builder.set_module_author("Cisco Systems, Inc.");
        builder.set_module_states(&["deleted", "merged"]).unwrap();
        builder.set_module_default_state("merged").unwrap();
        builder
    }

    #[test]
    fn test_module_state_parse() {
        assert_eq!("query".parse::<ModuleState>().unwrap(), ModuleState::Query);
        let err = "bogus".parse::<ModuleState>().unwrap_err();
        assert!(matches!(err, Error::Usage(ref msg) if msg.contains("bogus")));
    }

    #[test]
    fn test_setters_reject_invalid_states() {
        let mut builder = DocBuilder::new();
        assert!(builder.set_module_default_state("bogus").is_err());
        assert_eq!(builder.module_default_state(), None);

        builder.set_module_states(&["merged"]).unwrap();
        assert!(builder.set_module_states(&["merged", "purged"]).is_err());
        assert_eq!(builder.module_states(), Some(&[ModuleState::Merged][..]));
    }

    #[test]
    fn test_commit_requires_mandatory_properties() {
        let mut builder = ready_builder();
        builder.module_author = None;
        let err = builder.commit().unwrap_err();
        assert!(matches!(err, Error::Usage(ref msg) if msg.contains("set_module_author")));

        let mut builder = ready_builder();
        builder.module_default_state = None;
        assert!(builder.commit().is_err());

        let mut builder = ready_builder();
        builder.template_index = None;
        assert!(builder.commit().is_err());

        let mut builder = ready_builder();
        builder.set_template(NdfcTemplate::new());
        assert!(matches!(builder.commit(), Err(Error::Usage(_))));
    }

    #[test]
    fn test_commit() -> crate::Result<()> {
        let mut builder = ready_builder();
        let documentation = builder.commit()?.clone();

        assert_eq!(documentation.module, "dcnm_fabric");
        assert_eq!(documentation.description, vec![DEFAULT_MODULE_DESCRIPTION.to_string()]);
        assert_eq!(
            documentation.options.state.choices,
            vec![ModuleState::Deleted, ModuleState::Merged]
        );
        assert_eq!(documentation.options.state.default, ModuleState::Merged);

        let suboptions = &documentation.options.config.suboptions;
        let keys: Vec<&str> = suboptions.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["DEFAULT_QUEUING_POLICY_OTHER", "REPLICATION_MODE", "default_network"]
        );

        let replication = &suboptions["REPLICATION_MODE"];
        assert_eq!(replication.option_type.as_deref(), Some("str"));
        assert!(!replication.required);
        assert_eq!(replication.default, Some(CleanValue::Str("Multicast".into())));
        assert_eq!(
            replication.choices,
            vec![Choice::from("Multicast"), Choice::from("Ingress")]
        );

        let queuing = &suboptions["DEFAULT_QUEUING_POLICY_OTHER"];
        assert!(queuing.required);
        assert_eq!(queuing.description, vec!["No description available".to_string()]);

        let network = &suboptions["default_network"];
        assert_eq!(
            network.choices,
            vec![
                Choice::from("Default_Network_Universal"),
                Choice::from("Service_Network_Universal")
            ]
        );

        assert_eq!(
            builder.translation()["DEAFULT_QUEUING_POLICY_OTHER"],
            "DEFAULT_QUEUING_POLICY_OTHER"
        );
        Ok(())
    }

    #[test]
    fn test_single_surviving_parameter() -> crate::Result<()> {
        let mut builder = ready_builder();
        builder.set_template(NdfcTemplate::from_value(json!({
            "parameters": [
                {"name": "FABRIC_TYPE", "annotations": {"IsInternal": true}},
                {"name": "BGP_AS", "parameterType": "string"}
            ]
        })));
        let documentation = builder.commit()?;
        let suboptions = &documentation.options.config.suboptions;
        assert_eq!(suboptions.len(), 1);
        assert!(suboptions.contains_key("BGP_AS"));
        Ok(())
    }

    #[test]
    fn test_detailed_style() -> crate::Result<()> {
        let mut builder = ready_builder();
        builder.set_style(DocStyle::Detailed);
        let documentation = builder.commit()?;
        let keys: Vec<&str> = documentation
            .options
            .config
            .suboptions
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            vec!["default_network", "default_queuing_policy_other", "replication_mode"]
        );
        Ok(())
    }

    #[test]
    fn test_output_requires_commit() {
        let builder = ready_builder();
        assert!(matches!(builder.documentation_yaml(), Err(Error::Usage(_))));
        assert!(matches!(builder.documentation_json(), Err(Error::Usage(_))));
    }

    #[test]
    fn test_serialized_schema() -> crate::Result<()> {
        let mut builder = ready_builder();
        builder.set_description(vec!["Manage ISN fabrics.".into()]);
        builder.commit()?;

        let yaml: JsonValue = serde_yaml::from_str(&builder.documentation_yaml()?)?;
        assert_eq!(yaml["module"], "dcnm_fabric");
        assert_eq!(yaml["description"], json!(["Manage ISN fabrics."]));
        assert_eq!(yaml["options"]["state"]["choices"], json!(["deleted", "merged"]));
        assert_eq!(yaml["options"]["config"]["elements"], "dict");
        let replication = &yaml["options"]["config"]["suboptions"]["REPLICATION_MODE"];
        assert_eq!(replication["type"], "str");
        assert!(replication.get("min").is_none());

        let json: JsonValue = serde_json::from_str(&builder.documentation_json()?)?;
        assert_eq!(json, yaml);
        Ok(())
    }

    #[test]
    fn test_from_manifest() -> crate::Result<()> {
        let manifest = DocManifest {
            module_name: Some("dcnm_fabric".into()),
            module_states: Some(vec!["merged".into(), "query".into()]),
            module_default_state: Some("query".into()),
            style: DocStyle::Detailed,
            ..Default::default()
        };
        let builder = DocBuilder::from_manifest(&manifest)?;
        assert_eq!(builder.module_name(), Some("dcnm_fabric"));
        assert_eq!(builder.module_author(), None);
        assert_eq!(builder.module_default_state(), Some(ModuleState::Query));
        assert_eq!(builder.style(), DocStyle::Detailed);

        let manifest = DocManifest {
            module_default_state: Some("bogus".into()),
            ..Default::default()
        };
        assert!(DocBuilder::from_manifest(&manifest).is_err());
        Ok(())
    }

    #[test]
    fn test_empty_manifest_leaves_properties_unset() -> crate::Result<()> {
        let mut builder = DocBuilder::from_manifest(&DocManifest::default())?;
        assert_eq!(builder.module_name(), None);
        assert_eq!(builder.module_states(), None);

        builder.set_template(template());
        builder.set_template_index(index());
        let err = builder.commit().unwrap_err();
        assert!(matches!(err, Error::Usage(ref msg) if msg.contains("set_module_name")));
        Ok(())
    }
}
