//! Fabric-style suboptions: the controller's own parameter names.

use super::{fix_vendor_typo, SuboptionBuilder};
use crate::documentation::Suboption;
use crate::template::NormalizedParameter;

#[derive(Debug, Clone)]
pub struct FabricSuboptionBuilder;

impl SuboptionBuilder for FabricSuboptionBuilder {
    fn option_name(&self, name: &str) -> String {
        fix_vendor_typo(name).unwrap_or(name).to_string()
    }

    fn build(&self, param: &NormalizedParameter) -> Suboption {
        Suboption {
            description: vec![param.description.clone()],
            option_type: param.parameter_type.clone(),
            required: param.required,
            default: param.default.clone(),
            choices: param.choices.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::normalize::normalize;
    use crate::template::{Choice, CleanValue};
    use serde_json::json;

    #[test]
    fn test_build() {
        let item = json!({
            "name": "DEAFULT_QUEUING_POLICY_CLOUDSCALE",
            "parameterType": "enum",
            "optional": "false",
            "annotations": {
                "Description": "Queuing Policy for all 92xx, -EX, -FX, -FX2, -FX3, -GX series switches in the fabric",
                "Enum": "\"queuing_policy_default_4q_cloudscale,queuing_policy_default_8q_cloudscale\"",
                "DisplayName": "N9K Cloud Scale Platform Queuing Policy"
            },
            "metaProperties": {"defaultValue": "queuing_policy_default_8q_cloudscale"}
        });
        let param = normalize(&item).unwrap();
        let builder = FabricSuboptionBuilder;

        assert_eq!(
            builder.option_name(&param.name),
            "DEFAULT_QUEUING_POLICY_CLOUDSCALE"
        );
        assert_eq!(builder.option_name("BGP_AS"), "BGP_AS");

        let suboption = builder.build(&param);
        assert_eq!(suboption.option_type.as_deref(), Some("str"));
        assert!(!suboption.required);
        assert_eq!(
            suboption.default,
            Some(CleanValue::Str("queuing_policy_default_8q_cloudscale".into()))
        );
        assert_eq!(
            suboption.choices,
            vec![
                Choice::from("queuing_policy_default_4q_cloudscale"),
                Choice::from("queuing_policy_default_8q_cloudscale"),
            ]
        );
        // fabric style leaves out the GUI placement
        assert_eq!(suboption.ndfc_gui_label, None);
    }
}
