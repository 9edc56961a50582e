//! Detailed suboptions: snake_case names plus bounds and GUI placement.

use super::{fix_vendor_typo, SuboptionBuilder};
use crate::documentation::Suboption;
use crate::template::NormalizedParameter;
use crate::utils::to_snake_case;

#[derive(Debug, Clone)]
pub struct DetailedSuboptionBuilder;

impl SuboptionBuilder for DetailedSuboptionBuilder {
    fn option_name(&self, name: &str) -> String {
        to_snake_case(fix_vendor_typo(name).unwrap_or(name))
    }

    fn build(&self, param: &NormalizedParameter) -> Suboption {
        Suboption {
            description: vec![param.description.clone()],
            option_type: param.parameter_type.clone(),
            required: param.required,
            default: param.default.clone(),
            choices: param.choices.clone(),
            valid_values: param.valid_values.clone(),
            min: param.min,
            max: param.max,
            ndfc_gui_label: param.display_name.clone(),
            ndfc_gui_section: param.section.clone(),
        }
    }
}
