//! Parameter descriptor normalization.
//!
//! Controller templates mix camelCase and UPPER_SNAKE keys, put the same
//! field either under `metaProperties` or at the top level, and embed HTML
//! escapes in free text. The functions here pull documentation fields out of
//! one descriptor with a fixed fallback order. None of them fail: missing or
//! malformed input gives `None`, `false` or an empty list.
//!
//! # Examples
//!
//! ```
//! use ndfc_docgen_core::template::normalize::{clean_string, get_enum};
//! use ndfc_docgen_core::template::{CleanValue, Choice};
//! use serde_json::json;
//!
//! assert_eq!(clean_string(Some(&json!(" yes "))), CleanValue::Bool(true));
//!
//! let item = json!({"annotations": {"Enum": "1,2,3"}});
//! assert_eq!(get_enum(&item), vec![Choice::Int(1), Choice::Int(2), Choice::Int(3)]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

use super::types::{Choice, CleanValue, NormalizedParameter};

/// Description used when a descriptor carries none
pub const NO_DESCRIPTION: &str = "No description available";

/// Value returned by template-level accessors for missing fields
pub const UNKNOWN: &str = "unknown";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

static MIN_MAX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(Min:\s*(\d+),\s*Max:\s*(\d+)\)").expect("valid regex"));

/// Literal substitutions applied by [`clean_text`], in order
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("<br />", " "),
    ("&#39;", ""),
    ("&#43;", "+"),
    ("&#61;", "="),
    ("amp;", ""),
    ("[", ""),
    ("]", ""),
    ("\"", ""),
    ("'", ""),
];

/// Return the first value stored under `key`, searching `item` depth first.
///
/// The current object is checked before its children, and children are
/// visited in document order, so the first occurrence wins. Only nested
/// objects are searched; arrays are not descended into.
pub fn get_dict_value<'a>(item: &'a JsonValue, key: &str) -> Option<&'a JsonValue> {
    let object = item.as_object()?;
    if let Some(value) = object.get(key) {
        return Some(value);
    }
    object
        .values()
        .filter(|value| value.is_object())
        .find_map(|value| get_dict_value(value, key))
}

/// Textual form of a JSON scalar. Arrays of scalars are joined with commas.
fn text_of(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Array(items) => {
            let parts: Option<Vec<String>> = items
                .iter()
                .map(|item| match item {
                    JsonValue::Array(_) | JsonValue::Object(_) => None,
                    other => text_of(other),
                })
                .collect();
            parts.map(|parts| parts.join(","))
        }
        JsonValue::Null | JsonValue::Object(_) => None,
    }
}

fn clean_pass(text: &str) -> String {
    let mut out = text.trim().to_string();
    for (from, to) in SUBSTITUTIONS {
        out = out.replace(from, to);
    }
    WHITESPACE_RE.replace_all(&out, " ").trim().to_string()
}

/// Scrub HTML escapes and stray punctuation from controller text.
///
/// The substitutions are repeated until the text stops changing, so the
/// result is always a fixed point.
pub fn clean_text(text: &str) -> String {
    let mut current = clean_pass(text);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn make_bool_str(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}

/// Interpret a value as a boolean: `true`/`yes` and `false`/`no`, any case.
pub fn make_bool(value: Option<&JsonValue>) -> Option<bool> {
    match value? {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) => make_bool_str(s),
        _ => None,
    }
}

fn coerce(text: String) -> CleanValue {
    if let Some(b) = make_bool_str(&text) {
        return CleanValue::Bool(b);
    }
    if let Ok(i) = text.parse::<i64>() {
        return CleanValue::Int(i);
    }
    match text.parse::<f64>() {
        Ok(x) if x.is_finite() => CleanValue::Float(x),
        _ => CleanValue::Str(text),
    }
}

/// Clean a raw template value and interpret it as bool, int, float or text.
///
/// A missing value (or JSON null) cleans to the empty string. Non-string
/// scalars keep their JSON type. Objects and arrays are cleaned as their
/// JSON text.
pub fn clean_string(value: Option<&JsonValue>) -> CleanValue {
    match value {
        None | Some(JsonValue::Null) => CleanValue::Str(String::new()),
        Some(JsonValue::Bool(b)) => CleanValue::Bool(*b),
        Some(JsonValue::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => CleanValue::Int(i),
            (None, Some(x)) => CleanValue::Float(x),
            (None, None) => coerce(clean_text(&n.to_string())),
        },
        Some(JsonValue::String(s)) => coerce(clean_text(s)),
        Some(other) => coerce(clean_text(&other.to_string())),
    }
}

fn cleaned_text_at(item: &JsonValue, key: &str) -> Option<String> {
    get_dict_value(item, key)
        .and_then(text_of)
        .map(|text| clean_text(&text))
        .filter(|text| !text.is_empty())
}

/// Comma-split, trimmed elements in source order. Empty elements are kept,
/// so a list with any gap stays textual.
fn split_choices(text: &str) -> Vec<Choice> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let ints: Option<Vec<i64>> = parts.iter().map(|part| part.parse().ok()).collect();
    match ints {
        Some(ints) => ints.into_iter().map(Choice::Int).collect(),
        None => parts.into_iter().map(Choice::from).collect(),
    }
}

fn non_null(value: &JsonValue) -> Option<&JsonValue> {
    (!value.is_null()).then_some(value)
}

/// Default value of a descriptor.
///
/// `metaProperties.defaultValue` is preferred over a top-level `defaultValue`.
/// Returns `None` when neither exists.
pub fn get_default_value(item: &JsonValue) -> Option<CleanValue> {
    item.get("metaProperties")
        .and_then(|meta| meta.get("defaultValue"))
        .and_then(non_null)
        .or_else(|| item.get("defaultValue").and_then(non_null))
        .map(|value| clean_string(Some(value)))
}

fn has_default(item: &JsonValue) -> bool {
    get_default_value(item).is_some_and(|value| !value.is_empty())
}

/// `annotations.Description` with any `(Min: X, Max: Y)` suffix removed.
///
/// Descriptions stay textual; they are scrubbed but never coerced.
pub fn get_description(item: &JsonValue) -> String {
    let description = item
        .get("annotations")
        .and_then(|annotations| annotations.get("Description"))
        .and_then(text_of)
        .map(|text| clean_description(&clean_text(&text)))
        .unwrap_or_default();
    if description.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        description
    }
}

/// Remove `(Min: X, Max: Y)` from a description.
pub fn clean_description(text: &str) -> String {
    let stripped = MIN_MAX_RE.replace_all(text, "");
    WHITESPACE_RE.replace_all(stripped.trim(), " ").to_string()
}

/// Bounds parsed from `(Min: X, Max: Y)` in the raw description.
pub fn get_min_max(item: &JsonValue) -> (Option<i64>, Option<i64>) {
    let Some(description) = get_dict_value(item, "Description").and_then(JsonValue::as_str) else {
        return (None, None);
    };
    MIN_MAX_RE
        .captures(description)
        .and_then(|caps| Some((caps[1].parse::<i64>().ok()?, caps[2].parse::<i64>().ok()?)))
        .map_or((None, None), |(min, max)| (Some(min), Some(max)))
}

/// `Enum` annotation as a list; integers when every element is an integer.
pub fn get_enum(item: &JsonValue) -> Vec<Choice> {
    cleaned_text_at(item, "Enum")
        .map(|text| split_choices(&text))
        .unwrap_or_default()
}

/// `metaProperties.validValues` as a list, with the same rules as [`get_enum`].
pub fn get_valid_values(item: &JsonValue) -> Vec<Choice> {
    cleaned_text_at(item, "validValues")
        .map(|text| split_choices(&text))
        .unwrap_or_default()
}

fn get_bound(item: &JsonValue, key: &str) -> Option<CleanValue> {
    get_dict_value(item, key)
        .and_then(non_null)
        .map(|value| clean_string(Some(value)))
        .filter(|value| !value.is_empty())
}

/// `metaProperties.min`
pub fn get_min(item: &JsonValue) -> Option<CleanValue> {
    get_bound(item, "min")
}

/// `metaProperties.max`
pub fn get_max(item: &JsonValue) -> Option<CleanValue> {
    get_bound(item, "max")
}

/// `metaProperties.minLength`
pub fn get_min_length(item: &JsonValue) -> Option<CleanValue> {
    get_bound(item, "minLength")
}

/// `metaProperties.maxLength`
pub fn get_max_length(item: &JsonValue) -> Option<CleanValue> {
    get_bound(item, "maxLength")
}

/// Map a controller `parameterType` to an Ansible type.
///
/// Unknown types are returned unchanged.
pub fn translate_parameter_type(vendor: &str) -> &str {
    match vendor {
        "bool" | "boolean" | "BOOLEAN" => "bool",
        "int" | "integer" | "INT" | "INTEGER" => "int",
        "enum"
        | "interfaceRange"
        | "integerRange"
        | "ipAddress"
        | "ipAddressList"
        | "ipV4Address"
        | "ipV4AddressWithSubnet"
        | "ipV6Address"
        | "ipV6AddressWithSubnet"
        | "ipv4"
        | "ipv6"
        | "ipv4_subnet"
        | "ipv6_subnet"
        | "macAddress"
        | "str"
        | "string"
        | "string[]"
        | "STRING" => "str",
        "list" | "structureArray" => "list",
        other => other,
    }
}

/// Translated `parameterType`, or `None` when the descriptor has none.
pub fn get_parameter_type(item: &JsonValue) -> Option<String> {
    get_dict_value(item, "parameterType")
        .and_then(JsonValue::as_str)
        .map(|vendor| translate_parameter_type(vendor).to_string())
}

/// Top-level `name` of a descriptor; `None` when missing or empty.
pub fn get_name(item: &JsonValue) -> Option<String> {
    item.get("name")
        .and_then(text_of)
        .map(|name| clean_text(&name))
        .filter(|name| !name.is_empty())
}

/// GUI label, `annotations.DisplayName`
pub fn get_display_name(item: &JsonValue) -> Option<String> {
    cleaned_text_at(item, "DisplayName")
}

/// GUI section, `annotations.Section`
pub fn get_section(item: &JsonValue) -> Option<String> {
    cleaned_text_at(item, "Section")
}

/// Raw visibility rule, `annotations.IsShow`
pub fn get_is_show(item: &JsonValue) -> Option<String> {
    get_dict_value(item, "IsShow")
        .and_then(JsonValue::as_str)
        .map(str::to_string)
        .filter(|rule| !rule.trim().is_empty())
}

pub fn is_internal(item: &JsonValue) -> bool {
    make_bool(get_dict_value(item, "IsInternal")) == Some(true)
}

/// True iff the cleaned `Section` annotation contains `Hidden`.
pub fn is_hidden(item: &JsonValue) -> bool {
    get_section(item).is_some_and(|section| section.contains("Hidden"))
}

/// Top-level `optional` flag, `None` when absent or not boolean-like.
pub fn is_optional(item: &JsonValue) -> Option<bool> {
    make_bool(item.get("optional"))
}

/// False whenever a default exists; otherwise the inverse of `optional`.
pub fn is_required(item: &JsonValue) -> bool {
    if has_default(item) {
        return false;
    }
    matches!(is_optional(item), Some(false))
}

/// False whenever a default exists; otherwise `IsMandatory`.
pub fn is_mandatory(item: &JsonValue) -> bool {
    if has_default(item) {
        return false;
    }
    make_bool(get_dict_value(item, "IsMandatory")) == Some(true)
}

/// Build the normalized view of a descriptor. Unnamed descriptors yield `None`.
pub fn normalize(item: &JsonValue) -> Option<NormalizedParameter> {
    let name = get_name(item)?;
    let (min, max) = get_min_max(item);
    Some(NormalizedParameter {
        name,
        parameter_type: get_parameter_type(item),
        description: get_description(item),
        required: is_required(item),
        mandatory: is_mandatory(item),
        default: get_default_value(item),
        choices: get_enum(item),
        valid_values: get_valid_values(item),
        min,
        max,
        display_name: get_display_name(item),
        section: get_section(item),
        hidden: is_hidden(item),
        internal: is_internal(item),
        is_show: get_is_show(item),
    })
}

fn template_field(template: &JsonValue, key: &str) -> String {
    template
        .get(key)
        .and_then(text_of)
        .map(|text| clean_text(&text))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn get_template_name(template: &JsonValue) -> String {
    template_field(template, "name")
}

pub fn get_template_description(template: &JsonValue) -> String {
    template_field(template, "description")
}

pub fn get_template_tags(template: &JsonValue) -> String {
    template_field(template, "tags")
}

pub fn get_template_type(template: &JsonValue) -> String {
    template_field(template, "templateType")
}

pub fn get_template_subtype(template: &JsonValue) -> String {
    template_field(template, "templateSubType")
}

pub fn get_template_content_type(template: &JsonValue) -> String {
    template_field(template, "contentType")
}

pub fn get_template_supported_platforms(template: &JsonValue) -> String {
    template_field(template, "supportedPlatforms")
}
