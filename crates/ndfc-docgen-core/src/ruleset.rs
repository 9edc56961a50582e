//! Visibility rules from `annotations.IsShow`.
//!
//! Controller templates show or hide a parameter depending on the values of
//! others, e.g. `$$REPLICATION_MODE$$=="Multicast" && $$ENABLE_TRM$$==true`.
//! This module rewrites those rules in terms of the documented option names.
//! Pure conjunctions become a list of conditions; anything mixing `and` with
//! `or`, or using parentheses, is kept as normalized text.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::builders::{build_translation, is_documented, DocStyle, SuboptionContext};
use crate::template::normalize;
use crate::template::NdfcTemplate;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

const REWRITES: &[(&str, &str)] = &[
    ("$$", ""),
    ("\\\"", ""),
    ("\\'", ""),
    ("&&", " and "),
    ("||", " or "),
    ("==", " == "),
    ("!=", " != "),
    ("(", " ( "),
    (")", " ) "),
];

/// `lhs op rhs`, where `op` is `==` or `!=`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub lhs: String,
    pub op: String,
    pub rhs: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rule {
    /// Every condition must hold
    All(Vec<Condition>),
    Expression(String),
}

/// Rewrite a raw `IsShow` rule into space separated tokens.
pub fn normalize_rule(raw: &str) -> String {
    let mut rule = raw.to_string();
    for (from, to) in REWRITES {
        rule = rule.replace(from, to);
    }
    let rule = WHITESPACE_RE.replace_all(&rule, " ");
    let rule = rule.trim();
    rule.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(rule)
        .trim()
        .to_string()
}

fn parse_condition(part: &str, translation: &HashMap<String, String>) -> Option<Condition> {
    let tokens: Vec<&str> = part.split_whitespace().collect();
    let [lhs, op, rhs] = tokens.as_slice() else {
        return None;
    };
    if *op != "==" && *op != "!=" {
        return None;
    }
    Some(Condition {
        lhs: translation
            .get(*lhs)
            .cloned()
            .unwrap_or_else(|| lhs.to_string()),
        op: op.to_string(),
        rhs: rhs.trim_matches(|c| c == '"' || c == '\'').to_string(),
    })
}

/// Parse a raw rule, translating parameter names through `translation`.
pub fn parse_rule(raw: &str, translation: &HashMap<String, String>) -> Rule {
    let rule = normalize_rule(raw);
    let tokens: Vec<&str> = rule.split_whitespace().collect();

    if !tokens.contains(&"or") {
        let conditions: Option<Vec<Condition>> = rule
            .split(" and ")
            .map(|part| parse_condition(part, translation))
            .collect();
        if let Some(conditions) = conditions {
            return Rule::All(conditions);
        }
    }

    let translated: Vec<&str> = tokens
        .iter()
        .map(|token| translation.get(*token).map_or(*token, String::as_str))
        .collect();
    Rule::Expression(translated.join(" "))
}

/// Rules for every documented parameter that carries one, keyed by option name.
pub fn build_ruleset(
    template: &NdfcTemplate,
    style: DocStyle,
) -> crate::Result<BTreeMap<String, Rule>> {
    let parameters = template.parameters()?;
    let builder = SuboptionContext::get_builder(style);
    let translation = build_translation(parameters, builder.as_ref());

    let mut ruleset = BTreeMap::new();
    for item in parameters.iter().filter(|item| is_documented(item)) {
        let (Some(name), Some(raw)) = (normalize::get_name(item), normalize::get_is_show(item))
        else {
            continue;
        };
        let Some(option) = translation.get(&name) else {
            log::warn!("Skipping rule for untranslated parameter {name}");
            continue;
        };
        let rule = parse_rule(&raw, &translation);
        log::debug!("{option}: {rule:?}");
        ruleset.insert(option.clone(), rule);
    }
    Ok(ruleset)
}
