// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parse helper functions for configuration.

use std::collections::BTreeMap;
use std::path::Path;

use super::duration::parse_duration;
use super::rules::option_keys;
use super::suggest::unknown_rule_message;
use super::{CheckConfig, ProjectConfig, RuleConfig};
use crate::finding::Severity;
use crate::rules::RULE_IDS;

/// Known project keys in the config.
const KNOWN_PROJECT_KEYS: &[&str] = &["include", "exclude"];

/// Known check keys in the config.
const KNOWN_CHECK_KEYS: &[&str] = &["timeout"];

/// Parse a TOML array of strings into a Vec<String>.
pub(super) fn parse_string_array(value: Option<&toml::Value>) -> Option<Vec<String>> {
    value?.as_array().map(|arr| {
        arr.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    })
}

/// Parse a TOML array of strings with a default function.
pub(super) fn parse_string_array_or_else<F>(value: Option<&toml::Value>, default: F) -> Vec<String>
where
    F: FnOnce() -> Vec<String>,
{
    parse_string_array(value).unwrap_or_else(default)
}

/// Warn about an unrecognized key.
pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "speclint: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

/// Parse `[project]`.
pub(super) fn parse_project_config(value: Option<&toml::Value>, path: &Path) -> ProjectConfig {
    let Some(toml::Value::Table(t)) = value else {
        return ProjectConfig::default();
    };

    for key in t.keys() {
        if !KNOWN_PROJECT_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("project.{key}"));
        }
    }

    ProjectConfig {
        include: parse_string_array_or_else(t.get("include"), ProjectConfig::default_include),
        exclude: parse_string_array_or_else(t.get("exclude"), Vec::new),
    }
}

/// Parse `[check]`.
pub(super) fn parse_check_config(
    value: Option<&toml::Value>,
    path: &Path,
) -> Result<CheckConfig, String> {
    let Some(toml::Value::Table(t)) = value else {
        return Ok(CheckConfig::default());
    };

    for key in t.keys() {
        if !KNOWN_CHECK_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("check.{key}"));
        }
    }

    let timeout = match t.get("timeout") {
        None => None,
        Some(toml::Value::String(s)) => {
            Some(parse_duration(s).map_err(|e| format!("check.timeout: {e}"))?)
        }
        Some(other) => {
            return Err(format!(
                "check.timeout: expected a duration string, found {}",
                other.type_str()
            ));
        }
    };

    Ok(CheckConfig { timeout })
}

/// Parse `[rules.<id>]` tables.
pub(super) fn parse_rules_config(
    value: Option<&toml::Value>,
    path: &Path,
) -> Result<BTreeMap<String, RuleConfig>, String> {
    let mut rules = BTreeMap::new();
    let Some(value) = value else {
        return Ok(rules);
    };
    let toml::Value::Table(t) = value else {
        return Err(format!("rules: expected a table, found {}", value.type_str()));
    };

    for (id, table) in t {
        if !RULE_IDS.contains(&id.as_str()) {
            return Err(unknown_rule_message(id));
        }
        let toml::Value::Table(table) = table else {
            return Err(format!("rules.{id}: expected a table, found {}", table.type_str()));
        };
        rules.insert(id.clone(), parse_rule_config(id, table, path)?);
    }

    Ok(rules)
}

fn parse_rule_config(id: &str, t: &toml::Table, path: &Path) -> Result<RuleConfig, String> {
    let mut config = RuleConfig::default();
    let options = option_keys(id);

    for (key, value) in t {
        match key.as_str() {
            "enabled" => {
                config.enabled = value
                    .as_bool()
                    .ok_or_else(|| format!("rules.{id}.enabled: expected a boolean"))?;
            }
            "severity" => {
                let name = value
                    .as_str()
                    .ok_or_else(|| format!("rules.{id}.severity: expected a string"))?;
                let severity = Severity::parse(name).ok_or_else(|| {
                    format!(
                        "rules.{id}.severity: invalid severity `{name}` (use info, warning, or error)"
                    )
                })?;
                config.severity = Some(severity);
            }
            key if !options.contains(&key) => {
                warn_unknown_key(path, &format!("rules.{id}.{key}"));
            }
            "connectives" => {
                config.connectives = string_list(id, key, value)?;
            }
            "mutators" => {
                config.mutators = string_list(id, key, value)?;
            }
            "min_levels" => {
                config.min_levels = positive(id, key, value, 2)?;
            }
            "min_siblings" => {
                config.min_siblings = positive(id, key, value, 1)?;
            }
            _ => warn_unknown_key(path, &format!("rules.{id}.{key}")),
        }
    }

    Ok(config)
}

fn string_list(id: &str, key: &str, value: &toml::Value) -> Result<Vec<String>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("rules.{id}.{key}: expected an array of strings"))?;
    items
        .iter()
        .map(|v| {
            v.as_str()
                .map(String::from)
                .ok_or_else(|| format!("rules.{id}.{key}: expected an array of strings"))
        })
        .collect()
}

fn positive(id: &str, key: &str, value: &toml::Value, min: i64) -> Result<usize, String> {
    match value.as_integer() {
        Some(n) if n >= min => Ok(n as usize),
        Some(n) => Err(format!("rules.{id}.{key}: must be at least {min}, found {n}")),
        None => Err(format!("rules.{id}.{key}: expected an integer")),
    }
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
