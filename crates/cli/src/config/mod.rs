// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles speclint.toml parsing with version validation, rule id checks,
//! and unknown key warnings.

mod duration;
mod parse;
mod rules;
mod suggest;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

pub use duration::parse_duration;
pub use rules::RuleConfig;
pub use suggest::{suggest_rule_id, unknown_rule_message};

use crate::error::{Error, Result};
use parse::{parse_check_config, parse_project_config, parse_rules_config, warn_unknown_key};

/// Name of the config file looked up by discovery.
pub const CONFIG_FILE: &str = "speclint.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "project", "check", "rules"];

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    project: Option<toml::Value>,

    #[serde(default)]
    check: Option<toml::Value>,

    #[serde(default)]
    rules: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Which files to analyse.
    pub project: ProjectConfig,

    /// Run-wide analysis settings.
    pub check: CheckConfig,

    /// Per-rule settings keyed by rule id. Rules without an entry use defaults.
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            project: ProjectConfig::default(),
            check: CheckConfig::default(),
            rules: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Settings for a rule, falling back to defaults.
    pub fn rule(&self, id: &str) -> Cow<'_, RuleConfig> {
        match self.rules.get(id) {
            Some(config) => Cow::Borrowed(config),
            None => Cow::Owned(RuleConfig::default()),
        }
    }
}

/// Project-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Glob patterns selecting spec files (default: `**/*_spec.rb`).
    pub include: Vec<String>,

    /// Glob patterns excluded from analysis.
    pub exclude: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            include: Self::default_include(),
            exclude: Vec::new(),
        }
    }
}

impl ProjectConfig {
    pub(crate) fn default_include() -> Vec<String> {
        vec!["**/*_spec.rb".to_string()]
    }
}

/// `[check]` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckConfig {
    /// Per-file analysis budget (None = unlimited).
    pub timeout: Option<Duration>,
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config content, warning on unknown keys.
///
/// Unknown rule ids, invalid severities and invalid thresholds are errors;
/// unknown keys elsewhere only warn.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    let version = flexible
        .version
        .ok_or_else(|| config_error("missing required field: version".to_string()))?;

    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})\n  Upgrade speclint to use this config.",
            version, SUPPORTED_VERSION
        )));
    }

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    let project = parse_project_config(flexible.project.as_ref(), path);
    let check = parse_check_config(flexible.check.as_ref(), path).map_err(config_error)?;
    let rules = parse_rules_config(flexible.rules.as_ref(), path).map_err(config_error)?;

    Ok(Config {
        version,
        project,
        check,
        rules,
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
