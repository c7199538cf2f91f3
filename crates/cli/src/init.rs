// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `speclint init` template and project detection.

use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE, RuleConfig, SUPPORTED_VERSION};
use crate::error::{Error, Result};
use crate::rules::{RULE_IDS, context_mutation, flat_example, single_level_context};

/// Conventional spec directory.
const SPEC_DIR: &str = "spec";

/// Include patterns for a project: scoped to `spec/` when it exists.
pub fn detect_include(root: &Path) -> Vec<String> {
    if root.join(SPEC_DIR).is_dir() {
        vec![format!("{SPEC_DIR}/**/*_spec.rb")]
    } else {
        vec!["**/*_spec.rb".to_string()]
    }
}

/// Render a speclint.toml listing every rule with its default settings.
pub fn default_template(include: &[String]) -> String {
    let defaults = RuleConfig::default();

    let mut lines = vec![
        format!("version = {SUPPORTED_VERSION}"),
        String::new(),
        "[project]".to_string(),
        format!("include = {}", toml_list(include)),
        "exclude = []".to_string(),
        String::new(),
        "[check]".to_string(),
        "# timeout = \"5s\"".to_string(),
    ];

    for &id in RULE_IDS {
        lines.push(String::new());
        lines.push(format!("[rules.{id}]"));
        lines.push("enabled = true".to_string());
        lines.push(format!("severity = \"{}\"", defaults.base_severity()));
        match id {
            flat_example::ID => {
                lines.push(format!("connectives = {}", toml_list(&defaults.connectives)));
            }
            single_level_context::ID => {
                lines.push(format!("min_levels = {}", defaults.min_levels));
                lines.push(format!("min_siblings = {}", defaults.min_siblings));
            }
            context_mutation::ID => {
                lines.push(format!("mutators = {}", toml_list(&defaults.mutators)));
            }
            _ => {}
        }
    }

    // Trailing newline
    lines.push(String::new());
    lines.join("\n")
}

/// Write `speclint.toml` into `root`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn write_config(root: &Path, force: bool) -> Result<PathBuf> {
    let path = root.join(CONFIG_FILE);
    if path.exists() && !force {
        return Err(Error::Config {
            message: format!("{CONFIG_FILE} already exists. Use --force to overwrite."),
            path: Some(path),
        });
    }

    let content = default_template(&detect_include(root));
    std::fs::write(&path, content).map_err(|e| Error::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

fn toml_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("{s:?}")).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
