// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule evaluation over one parsed file.

use std::sync::Arc;

use crate::config::Config;
use crate::finding::{Finding, by_line_then_rule};
use crate::parser::SpecTree;
use crate::rules::Rule;

/// Evaluate `rules` against a tree.
///
/// Rules disabled in `config` are skipped. Each remaining rule sees the whole
/// tree and its own `[rules.<id>]` settings. Findings come back sorted by
/// line, then rule id.
pub fn evaluate(tree: &SpecTree, config: &Config, rules: &[Arc<dyn Rule>]) -> Vec<Finding> {
    let mut findings: Vec<Finding> = rules
        .iter()
        .filter_map(|rule| {
            let settings = config.rule(rule.id());
            if !settings.enabled {
                tracing::trace!("rule {} disabled", rule.id());
                return None;
            }
            Some(rule.check(tree, &settings))
        })
        .flatten()
        .collect();

    findings.sort_by(by_line_then_rule);
    findings
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
