// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-rule configuration (`[rules.<id>]` tables).

use crate::finding::Severity;
use crate::rules::{context_mutation, flat_example, single_level_context};

/// Settings for one rule.
///
/// Every rule reads `enabled` and `severity`; the remaining fields only
/// matter to the rule that owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    /// Whether the rule runs (default: true).
    pub enabled: bool,

    /// Severity override (default: warning).
    pub severity: Option<Severity>,

    /// flat-example: words that introduce a condition.
    pub connectives: Vec<String>,

    /// single-level-context: nested levels needed before flagging.
    pub min_levels: usize,

    /// single-level-context: sibling contexts needed at each level.
    pub min_siblings: usize,

    /// context-mutation: non-`!` method names that mutate.
    pub mutators: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
            connectives: to_strings(flat_example::DEFAULT_CONNECTIVES),
            min_levels: single_level_context::DEFAULT_MIN_LEVELS,
            min_siblings: single_level_context::DEFAULT_MIN_SIBLINGS,
            mutators: to_strings(context_mutation::DEFAULT_MUTATORS),
        }
    }
}

impl RuleConfig {
    /// Severity findings start from before any rule-specific escalation.
    pub fn base_severity(&self) -> Severity {
        self.severity.unwrap_or_default()
    }
}

/// Option keys accepted in a rule's table, beyond `enabled` and `severity`.
pub(super) fn option_keys(rule: &str) -> &'static [&'static str] {
    match rule {
        flat_example::ID => &["connectives"],
        single_level_context::ID => &["min_levels", "min_siblings"],
        context_mutation::ID => &["mutators"],
        _ => &[],
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
