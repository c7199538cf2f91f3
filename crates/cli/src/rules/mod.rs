// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule registry.
//!
//! Built-in rules:
//! - flat-example: conditional example titles outside any context
//! - single-level-context: nested context levels that flatten into siblings
//! - unnamed-subject: anonymous subject shared by several examples
//! - context-mutation: `before` hooks mutating inherited bindings
//! - prefer-change-matcher: manual before/after comparisons

pub mod context_mutation;
pub mod flat_example;
pub mod prefer_change_matcher;
pub mod single_level_context;
pub mod unnamed_subject;

use std::sync::Arc;

use crate::config::RuleConfig;
use crate::finding::Finding;
use crate::parser::SpecTree;

/// All rule ids in canonical order.
pub const RULE_IDS: &[&str] = &[
    flat_example::ID,
    single_level_context::ID,
    unnamed_subject::ID,
    context_mutation::ID,
    prefer_change_matcher::ID,
];

/// A single style rule.
///
/// Rules are pure: the same tree and config always yield the same findings.
pub trait Rule: Send + Sync {
    /// Unique identifier (e.g., "flat-example").
    fn id(&self) -> &'static str;

    /// One-line description for `speclint rules`.
    fn description(&self) -> &'static str;

    /// Evaluate the rule over a parsed file.
    fn check(&self, tree: &SpecTree, config: &RuleConfig) -> Vec<Finding>;
}

/// Create all registered rules.
pub fn all_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(flat_example::FlatExample),
        Arc::new(single_level_context::SingleLevelContext),
        Arc::new(unnamed_subject::UnnamedSubject),
        Arc::new(context_mutation::ContextMutation),
        Arc::new(prefer_change_matcher::PreferChangeMatcher),
    ]
}

/// Get a rule by id.
pub fn get_rule(id: &str) -> Option<Arc<dyn Rule>> {
    all_rules().into_iter().find(|r| r.id() == id)
}

/// Filter rules by `--only`/`--skip` selections.
///
/// With `only` non-empty, run just those rules; otherwise run all except `skip`.
pub fn filter_rules(only: &[String], skip: &[String]) -> Vec<Arc<dyn Rule>> {
    let all = all_rules();
    if !only.is_empty() {
        all.into_iter()
            .filter(|r| only.iter().any(|o| o == r.id()))
            .collect()
    } else {
        all.into_iter()
            .filter(|r| !skip.iter().any(|s| s == r.id()))
            .collect()
    }
}

/// Byte offsets where `name` appears as a bare identifier in `text`.
///
/// Method calls on other receivers (`x.name`), symbols, instance variables,
/// predicate or bang variants (`name?`), and hash labels (`name:`) are not
/// references.
pub(crate) fn references(text: &str, name: &str) -> Vec<usize> {
    if name.is_empty() {
        return Vec::new();
    }
    text.match_indices(name)
        .filter(|(at, _)| {
            let before = text[..*at].chars().next_back();
            let after = text[at + name.len()..].chars().next();
            let joined_before =
                before.is_some_and(|c| is_ident_char(c) || matches!(c, '.' | ':' | '@' | '$'));
            let joined_after =
                after.is_some_and(|c| is_ident_char(c) || matches!(c, '?' | '!' | ':'));
            !joined_before && !joined_after
        })
        .map(|(at, _)| at)
        .collect()
}

/// Whether `text` references `name` as a bare identifier.
pub(crate) fn mentions(text: &str, name: &str) -> bool {
    !references(text, name).is_empty()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
