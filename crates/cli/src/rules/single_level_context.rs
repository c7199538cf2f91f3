// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-level context rule.
//!
//! Nested contexts that only set bindings multiply into a grid:
//!
//! ```text
//! context 'when admin'        context 'when guest'
//!   context 'when active'       context 'when active'
//!   context 'when locked'       context 'when locked'
//! ```
//!
//! Every path down to the examples is one combination of bindings, so the
//! nesting flattens into sibling contexts (`when admin and active`, ...)
//! without changing what each example sees.

use std::collections::BTreeSet;

use super::Rule;
use crate::config::RuleConfig;
use crate::finding::Finding;
use crate::parser::{BlockNode, SpecTree};

pub const ID: &str = "single-level-context";

pub const DEFAULT_MIN_LEVELS: usize = 2;
pub const DEFAULT_MIN_SIBLINGS: usize = 2;

pub struct SingleLevelContext;

impl Rule for SingleLevelContext {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Nested binding-only contexts that flatten into sibling contexts"
    }

    fn check(&self, tree: &SpecTree, config: &RuleConfig) -> Vec<Finding> {
        let mut findings = Vec::new();
        for source in tree.sources() {
            visit(source, config, &mut findings);
        }
        findings
    }
}

fn visit(node: &BlockNode, config: &RuleConfig, out: &mut Vec<Finding>) {
    if node.generated || node.is_example() {
        return;
    }

    if let Some(levels) = grid_levels(node, config)
        && levels >= config.min_levels
    {
        let combinations = combinations(node);
        let mut suggestion = String::new();
        for combination in &combinations {
            suggestion.push_str(&format!("context '{combination}' do ... end\n"));
        }
        out.push(
            Finding::new(
                ID,
                node.span.start,
                format!(
                    "{levels} levels of nested contexts only vary bindings; \
                     flatten them into {} sibling contexts",
                    combinations.len()
                ),
            )
            .with_severity(config.base_severity())
            .with_suggestion(suggestion.trim_end().to_string()),
        );
        // The whole grid is reported once.
        return;
    }

    for child in &node.children {
        visit(child, config, out);
    }
}

/// Levels of the context grid directly below `node`, if it has one.
fn grid_levels(node: &BlockNode, config: &RuleConfig) -> Option<usize> {
    let height = uniform_height(node, config)?;
    Some(height + 1)
}

/// Common height of `node`'s context children.
///
/// Requires at least `min_siblings` children, all of them contexts
/// written in this file, all varying the same non-empty set of bindings,
/// and all of equal height.
fn uniform_height(node: &BlockNode, config: &RuleConfig) -> Option<usize> {
    let contexts: Vec<&BlockNode> = node.children.iter().filter(|c| c.is_context()).collect();
    if contexts.len() < config.min_siblings || contexts.iter().any(|c| c.generated) {
        return None;
    }

    let mut varied = contexts.iter().map(|c| binding_names(c));
    let first = varied.next()?;
    if first.is_empty() || !varied.all(|names| names == first) {
        return None;
    }

    let mut heights = contexts.iter().map(|c| height(c, config));
    let first = heights.next()??;
    heights
        .all(|h| h == Some(first))
        .then_some(first)
}

/// Height of a context within a grid: 0 for a leaf, 1 + child height for
/// an intermediate level, `None` when the context breaks the grid.
fn height(context: &BlockNode, config: &RuleConfig) -> Option<usize> {
    let has_child_contexts = context.children.iter().any(|c| c.is_context());

    if !has_child_contexts {
        // Leaf level: something must run here.
        return context.examples().next().map(|_| 0);
    }

    let binding_only = context.hooks.is_empty()
        && context.setup.is_empty()
        && context.subject().is_none()
        && context
            .children
            .iter()
            .all(|c| c.is_context() && !c.generated);
    if !binding_only {
        return None;
    }

    uniform_height(context, config).map(|h| h + 1)
}

/// Names of the non-subject bindings a context declares.
fn binding_names(context: &BlockNode) -> BTreeSet<&str> {
    context
        .bindings
        .iter()
        .filter(|b| !b.kind.is_subject())
        .map(|b| b.name.as_str())
        .collect()
}

/// Titles of every path from `node`'s children down to a leaf context.
fn combinations(node: &BlockNode) -> Vec<String> {
    let mut out = Vec::new();
    for child in node.children.iter().filter(|c| c.is_context()) {
        collect(child, &mut Vec::new(), &mut out);
    }
    out
}

fn collect<'a>(node: &'a BlockNode, path: &mut Vec<&'a str>, out: &mut Vec<String>) {
    path.push(&node.title);
    let contexts: Vec<&BlockNode> = node.children.iter().filter(|c| c.is_context()).collect();
    if contexts.is_empty() {
        out.push(join_titles(path));
    } else {
        for child in contexts {
            collect(child, path, out);
        }
    }
    path.pop();
}

/// Join context titles, dropping a leading word the first title already used.
///
/// `["when admin", "when active"]` becomes `"when admin and active"`.
pub fn join_titles(titles: &[&str]) -> String {
    let Some((first, rest)) = titles.split_first() else {
        return String::new();
    };
    let lead = first.split_whitespace().next().unwrap_or_default();

    let mut joined = first.to_string();
    for &title in rest {
        let trimmed = match title.split_once(' ') {
            Some((word, tail)) if word.eq_ignore_ascii_case(lead) && !tail.is_empty() => tail,
            _ => title,
        };
        joined.push_str(" and ");
        joined.push_str(trimmed);
    }
    joined
}

#[cfg(test)]
#[path = "single_level_context_tests.rs"]
mod tests;
