// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Flat example rule.
//!
//! An example titled "raises an error when already reserved" that is not
//! inside any `context` hides a condition in its title. The condition
//! belongs in a `context 'when already reserved'` wrapping the example.

use super::Rule;
use crate::config::RuleConfig;
use crate::finding::Finding;
use crate::parser::{BlockNode, SpecTree, scope};

pub const ID: &str = "flat-example";

/// Connective words that introduce a condition.
pub const DEFAULT_CONNECTIVES: &[&str] = &["when", "if", "unless", "while"];

pub struct FlatExample;

impl Rule for FlatExample {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Example title hides a condition that belongs in a context"
    }

    fn check(&self, tree: &SpecTree, config: &RuleConfig) -> Vec<Finding> {
        let mut findings = Vec::new();

        for source in tree.sources() {
            scope::walk(source, &mut |node, scope| {
                if !node.is_example() || node.generated || !node.literal_title {
                    return;
                }
                if scope.blocks().skip(1).any(BlockNode::is_context) {
                    return;
                }
                let Some(split) = split_title(&node.title, &config.connectives) else {
                    return;
                };

                let mut finding = Finding::new(
                    ID,
                    node.span.start,
                    format!(
                        "example title hides the condition `{}`; move it into a context",
                        split.clause
                    ),
                )
                .with_severity(config.base_severity());
                if !split.rest.is_empty() {
                    finding = finding.with_suggestion(format!(
                        "context '{}' do\n  it '{}' do",
                        split.clause, split.rest
                    ));
                }
                findings.push(finding);
            });
        }

        findings
    }
}

/// A title split into its conditional clause and the remaining description.
#[derive(Debug, PartialEq, Eq)]
pub struct TitleSplit {
    pub clause: String,
    pub rest: String,
}

/// Find the first conditional clause in a title.
///
/// The clause runs from the connective to the next comma or the end of the
/// title. A connective with nothing after it is not a clause.
pub fn split_title(title: &str, connectives: &[String]) -> Option<TitleSplit> {
    let words: Vec<&str> = title.split_whitespace().collect();

    let start = words.iter().position(|word| {
        let bare = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
        connectives.iter().any(|c| c.eq_ignore_ascii_case(&bare))
    })?;

    let end = words[start..]
        .iter()
        .position(|w| w.ends_with(','))
        .map_or(words.len(), |i| start + i + 1);

    let clause_words = &words[start + 1..end];
    if clause_words.iter().all(|w| w.trim_matches(',').is_empty()) {
        return None;
    }

    let clause = words[start..end].join(" ").trim_end_matches(',').to_string();
    let rest = words[..start]
        .iter()
        .chain(&words[end..])
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(',')
        .to_string();

    Some(TitleSplit { clause, rest })
}

#[cfg(test)]
#[path = "flat_example_tests.rs"]
mod tests;
