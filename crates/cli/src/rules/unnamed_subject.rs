// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unnamed subject rule.
//!
//! An anonymous `subject { ... }` read by several examples makes each of them
//! say `subject` instead of what the value is. When one example runs it for
//! its side effect and another calls it again to inspect the result, the
//! reader cannot tell whether the second call repeats the side effect.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::{Rule, mentions};
use crate::config::RuleConfig;
use crate::finding::Finding;
use crate::parser::{Binding, BindingKind, SUBJECT, SpecTree, scope};

pub const ID: &str = "unnamed-subject";

/// `expect { subject }` and friends.
#[allow(clippy::expect_used)]
static BLOCK_INVOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\s*subject\s*\}").expect("valid regex"));

/// `expect(subject...)`, `subject.foo`, `subject[...]`.
#[allow(clippy::expect_used)]
static QUERY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:expect\(\s*subject\b|\bsubject\s*(?:&?\.|\[))").expect("valid regex")
});

/// `Foo::Bar.new(...)` at the start of a subject expression.
#[allow(clippy::expect_used)]
static CONSTRUCTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z][A-Za-z0-9_]*::)*([A-Z][A-Za-z0-9_]*)\.new\b").expect("valid regex")
});

pub struct UnnamedSubject;

/// How one example uses the subject.
#[derive(Debug, Default, Clone, Copy)]
struct Usage {
    side_effect: bool,
    query: bool,
}

impl Rule for UnnamedSubject {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Anonymous subject referenced by more than one example"
    }

    fn check(&self, tree: &SpecTree, config: &RuleConfig) -> Vec<Finding> {
        // Keyed by declaration line; each entry lists (example line, usage).
        let mut uses: BTreeMap<u32, (&Binding, Vec<(u32, Usage)>)> = BTreeMap::new();

        for source in tree.sources() {
            scope::walk(source, &mut |node, scope| {
                if !node.is_example() || node.generated {
                    return;
                }
                let Some(resolved) = scope.subject() else {
                    return;
                };
                if resolved.binding.kind != BindingKind::Subject || resolved.block.generated {
                    return;
                }
                let Some(usage) = classify(node.body.iter().map(|s| s.text.as_str())) else {
                    return;
                };
                uses.entry(resolved.binding.line)
                    .or_insert_with(|| (resolved.binding, Vec::new()))
                    .1
                    .push((node.span.start, usage));
            });
        }

        uses.into_values()
            .filter(|(_, examples)| examples.len() > 1)
            .map(|(binding, examples)| {
                let mixed = examples.iter().any(|(line, usage)| {
                    usage.side_effect
                        && examples
                            .iter()
                            .any(|(other, u)| other != line && u.query)
                });

                let mut severity = config.base_severity();
                let mut message = format!(
                    "anonymous subject is referenced by {} examples; give it a name",
                    examples.len()
                );
                if mixed {
                    severity = severity.escalate();
                    message.push_str(
                        " (one example runs it for its side effect and another calls it again for its result)",
                    );
                }

                Finding::new(ID, binding.line, message)
                    .with_severity(severity)
                    .with_suggestion(format!(
                        "subject(:{}) {{ {} }}",
                        suggest_name(&binding.expr),
                        binding.expr
                    ))
            })
            .collect()
    }
}

/// Classify explicit `subject` references in an example body.
///
/// `is_expected` is not an explicit reference.
fn classify<'s>(statements: impl Iterator<Item = &'s str>) -> Option<Usage> {
    let mut usage: Option<Usage> = None;
    for text in statements {
        if !mentions(text, SUBJECT) {
            continue;
        }
        let entry = usage.get_or_insert_with(Usage::default);
        if text.trim() == SUBJECT || BLOCK_INVOCATION.is_match(text) {
            entry.side_effect = true;
        }
        if QUERY.is_match(text) {
            entry.query = true;
        }
    }
    usage
}

/// Name hint derived from the subject expression.
fn suggest_name(expr: &str) -> String {
    CONSTRUCTOR
        .captures(expr.trim())
        .map(|c| snake_case(&c[1]))
        .unwrap_or_else(|| "result".to_string())
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "unnamed_subject_tests.rs"]
mod tests;
