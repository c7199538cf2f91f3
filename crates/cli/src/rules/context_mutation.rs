// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Context mutation rule.
//!
//! ```ruby
//! let(:book) { Book.new }
//!
//! context 'when reserved' do
//!   before { book.reserve! }       # flagged
//!   let(:book) { Book.new(reserved: true) }   # preferred
//! end
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::Rule;
use crate::config::RuleConfig;
use crate::finding::Finding;
use crate::parser::{HookKind, SpecTree, Statement, scope};

pub const ID: &str = "context-mutation";

/// Method names treated as mutating even without a `!` suffix.
pub const DEFAULT_MUTATORS: &[&str] = &[
    "update",
    "update_attribute",
    "update_attributes",
    "update_column",
    "update_columns",
    "assign_attributes",
    "save",
    "destroy",
    "delete",
    "toggle",
    "increment",
    "decrement",
    "push",
    "pop",
    "shift",
    "unshift",
    "append",
    "prepend",
    "insert",
    "concat",
    "clear",
    "replace",
    "merge!",
    "store",
];

/// `receiver.method(.method)*` with an optional trailing attribute assignment.
#[allow(clippy::expect_used)]
static CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^A-Za-z0-9_.@:$])([a-z_][A-Za-z0-9_]*)((?:\s*&?\.\s*[a-z_][A-Za-z0-9_]*[!?]?)+)(\s*=[^=~>])?",
    )
    .expect("valid regex")
});

/// `receiver << value` and `receiver[key] = value`.
#[allow(clippy::expect_used)]
static OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_.@:$])([a-z_][A-Za-z0-9_]*)\s*(<<|\[[^\]]*\]\s*=[^=~>])")
        .expect("valid regex")
});

/// `local = value` at the start of a statement.
#[allow(clippy::expect_used)]
static LOCAL_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z_][A-Za-z0-9_]*)\s*=[^=~>]").expect("valid regex")
});

pub struct ContextMutation;

/// A mutating call found in a hook statement.
#[derive(Debug, PartialEq, Eq)]
pub struct Mutation {
    pub receiver: String,
    pub method: String,
}

impl Rule for ContextMutation {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "before hook mutates a value bound by an enclosing block"
    }

    fn check(&self, tree: &SpecTree, config: &RuleConfig) -> Vec<Finding> {
        let mut findings = Vec::new();

        for source in tree.sources() {
            scope::walk(source, &mut |node, scope| {
                if node.generated {
                    return;
                }
                for hook in node.hooks.iter().filter(|h| h.kind == HookKind::Before) {
                    let mut locals = HashSet::new();
                    for statement in &hook.body {
                        for mutation in mutations(statement, &config.mutators) {
                            if locals.contains(&mutation.receiver) {
                                continue;
                            }
                            let Some(resolved) = scope.lookup(&mutation.receiver) else {
                                continue;
                            };
                            if resolved.distance == 0 {
                                continue;
                            }
                            findings.push(
                                Finding::new(
                                    ID,
                                    statement.line,
                                    format!(
                                        "`before` hook mutates `{}` (bound at line {}) with `{}`; \
                                         override the binding in this context instead",
                                        mutation.receiver, resolved.binding.line, mutation.method
                                    ),
                                )
                                .with_severity(config.base_severity())
                                .with_suggestion(format!(
                                    "let(:{}) {{ ... }}",
                                    mutation.receiver
                                )),
                            );
                        }
                        if let Some(c) = LOCAL_ASSIGN.captures(&statement.text) {
                            locals.insert(c[1].to_string());
                        }
                    }
                }
            });
        }

        findings
    }
}

/// Mutating calls in a statement, in order of appearance.
///
/// A call mutates when the method ends in `!`, is listed in `mutators`, or is
/// an attribute assignment (`book.title = ...`). `<<` and index assignment
/// also mutate.
pub fn mutations(statement: &Statement, mutators: &[String]) -> Vec<Mutation> {
    let text = statement.text.as_str();
    let mut found: Vec<(usize, Mutation)> = Vec::new();

    for c in CALL.captures_iter(text) {
        let chain: Vec<&str> = c[2]
            .split('.')
            .map(|m| m.trim().trim_end_matches('&').trim())
            .filter(|m| !m.is_empty())
            .collect();
        let assigns = c.get(3).is_some();

        let method = chain
            .iter()
            .find(|m| m.ends_with('!') || mutators.iter().any(|x| x == *m))
            .map(|m| m.to_string())
            .or_else(|| {
                assigns
                    .then(|| chain.last().map(|m| format!("{m}=")))
                    .flatten()
            });

        if let Some(method) = method {
            found.push((
                c.get(1).map_or(0, |m| m.start()),
                Mutation {
                    receiver: c[1].to_string(),
                    method,
                },
            ));
        }
    }

    for c in OPERATOR.captures_iter(text) {
        let op = &c[2];
        found.push((
            c.get(1).map_or(0, |m| m.start()),
            Mutation {
                receiver: c[1].to_string(),
                method: if op == "<<" { "<<".to_string() } else { "[]=".to_string() },
            },
        ));
    }

    found.sort_by_key(|(at, _)| *at);
    found.into_iter().map(|(_, m)| m).collect()
}

#[cfg(test)]
#[path = "context_mutation_tests.rs"]
mod tests;
