// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Prefer-change-matcher rule.
//!
//! Capturing a value, acting, then comparing against the captured value:
//!
//! ```ruby
//! count = Book.count
//! Book.create(title: 'Dune')
//! expect(Book.count).to eq(count + 1)
//! ```
//!
//! reads better as `expect { Book.create(title: 'Dune') }.to change { Book.count }.by(1)`.

use std::sync::LazyLock;

use regex::Regex;

use super::{Rule, mentions};
use crate::config::RuleConfig;
use crate::finding::Finding;
use crate::parser::{BlockNode, SpecTree, Statement, scope};

pub const ID: &str = "prefer-change-matcher";

/// `name = expression` (not `==`, `=~` or `=>`).
#[allow(clippy::expect_used)]
static CAPTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z_][A-Za-z0-9_]*)\s*=\s*([^=~>].*)$").expect("valid regex")
});

pub struct PreferChangeMatcher;

/// A manual before/after comparison inside one example.
#[derive(Debug, PartialEq, Eq)]
pub struct Comparison {
    /// Line of the captured value.
    pub line: u32,
    pub variable: String,
    pub expression: String,
    /// Statements between the capture and the assertion.
    pub actions: Vec<String>,
    /// Difference asserted with `eq(var + n)`, if any.
    pub delta: Option<i64>,
}

impl Rule for PreferChangeMatcher {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Manual before/after comparison instead of the change matcher"
    }

    fn check(&self, tree: &SpecTree, config: &RuleConfig) -> Vec<Finding> {
        let mut findings = Vec::new();

        for source in tree.sources() {
            scope::walk(source, &mut |node, _| {
                if !node.is_example() || node.generated || uses_change(node) {
                    return;
                }
                for comparison in comparisons(&node.body) {
                    let mut suggestion = format!(
                        "expect {{ {} }}.to change {{ {} }}",
                        comparison.actions.join("; "),
                        comparison.expression
                    );
                    if let Some(delta) = comparison.delta {
                        suggestion.push_str(&format!(".by({delta})"));
                    }
                    findings.push(
                        Finding::new(
                            ID,
                            comparison.line,
                            format!(
                                "compares `{}` against the value captured in `{}`; use the change matcher",
                                comparison.expression, comparison.variable
                            ),
                        )
                        .with_severity(config.base_severity())
                        .with_suggestion(suggestion),
                    );
                }
            });
        }

        findings
    }
}

fn uses_change(example: &BlockNode) -> bool {
    example.matchers.iter().any(|m| m == "change")
}

/// Find capture-act-compare sequences in an example body.
pub fn comparisons(body: &[Statement]) -> Vec<Comparison> {
    let mut out = Vec::new();

    for (i, capture) in body.iter().enumerate() {
        let Some(c) = CAPTURE.captures(capture.text.trim()) else {
            continue;
        };
        let variable = &c[1];
        let expression = normalize(&c[2]);
        // Only method calls are watched.
        if !expression.contains('.') && !expression.contains('(') {
            continue;
        }

        let later = &body[i + 1..];
        let Some(offset) = later
            .iter()
            .position(|s| asserts_against(&s.text, &expression, variable))
        else {
            continue;
        };
        let assertion = &later[offset];

        out.push(Comparison {
            line: capture.line,
            variable: variable.to_string(),
            actions: later[..offset].iter().map(|s| s.text.clone()).collect(),
            delta: delta(&assertion.text, variable),
            expression,
        });
    }

    out
}

/// Whether `text` is `expect(expression)` with a matcher mentioning `variable`.
fn asserts_against(text: &str, expression: &str, variable: &str) -> bool {
    let text = normalize(text);
    let needle = format!("expect({expression})");
    match text.find(&needle) {
        Some(at) => mentions(&text[at + needle.len()..], variable),
        None => false,
    }
}

/// `eq(var + n)` / `eq(var - n)` as a signed delta.
fn delta(text: &str, variable: &str) -> Option<i64> {
    let text = normalize(text);
    let pattern = format!(
        r"eq\(?\s*{}\s*([+-])\s*([0-9]+)\s*\)?",
        regex::escape(variable)
    );
    let re = Regex::new(&pattern).ok()?;
    let c = re.captures(&text)?;
    let n: i64 = c[2].parse().ok()?;
    Some(if &c[1] == "-" { -n } else { n })
}

/// Collapse whitespace so multi-line expressions compare equal.
fn normalize(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .replace("( ", "(")
        .replace(" )", ")")
        .replace(" .", ".")
        .replace(". ", ".")
}

#[cfg(test)]
#[path = "prefer_change_matcher_tests.rs"]
mod tests;
