// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Block tree produced by the parser.

use serde::Serialize;

use super::shared::{Include, SharedTemplate};

/// Kind of a block node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// `describe` groups (and the synthetic file root).
    Suite,
    /// `context` groups.
    Context,
    /// `it`/`specify`/`example` leaves.
    Example,
}

/// Inclusive line range of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn line(line: u32) -> Self {
        Self::new(line, line)
    }
}

/// How a binding was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// `let(:name)`
    Let,
    /// `let!(:name)`
    EagerLet,
    /// `subject { ... }`
    Subject,
    /// `subject(:name) { ... }`
    NamedSubject,
}

impl BindingKind {
    pub fn is_subject(self) -> bool {
        matches!(self, BindingKind::Subject | BindingKind::NamedSubject)
    }
}

/// A lazily evaluated value declared in a block scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub name: String,
    /// Defining expression text.
    pub expr: String,
    pub kind: BindingKind,
    pub line: u32,
}

/// Name every subject declaration answers to.
pub const SUBJECT: &str = "subject";

/// One source statement with its line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub line: u32,
    pub text: String,
}

/// Hook kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    Before,
    After,
    Around,
}

/// A `before`/`after`/`around` hook declared on a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hook {
    pub kind: HookKind,
    pub line: u32,
    pub body: Vec<Statement>,
}

/// A `describe`/`context`/example unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockNode {
    pub kind: BlockKind,
    /// Title text; unquoted for string literals, raw source otherwise.
    pub title: String,
    /// Whether the title was a plain string literal.
    pub literal_title: bool,
    pub span: Span,
    pub children: Vec<BlockNode>,
    pub bindings: Vec<Binding>,
    pub hooks: Vec<Hook>,
    /// Other block-level statements (helper methods, includes, config).
    pub setup: Vec<Statement>,
    /// Example body statements (examples only).
    pub body: Vec<Statement>,
    /// Matcher names used in the example body, in order of appearance.
    pub matchers: Vec<String>,
    /// Produced by expanding a shared template rather than written here.
    pub generated: bool,
    /// Include sites (child index, include) awaiting template expansion.
    #[serde(skip)]
    pub(crate) includes_pending: Vec<(usize, Include)>,
}

impl BlockNode {
    pub fn new(kind: BlockKind, title: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            title: title.into(),
            literal_title: false,
            span,
            children: Vec::new(),
            bindings: Vec::new(),
            hooks: Vec::new(),
            setup: Vec::new(),
            body: Vec::new(),
            matchers: Vec::new(),
            generated: false,
            includes_pending: Vec::new(),
        }
    }

    pub fn is_example(&self) -> bool {
        self.kind == BlockKind::Example
    }

    pub fn is_context(&self) -> bool {
        self.kind == BlockKind::Context
    }

    /// Direct binding declared under `name`.
    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    /// Nearest subject declared directly on this block.
    pub fn subject(&self) -> Option<&Binding> {
        self.bindings.iter().rev().find(|b| b.kind.is_subject())
    }

    /// Declare a binding, replacing an earlier one with the same name.
    pub(crate) fn declare(&mut self, binding: Binding) {
        match self.bindings.iter_mut().find(|b| b.name == binding.name) {
            Some(existing) => {
                tracing::debug!(
                    "line {}: `{}` redeclared in the same block",
                    binding.line,
                    binding.name
                );
                *existing = binding;
            }
            None => self.bindings.push(binding),
        }
    }

    /// Direct example children.
    pub fn examples(&self) -> impl Iterator<Item = &BlockNode> {
        self.children.iter().filter(|c| c.is_example())
    }

    /// All nodes in this subtree in pre-order, including `self`.
    pub fn descendants(&self) -> Vec<&BlockNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Number of examples written in the source (excludes template expansions).
    pub fn declared_example_count(&self) -> usize {
        self.descendants()
            .into_iter()
            .filter(|n| n.is_example() && !n.generated)
            .count()
    }
}

/// Result of parsing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecTree {
    /// Synthetic suite spanning the whole file.
    pub root: BlockNode,
    /// `shared_examples` definitions found in the file.
    pub templates: Vec<SharedTemplate>,
}

impl SpecTree {
    /// The root followed by every template body, for rules that inspect
    /// written code rather than expansions.
    pub fn sources(&self) -> impl Iterator<Item = &BlockNode> {
        std::iter::once(&self.root).chain(self.templates.iter().map(|t| &t.body))
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
