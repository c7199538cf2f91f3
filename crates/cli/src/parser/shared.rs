// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared example templates.
//!
//! `shared_examples 'name' do |param| ... end` is parsed into a template
//! holding its body and parameter names. Each `it_behaves_like 'name', arg`
//! site instantiates the template with explicit arguments; instantiation is
//! a pure function of the template and the arguments.
//!
//! `it_behaves_like` nests the expansion in its own context, while
//! `include_examples`/`include_context` splice it into the including block.

use serde::Serialize;

use super::tree::{BlockKind, BlockNode, Span};

/// A parsed `shared_examples` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedTemplate {
    pub name: String,
    pub params: Vec<String>,
    /// Body parsed as a suite titled after the template.
    pub body: BlockNode,
}

/// An include site awaiting expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub name: String,
    pub args: Vec<String>,
    pub line: u32,
    /// Splice into the including block instead of nesting in a context.
    pub inline: bool,
}

impl SharedTemplate {
    /// Produce the nodes an include site contributes.
    ///
    /// Every returned node is marked `generated` and re-anchored at the
    /// include line. `#{param}` in titles is replaced by the argument text.
    pub fn instantiate(&self, args: &[String], line: u32) -> Vec<BlockNode> {
        let substitutions: Vec<(String, &str)> = self
            .params
            .iter()
            .zip(args)
            .map(|(param, arg)| (format!("#{{{param}}}"), arg.as_str()))
            .collect();

        self.body
            .children
            .iter()
            .map(|child| relocate(child, &substitutions, line))
            .collect()
    }
}

fn relocate(node: &BlockNode, substitutions: &[(String, &str)], line: u32) -> BlockNode {
    let mut title = node.title.clone();
    for (pattern, value) in substitutions {
        title = title.replace(pattern, super::lexer::unquote(value));
    }

    BlockNode {
        title,
        span: Span::line(line),
        children: node
            .children
            .iter()
            .map(|c| relocate(c, substitutions, line))
            .collect(),
        generated: true,
        includes_pending: Vec::new(),
        ..node.clone()
    }
}

/// Expand include sites recorded on `node` and its descendants.
///
/// Include sites are stored per node by the child index they precede.
/// Sites naming a template that is not defined in the file expand to nothing.
pub(crate) fn expand(node: &mut BlockNode, templates: &[SharedTemplate]) {
    for child in &mut node.children {
        expand(child, templates);
    }

    let includes = std::mem::take(&mut node.includes_pending);
    for (index, include) in includes.into_iter().rev() {
        let Some(template) = templates.iter().find(|t| t.name == include.name) else {
            tracing::debug!(
                "line {}: shared examples `{}` not defined in this file",
                include.line,
                include.name
            );
            continue;
        };

        let expansion = template.instantiate(&include.args, include.line);
        if include.inline {
            for binding in &template.body.bindings {
                if node.binding(&binding.name).is_none() {
                    node.bindings.push(binding.clone());
                }
            }
            node.hooks.extend(template.body.hooks.iter().cloned());
            let index = index.min(node.children.len());
            node.children.splice(index..index, expansion);
            continue;
        }

        let mut wrapper = BlockNode::new(
            BlockKind::Context,
            format!("behaves like {}", include.name),
            Span::line(include.line),
        );
        wrapper.literal_title = true;
        wrapper.generated = true;
        wrapper.bindings = template.body.bindings.clone();
        wrapper.hooks = template.body.hooks.clone();
        wrapper.children = expansion;
        let index = index.min(node.children.len());
        node.children.insert(index, wrapper);
    }
}

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;
