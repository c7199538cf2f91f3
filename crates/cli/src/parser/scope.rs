// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lexical scope chain over the block tree.
//!
//! A binding declared on a block is visible to that block and every
//! descendant unless a descendant re-declares the same name.

use super::tree::{Binding, BlockNode};

/// One link in the scope chain.
///
/// `'p` is the borrow of the parent link, `'a` the borrow of the tree.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'p, 'a> {
    pub block: &'a BlockNode,
    parent: Option<&'p Scope<'p, 'a>>,
    depth: usize,
}

/// A binding found by lookup, with how many blocks up it was declared.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub binding: &'a Binding,
    pub block: &'a BlockNode,
    /// 0 when declared on the scope's own block.
    pub distance: usize,
}

impl<'p, 'a> Scope<'p, 'a> {
    /// Scope rooted at a block with no parent.
    pub fn root(block: &'a BlockNode) -> Self {
        Self {
            block,
            parent: None,
            depth: 0,
        }
    }

    /// Child scope for a nested block.
    pub fn child<'s>(&'s self, block: &'a BlockNode) -> Scope<'s, 'a> {
        Scope {
            block,
            parent: Some(self),
            depth: self.depth + 1,
        }
    }

    /// Nesting depth below the root scope.
    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Resolve a binding name, falling back to enclosing scopes.
    pub fn lookup(&self, name: &str) -> Option<Resolved<'a>> {
        self.find(|block| block.binding(name))
    }

    /// Resolve the subject in effect for this scope.
    ///
    /// Both anonymous and named subjects answer to `subject`.
    pub fn subject(&self) -> Option<Resolved<'a>> {
        self.find(|block| block.subject())
    }

    /// Ancestor blocks from the innermost outwards, including this one.
    pub fn blocks(&self) -> impl Iterator<Item = &'a BlockNode> + '_ {
        let mut current = Some(self);
        std::iter::from_fn(move || {
            let scope = current?;
            current = scope.parent;
            Some(scope.block)
        })
    }

    fn find<F>(&self, mut pick: F) -> Option<Resolved<'a>>
    where
        F: FnMut(&'a BlockNode) -> Option<&'a Binding>,
    {
        self.blocks().enumerate().find_map(|(distance, block)| {
            pick(block).map(|binding| Resolved {
                binding,
                block,
                distance,
            })
        })
    }
}

/// Visit every node in pre-order with its scope.
pub fn walk<'a, F>(root: &'a BlockNode, visit: &mut F)
where
    F: FnMut(&'a BlockNode, &Scope<'_, 'a>),
{
    fn go<'a, F>(scope: &Scope<'_, 'a>, visit: &mut F)
    where
        F: FnMut(&'a BlockNode, &Scope<'_, 'a>),
    {
        visit(scope.block, scope);
        for child in &scope.block.children {
            go(&scope.child(child), visit);
        }
    }

    go(&Scope::root(root), visit);
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
