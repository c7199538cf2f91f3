// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for lint results.

pub mod json;
pub mod text;

/// Output formatting options.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Maximum findings to show (None = unlimited).
    pub limit: Option<usize>,

    /// Print suggested rewrites under their findings.
    pub suggest: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            limit: Some(15),
            suggest: false,
        }
    }
}

impl FormatOptions {
    /// Create options with no limit.
    pub fn no_limit() -> Self {
        Self {
            limit: None,
            ..Self::default()
        }
    }

    /// Create options with a specific limit.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn with_suggestions(mut self, suggest: bool) -> Self {
        self.suggest = suggest;
        self
    }
}
