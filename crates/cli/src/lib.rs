// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Speclint: a style linter for behavior-driven test specifications.
//!
//! Source is parsed into a tree of suites, contexts, and examples
//! ([`parser`]), rules inspect the tree ([`rules`], [`engine`]), and the
//! [`runner`] applies them to many files in parallel.

pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod finding;
pub mod init;
pub mod output;
pub mod parser;
pub mod rules;
pub mod runner;
pub mod walker;

pub use cli::{CheckArgs, Cli, Command, InitArgs, OutputFormat, RulesArgs};
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use finding::{Finding, LintOutput, Severity};
pub use parser::{SpecTree, parse};
pub use rules::Rule;
pub use walker::{FileWalker, WalkStats, WalkerConfig};

#[cfg(test)]
pub mod test_utils;
