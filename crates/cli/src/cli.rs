// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::parse_duration;

/// A style linter for behavior-driven test specifications
#[derive(Parser)]
#[command(name = "speclint")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "SPECLINT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Lint spec files
    Check(CheckArgs),
    /// List available rules
    Rules(RulesArgs),
    /// Write a default speclint.toml
    Init(InitArgs),
}

#[derive(clap::Args, Default)]
pub struct CheckArgs {
    /// Files or directories to check (default: current directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Run only these rules (repeatable)
    #[arg(long = "only", value_name = "RULE")]
    pub only: Vec<String>,

    /// Skip these rules (repeatable)
    #[arg(long = "skip", value_name = "RULE")]
    pub skip: Vec<String>,

    /// Show suggested rewrites under each finding
    #[arg(long)]
    pub suggest: bool,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Maximum findings to display (default: 15)
    #[arg(long, default_value_t = 15, value_name = "N")]
    pub limit: usize,

    /// Show all findings (no limit)
    #[arg(long)]
    pub no_limit: bool,

    /// Per-file analysis budget (e.g. 500ms, 5s)
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl CheckArgs {
    /// Display limit after `--no-limit`.
    pub fn display_limit(&self) -> Option<usize> {
        if self.no_limit {
            None
        } else {
            Some(self.limit)
        }
    }
}

#[derive(clap::Args, Default)]
pub struct RulesArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args, Default)]
pub struct InitArgs {
    /// Overwrite existing config
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    parse_duration(s)
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
