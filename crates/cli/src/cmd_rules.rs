// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rules command: list rules with their effective settings.

use std::io::Write;

use serde::Serialize;

use speclint::cli::{Cli, OutputFormat, RulesArgs};
use speclint::config::{self, Config};
use speclint::discovery;
use speclint::error::ExitCode;
use speclint::finding::Severity;
use speclint::rules::all_rules;

#[derive(Serialize)]
struct RuleInfo {
    id: &'static str,
    description: &'static str,
    enabled: bool,
    severity: Severity,
}

pub fn run(cli: &Cli, args: &RulesArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = match discovery::resolve_config(cli.config.as_deref(), &cwd)? {
        Some(path) => config::load(&path)?,
        None => Config::default(),
    };

    let infos: Vec<RuleInfo> = all_rules()
        .iter()
        .map(|rule| {
            let settings = config.rule(rule.id());
            RuleInfo {
                id: rule.id(),
                description: rule.description(),
                enabled: settings.enabled,
                severity: settings.base_severity(),
            }
        })
        .collect();

    let mut stdout = std::io::stdout().lock();
    match args.output {
        OutputFormat::Text => {
            for info in &infos {
                let state = if info.enabled {
                    info.severity.to_string()
                } else {
                    "off".to_string()
                };
                writeln!(stdout, "{:<24} {:<8} {}", info.id, state, info.description)?;
            }
        }
        OutputFormat::Json => {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&infos)?)?;
        }
    }

    Ok(ExitCode::Success)
}
