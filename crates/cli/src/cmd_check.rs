// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use std::path::PathBuf;
use std::time::Instant;

use speclint::cli::{CheckArgs, Cli, OutputFormat};
use speclint::color::color_choice;
use speclint::config::{self, Config, unknown_rule_message};
use speclint::discovery;
use speclint::error::{Error, ExitCode};
use speclint::output::FormatOptions;
use speclint::output::json::{self, JsonFormatter};
use speclint::output::text::TextFormatter;
use speclint::rules::{self, RULE_IDS};
use speclint::runner::Runner;
use speclint::walker::FileWalker;

/// Run the check command.
pub fn run(cli: &Cli, args: &CheckArgs) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let verbose = |msg: String| {
        if args.verbose {
            eprintln!("[verbose] {msg}");
        }
    };

    for id in args.only.iter().chain(&args.skip) {
        if !RULE_IDS.contains(&id.as_str()) {
            return Err(Error::Argument(unknown_rule_message(id)).into());
        }
    }

    let cwd = std::env::current_dir()?;
    let config = match discovery::resolve_config(cli.config.as_deref(), &cwd)? {
        Some(path) => {
            verbose(format!("config: {}", path.display()));
            config::load(&path)?
        }
        None => {
            verbose("config: none found, using defaults".to_string());
            Config::default()
        }
    };

    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };
    let walker = FileWalker::from_project(&config.project)?;
    let (files, stats) = walker.collect(&paths)?;
    verbose(format!(
        "files: {} selected, {} not matching include/exclude, {} walk errors",
        stats.files_found, stats.files_ignored, stats.errors
    ));

    let rules = rules::filter_rules(&args.only, &args.skip);
    verbose(format!(
        "rules: {}",
        rules.iter().map(|r| r.id()).collect::<Vec<_>>().join(", ")
    ));

    let timeout = args.timeout.or(config.check.timeout);
    let runner = Runner::new(config, rules).with_timeout(timeout);
    let findings = runner.run(&files);
    let output = json::create_output(files.len(), findings);
    verbose(format!("analysis: {}ms", start.elapsed().as_millis()));

    match args.output {
        OutputFormat::Text => {
            let options = FormatOptions {
                limit: args.display_limit(),
                suggest: args.suggest,
            };
            let choice = color_choice(args.color, args.no_color);
            TextFormatter::stdout(choice, options).write(&output)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock()).write(&output)?;
        }
    }

    Ok(if output.passed {
        ExitCode::Success
    } else {
        ExitCode::CheckFailed
    })
}
