// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Implementation of the `speclint init` command.

use speclint::cli::InitArgs;
use speclint::error::ExitCode;
use speclint::init;

/// Write a default speclint.toml into the current directory.
pub fn run(args: &InitArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let path = init::write_config(&cwd, args.force)?;
    println!("Created {}", path.display());
    Ok(ExitCode::Success)
}
