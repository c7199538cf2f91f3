// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order:
//! 1. `--color` / `--no-color`
//! 2. `NO_COLOR` env var → no color
//! 3. `COLOR` env var → color
//! 4. otherwise color only when stdout is a terminal outside CI

use std::io::IsTerminal;

use termcolor::ColorChoice;

/// Resolve the color choice from command-line flags, then the environment.
pub fn color_choice(force: bool, disable: bool) -> ColorChoice {
    if force {
        ColorChoice::Always
    } else if disable {
        ColorChoice::Never
    } else {
        resolve_color()
    }
}

/// Resolve color choice from environment variables.
///
/// Per [no-color.org](https://no-color.org/), `NO_COLOR` set to any value
/// (including empty) disables color.
pub fn resolve_color() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() || std::env::var_os("CI").is_some() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Color scheme for findings.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    use crate::finding::Severity;

    /// Cyan file path.
    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Yellow line number.
    pub fn line_number() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        spec
    }

    /// Rule id, colored by the finding's severity.
    pub fn rule(severity: Severity) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match severity {
            Severity::Error => spec.set_fg(Some(Color::Red)).set_bold(true),
            Severity::Warning => spec.set_fg(Some(Color::Yellow)).set_bold(true),
            Severity::Info => spec.set_fg(Some(Color::Blue)),
        };
        spec
    }

    /// Dimmed suggested rewrite.
    pub fn suggestion() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }

    /// Red summary when the run fails.
    pub fn fail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// Green summary when the run passes.
    pub fn pass() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
