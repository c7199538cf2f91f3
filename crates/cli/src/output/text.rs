// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! <file>:<line>: [<rule-id>] <message>
//!     <suggested rewrite>
//! <summary>
//! ```

use std::io::Write;

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::FormatOptions;
use crate::color::scheme;
use crate::finding::{Finding, LintOutput, Severity};

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
    options: FormatOptions,
    shown: usize,
    truncated: bool,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice, options: FormatOptions) -> Self {
        Self::new(StandardStream::stdout(color_choice), options)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W, options: FormatOptions) -> Self {
        Self {
            out,
            options,
            shown: 0,
            truncated: false,
        }
    }

    /// Write findings up to the limit, a truncation note, and the summary.
    pub fn write(&mut self, output: &LintOutput) -> std::io::Result<()> {
        for finding in &output.findings {
            if let Some(limit) = self.options.limit
                && self.shown >= limit
            {
                self.truncated = true;
                break;
            }
            self.write_finding(finding)?;
            self.shown += 1;
        }

        if let Some(limit) = self.options.limit
            && self.truncated
        {
            writeln!(
                self.out,
                "Stopped after {} findings. Use --no-limit to see all.",
                limit
            )?;
        }

        self.write_summary(output)
    }

    fn write_finding(&mut self, finding: &Finding) -> std::io::Result<()> {
        if let Some(ref file) = finding.file {
            self.out.set_color(&scheme::path())?;
            write!(self.out, "{}", file.display())?;
            self.out.reset()?;
            write!(self.out, ":")?;
        }
        self.out.set_color(&scheme::line_number())?;
        write!(self.out, "{}", finding.line)?;
        self.out.reset()?;
        write!(self.out, ": ")?;

        self.out.set_color(&scheme::rule(finding.severity))?;
        write!(self.out, "[{}]", finding.rule)?;
        self.out.reset()?;
        writeln!(self.out, " {}", finding.message)?;

        if self.options.suggest
            && let Some(ref suggestion) = finding.suggestion
        {
            self.out.set_color(&scheme::suggestion())?;
            for line in suggestion.lines() {
                writeln!(self.out, "    {}", line)?;
            }
            self.out.reset()?;
        }

        Ok(())
    }

    fn write_summary(&mut self, output: &LintOutput) -> std::io::Result<()> {
        let files = plural(output.files, "file");
        if output.findings.is_empty() {
            self.out.set_color(&scheme::pass())?;
            writeln!(self.out, "{files} checked, no findings")?;
            return self.out.reset();
        }

        let breakdown: Vec<String> = [Severity::Error, Severity::Warning, Severity::Info]
            .into_iter()
            .filter_map(|severity| match output.count(severity) {
                0 => None,
                n if severity == Severity::Info => Some(format!("{n} info")),
                n => Some(plural(n, &severity.to_string())),
            })
            .collect();

        let spec = if output.passed {
            scheme::pass()
        } else {
            scheme::fail()
        };
        self.out.set_color(&spec)?;
        writeln!(
            self.out,
            "{} in {} checked ({})",
            plural(output.findings.len(), "finding"),
            files,
            breakdown.join(", ")
        )?;
        self.out.reset()
    }

    /// Whether the limit cut output short.
    #[cfg(test)]
    pub(crate) fn was_truncated(&self) -> bool {
        self.truncated
    }

    /// Consume the formatter, returning its writer.
    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
