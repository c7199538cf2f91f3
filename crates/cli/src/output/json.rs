// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;

use chrono::Utc;

use crate::finding::{Finding, LintOutput};

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON document.
    pub fn write(&mut self, output: &LintOutput) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(output).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

/// Create a LintOutput stamped with the current time.
pub fn create_output(files: usize, findings: Vec<Finding>) -> LintOutput {
    LintOutput::new(
        Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        files,
        findings,
    )
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
