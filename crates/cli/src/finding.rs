// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Finding types produced by rules and consumed by output formatters.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Rule id used for files that could not be parsed.
pub const SYNTAX_ERROR_ID: &str = "syntax-error";

/// Rule id used for files whose analysis exceeded the time budget.
pub const TIMEOUT_ID: &str = "timeout";

/// Rule id used for files whose analysis panicked or could not be read.
pub const INTERNAL_ERROR_ID: &str = "internal-error";

/// Finding severity, ordered from least to most severe.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    #[default]
    Warning,
    Error,
}

impl Severity {
    /// Parse a severity name as written in config files.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "info" => Some(Severity::Info),
            "warning" | "warn" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }

    /// One level more severe, saturating at `Error`.
    pub fn escalate(self) -> Self {
        match self {
            Severity::Info => Severity::Warning,
            Severity::Warning | Severity::Error => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// File the finding belongs to (filled in by the runner).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// 1-based source line.
    pub line: u32,

    /// Rule identifier (e.g., "flat-example").
    pub rule: String,

    pub severity: Severity,

    pub message: String,

    /// Suggested rewrite, when the rule can offer one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    /// Create a finding at a line with the default severity.
    pub fn new(rule: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            file: None,
            line,
            rule: rule.into(),
            severity: Severity::default(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Create an error-severity diagnostic describing a file that failed analysis.
    pub fn file_failure(
        file: impl Into<PathBuf>,
        rule: &str,
        line: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: Some(file.into()),
            line,
            rule: rule.to_string(),
            severity: Severity::Error,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn in_file(mut self, file: &Path) -> Self {
        self.file = Some(file.to_path_buf());
        self
    }

    /// Whether this finding should fail the run.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Ordering used within one file: line, then rule id.
pub fn by_line_then_rule(a: &Finding, b: &Finding) -> Ordering {
    a.line.cmp(&b.line).then_with(|| a.rule.cmp(&b.rule))
}

/// Ordering used across files: file, line, then rule id.
pub fn by_location(a: &Finding, b: &Finding) -> Ordering {
    a.file
        .as_deref()
        .cmp(&b.file.as_deref())
        .then_with(|| by_line_then_rule(a, b))
}

/// Aggregated results of one run.
#[derive(Debug, Clone, Serialize)]
pub struct LintOutput {
    /// ISO 8601 timestamp.
    pub timestamp: String,

    /// True when no error-severity finding exists.
    pub passed: bool,

    /// Number of files analysed.
    pub files: usize,

    /// Findings sorted by file, line, and rule id.
    pub findings: Vec<Finding>,
}

impl LintOutput {
    pub fn new(timestamp: String, files: usize, findings: Vec<Finding>) -> Self {
        let passed = !findings.iter().any(Finding::is_error);
        Self {
            timestamp,
            passed,
            files,
            findings,
        }
    }

    /// Count findings at the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

#[cfg(test)]
#[path = "finding_tests.rs"]
mod tests;
