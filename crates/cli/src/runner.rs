// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel per-file analysis with failure isolation.
//!
//! Each file runs through parse and evaluate on the rayon pool. A file that
//! cannot be read, fails to parse, panics, or exceeds the time budget yields
//! one error diagnostic for that file; the other files are unaffected.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{RecvTimeoutError, bounded};
use rayon::prelude::*;

use crate::config::Config;
use crate::engine;
use crate::error::Error;
use crate::finding::{
    Finding, INTERNAL_ERROR_ID, SYNTAX_ERROR_ID, TIMEOUT_ID, by_location,
};
use crate::parser;
use crate::rules::Rule;

/// Runs the rule set over many files.
pub struct Runner {
    config: Arc<Config>,
    rules: Arc<[Arc<dyn Rule>]>,
    timeout: Option<Duration>,
}

impl Runner {
    /// Create a runner. The time budget starts from `check.timeout`.
    pub fn new(config: Config, rules: Vec<Arc<dyn Rule>>) -> Self {
        let timeout = config.check.timeout;
        Self {
            config: Arc::new(config),
            rules: Arc::from(rules),
            timeout,
        }
    }

    /// Override the per-file time budget (None = unlimited).
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Analyse every file, returning findings sorted by file, line, and rule id.
    pub fn run(&self, files: &[PathBuf]) -> Vec<Finding> {
        let start = Instant::now();
        let mut findings: Vec<Finding> = files
            .par_iter()
            .flat_map_iter(|path| self.check_file(path))
            .collect();

        findings.sort_by(by_location);
        tracing::debug!(
            "analysed {} files in {}ms ({} findings)",
            files.len(),
            start.elapsed().as_millis(),
            findings.len()
        );
        findings
    }

    /// Read and analyse one file.
    pub fn check_file(&self, path: &Path) -> Vec<Finding> {
        match std::fs::read_to_string(path) {
            Ok(source) => self.check_source(path, source),
            Err(e) => {
                let err = Error::Io {
                    path: path.to_path_buf(),
                    source: e,
                };
                tracing::warn!("{err}");
                vec![Finding::file_failure(
                    path,
                    INTERNAL_ERROR_ID,
                    1,
                    format!("could not read file: {}", io_reason(&err)),
                )]
            }
        }
    }

    /// Analyse source text attributed to `path`.
    pub fn check_source(&self, path: &Path, source: String) -> Vec<Finding> {
        match self.timeout {
            None => analyse(path, &source, &self.config, &self.rules),
            Some(budget) => self.analyse_within(path, source, budget),
        }
    }

    /// Run the analysis on its own thread and give up after `budget`.
    ///
    /// A timed-out thread is detached; its result is discarded.
    fn analyse_within(&self, path: &Path, source: String, budget: Duration) -> Vec<Finding> {
        let (tx, rx) = bounded(1);
        let config = Arc::clone(&self.config);
        let rules = Arc::clone(&self.rules);
        let owned = path.to_path_buf();

        let spawned = std::thread::Builder::new()
            .name("speclint-analysis".to_string())
            .spawn(move || {
                let _ = tx.send(analyse(&owned, &source, &config, &rules));
            });
        if let Err(e) = spawned {
            return vec![Finding::file_failure(
                path,
                INTERNAL_ERROR_ID,
                1,
                format!("could not start analysis: {e}"),
            )];
        }

        match rx.recv_timeout(budget) {
            Ok(findings) => findings,
            Err(RecvTimeoutError::Timeout) => {
                let err = Error::Timeout { budget };
                tracing::warn!("{}: {err}", path.display());
                vec![Finding::file_failure(path, TIMEOUT_ID, 1, err.to_string())]
            }
            Err(RecvTimeoutError::Disconnected) => vec![Finding::file_failure(
                path,
                INTERNAL_ERROR_ID,
                1,
                "analysis stopped without a result",
            )],
        }
    }
}

/// Parse and evaluate, converting syntax errors and panics into diagnostics.
fn analyse(path: &Path, source: &str, config: &Config, rules: &[Arc<dyn Rule>]) -> Vec<Finding> {
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        parser::parse(source).map(|tree| engine::evaluate(&tree, config, rules))
    }));

    match outcome {
        Ok(Ok(findings)) => findings.into_iter().map(|f| f.in_file(path)).collect(),
        Ok(Err(Error::Syntax { line, message })) => {
            tracing::debug!("{}:{line}: {message}", path.display());
            vec![Finding::file_failure(path, SYNTAX_ERROR_ID, line, message)]
        }
        Ok(Err(other)) => vec![Finding::file_failure(
            path,
            INTERNAL_ERROR_ID,
            1,
            other.to_string(),
        )],
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!("{}: analysis panicked: {reason}", path.display());
            vec![Finding::file_failure(
                path,
                INTERNAL_ERROR_ID,
                1,
                format!("analysis panicked: {reason}"),
            )]
        }
    }
}

fn io_reason(err: &Error) -> String {
    match err {
        Error::Io { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
