//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the speclint binary against temporary
//! projects or fixtures and asserting on its output.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Exit codes as documented for the CLI.
pub mod exit {
    pub const SUCCESS: i32 = 0;
    pub const CHECK_FAILED: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command running the speclint binary with a clean environment.
pub fn speclint_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("speclint"));
    for var in ["SPECLINT_CONFIG", "SPECLINT_LOG", "NO_COLOR", "COLOR"] {
        cmd.env_remove(var);
    }
    cmd
}

/// Builder for `speclint check`.
pub fn check() -> CheckBuilder {
    CheckBuilder::default()
}

#[derive(Default)]
pub struct CheckBuilder {
    dir: Option<PathBuf>,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    json: bool,
}

#[allow(dead_code)]
impl CheckBuilder {
    /// Run inside a fixture directory.
    pub fn on(mut self, fixture_name: &str) -> Self {
        self.dir = Some(fixture(fixture_name));
        self
    }

    /// Run inside the given directory.
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Request `-o json`.
    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }

    pub fn passes(self) -> RunAssert {
        self.exits(exit::SUCCESS)
    }

    pub fn fails(self) -> RunAssert {
        self.exits(exit::CHECK_FAILED)
    }

    pub fn exits(self, code: i32) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert_eq!(
            output.status.code(),
            Some(code),
            "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
            code,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    fn command(self) -> Command {
        let mut cmd = speclint_cmd();
        cmd.args(["check", "--no-color"]);
        if self.json {
            cmd.args(["-o", "json"]);
        }
        cmd.args(&self.args);
        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Result of a run for chaining assertions.
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).expect("valid JSON")
    }

    /// Rule ids of the JSON findings, in output order.
    pub fn rules(&self) -> Vec<String> {
        self.json()["findings"]
            .as_array()
            .expect("findings array")
            .iter()
            .map(|f| f["rule"].as_str().unwrap().to_string())
            .collect()
    }

    /// Assert stdout equals expected (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

/// Path to a test fixture directory.
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Temporary project directory.
///
/// Creates parent directories automatically and prefixes config with
/// `version = 1` when missing. A `.git` marker stops config discovery at
/// the project root.
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Project with a `.git` marker and no config.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    /// Project with a minimal speclint.toml.
    pub fn with_defaults() -> Self {
        let project = Self::empty();
        project.config("");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write speclint.toml.
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("speclint.toml"), content).unwrap();
    }

    /// Write a file at the given path.
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }
}
