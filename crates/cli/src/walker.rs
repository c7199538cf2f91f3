// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Spec file discovery with gitignore support.
//!
//! Uses the `ignore` crate to walk directories in parallel, respecting
//! `.gitignore`, and `globset` to select files by the project's include and
//! exclude patterns (matched against the path relative to the walk root).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::{WalkBuilder, WalkState};

use crate::config::ProjectConfig;
use crate::error::{Error, Result};

/// Default maximum directory depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Directories never descended into.
pub(crate) const SKIP_DIRECTORIES: &[&str] = &["node_modules", ".git", "vendor"];

/// Walker configuration.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Globs selecting files to analyse.
    pub include: Vec<String>,

    /// Globs removing files from the selection.
    pub exclude: Vec<String>,

    /// Maximum directory depth (default: 100).
    pub max_depth: Option<usize>,

    /// Whether to respect gitignore files.
    pub git_ignore: bool,

    /// Whether to skip hidden files.
    pub hidden: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            include: ProjectConfig::default_include(),
            exclude: Vec::new(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
            git_ignore: true,
            hidden: true,
        }
    }
}

/// Statistics from a walk.
#[derive(Debug, Default)]
pub struct WalkStats {
    /// Files selected for analysis.
    pub files_found: usize,

    /// Files seen but not matching include/exclude.
    pub files_ignored: usize,

    /// Symlink loops detected.
    pub symlink_loops: usize,

    /// Other walk errors.
    pub errors: usize,
}

/// Include/exclude matcher shared by walker threads.
#[derive(Debug, Clone)]
struct Selection {
    include: GlobSet,
    exclude: GlobSet,
}

impl Selection {
    fn matches(&self, relative: &Path) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }
}

/// Spec file walker.
pub struct FileWalker {
    config: WalkerConfig,
    selection: Arc<Selection>,
}

impl FileWalker {
    /// Create a walker, compiling its globs.
    pub fn new(config: WalkerConfig) -> Result<Self> {
        let selection = Selection {
            include: build_globset("project.include", &config.include)?,
            exclude: build_globset("project.exclude", &config.exclude)?,
        };
        Ok(Self {
            config,
            selection: Arc::new(selection),
        })
    }

    /// Create a walker from `[project]` settings.
    pub fn from_project(project: &ProjectConfig) -> Result<Self> {
        Self::new(WalkerConfig {
            include: project.include.clone(),
            exclude: project.exclude.clone(),
            ..Default::default()
        })
    }

    /// Walk `root`, streaming matching files through the returned channel.
    ///
    /// Join the handle for statistics once the channel is drained.
    pub fn walk(&self, root: &Path) -> (Receiver<PathBuf>, WalkHandle) {
        let (tx, rx) = bounded(1000);

        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(self.config.hidden)
            .git_ignore(self.config.git_ignore)
            .git_exclude(self.config.git_ignore)
            .git_global(self.config.git_ignore)
            .follow_links(true)
            .max_depth(self.config.max_depth);

        builder.filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !is_dir
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIP_DIRECTORIES.contains(&name))
        });

        let handle = walk_parallel(builder, root.to_path_buf(), Arc::clone(&self.selection), tx);
        (rx, handle)
    }

    /// Resolve command-line paths into a sorted, deduplicated file list.
    ///
    /// Directories are walked; files named explicitly are always kept.
    pub fn collect(&self, paths: &[PathBuf]) -> Result<(Vec<PathBuf>, WalkStats)> {
        let mut files = Vec::new();
        let mut stats = WalkStats::default();

        for path in paths {
            if path.is_dir() {
                let (rx, handle) = self.walk(path);
                files.extend(rx.iter());
                let walked = handle.join();
                stats.files_found += walked.files_found;
                stats.files_ignored += walked.files_ignored;
                stats.symlink_loops += walked.symlink_loops;
                stats.errors += walked.errors;
            } else if path.is_file() {
                files.push(path.clone());
                stats.files_found += 1;
            } else {
                return Err(Error::Argument(format!(
                    "no such file or directory: {}",
                    path.display()
                )));
            }
        }

        files.sort();
        files.dedup();
        Ok((files, stats))
    }
}

fn build_globset(field: &str, patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::config(format!("{field}: invalid glob `{pattern}`: {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::config(format!("{field}: {e}")))
}

fn is_loop_error(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => is_loop_error(err),
        _ => false,
    }
}

/// Path shown to the user: relative to `.` when walking the current directory.
fn display_path(root: &Path, path: PathBuf) -> PathBuf {
    if root == Path::new(".") {
        match path.strip_prefix(".") {
            Ok(stripped) => stripped.to_path_buf(),
            Err(_) => path,
        }
    } else {
        path
    }
}

/// Run the parallel walker on a background thread.
fn walk_parallel(
    builder: WalkBuilder,
    root: PathBuf,
    selection: Arc<Selection>,
    tx: Sender<PathBuf>,
) -> WalkHandle {
    let walker = builder.build_parallel();

    let files_found = Arc::new(AtomicUsize::new(0));
    let files_ignored = Arc::new(AtomicUsize::new(0));
    let symlink_loops = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(AtomicUsize::new(0));

    let handle = std::thread::spawn(move || {
        walker.run(|| {
            let tx = tx.clone();
            let root = root.clone();
            let selection = Arc::clone(&selection);
            let files_found = Arc::clone(&files_found);
            let files_ignored = Arc::clone(&files_ignored);
            let symlink_loops = Arc::clone(&symlink_loops);
            let errors = Arc::clone(&errors);

            Box::new(move |entry| match entry {
                Ok(entry) => {
                    if !entry.file_type().is_some_and(|t| t.is_file()) {
                        return WalkState::Continue;
                    }
                    let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                    if !selection.matches(relative) {
                        files_ignored.fetch_add(1, Ordering::Relaxed);
                        return WalkState::Continue;
                    }

                    files_found.fetch_add(1, Ordering::Relaxed);
                    if tx.send(display_path(&root, entry.into_path())).is_err() {
                        return WalkState::Quit;
                    }
                    WalkState::Continue
                }
                Err(err) => {
                    if is_loop_error(&err) {
                        tracing::warn!("symlink loop detected: {}", err);
                        symlink_loops.fetch_add(1, Ordering::Relaxed);
                    } else {
                        tracing::warn!("walk error: {}", err);
                        errors.fetch_add(1, Ordering::Relaxed);
                    }
                    WalkState::Continue
                }
            })
        });

        WalkStats {
            files_found: files_found.load(Ordering::Relaxed),
            files_ignored: files_ignored.load(Ordering::Relaxed),
            symlink_loops: symlink_loops.load(Ordering::Relaxed),
            errors: errors.load(Ordering::Relaxed),
        }
    });

    WalkHandle { handle }
}

/// Handle to a running walk.
pub struct WalkHandle {
    handle: std::thread::JoinHandle<WalkStats>,
}

impl WalkHandle {
    /// Wait for the walk to complete and return stats.
    pub fn join(self) -> WalkStats {
        self.handle.join().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
