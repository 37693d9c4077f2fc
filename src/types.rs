//! Public types for the dirsum API and pipeline.

use std::path::{Path, PathBuf};

/// What a run does with each file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Compute and record a fresh digest for every discovered file.
    Generate,
    /// Recompute each file's digest and compare it against a recorded value.
    Verify,
}

/// Run configuration. Built once (defaults, then `.dirsum.toml`, then CLI) and not mutated
/// after the pipeline starts.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Scan root: a directory, or a single regular file.
    pub root: PathBuf,
    /// Result log. `None` writes to stdout.
    pub output: Option<PathBuf>,
    /// Worker count. When None, derived from available threads and the FD limit.
    pub num_threads: Option<usize>,
    /// Previous log to verify against. When set, the run is in [`Mode::Verify`].
    pub check: Option<PathBuf>,
    /// Skip paths already present in `output` and append to it instead of truncating.
    pub resume: bool,
    /// Include entries whose name starts with `.`.
    pub include_hidden: bool,
    /// Follow symbolic links during the walk.
    pub follow_links: bool,
    /// Use the parallel walker (jwalk) instead of walkdir.
    pub parallel_walk: bool,
    /// Abort on the first walk error instead of skipping the entry.
    pub strict: bool,
    /// Show a progress bar on stderr.
    pub show_progress: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: None,
            num_threads: None,
            check: None,
            resume: false,
            include_hidden: false,
            follow_links: false,
            parallel_walk: false,
            strict: false,
            show_progress: false,
        }
    }
}

impl Opts {
    pub fn mode(&self) -> Mode {
        match self.check {
            Some(_) => Mode::Verify,
            None => Mode::Generate,
        }
    }

    /// Output file path, if the run writes to a file (an empty path means stdout).
    pub fn output_path(&self) -> Option<&Path> {
        self.output
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Outcome of one finished run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Paths skipped because the output log already recorded them.
    pub already_done: usize,
    /// Units handed to the worker pool.
    pub units: usize,
    /// Lines written to the destination.
    pub written: usize,
    /// Units recorded with an error (missing, unreadable, mismatch).
    pub failed: usize,
    /// Walk entries that could not be read and were left out.
    pub skipped: usize,
}
