//! dirsum: concurrent MD5 checksums for directory trees.
//!
//! A run walks a root into a list of [`DigestUnit`](engine::DigestUnit)s, hands them to a fixed
//! pool of hashing threads, and funnels every result line through a single writer. Re-running
//! with `resume` skips paths already present in the output log; `check` verifies a tree against
//! a log written earlier.

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

/// Result alias used by public dirsum API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: generate or verify digests for `opts.root` and write the log.
///
/// - **`opts.check: None`** → generate mode: every regular file under the root gets a `digest<TAB>path` line.
/// - **`opts.check: Some(log)`** → verify mode: every digest record in `log` is re-hashed and written as `path<TAB>ok` or `path<TAB>error`.
///
/// With `opts.resume`, paths already in `opts.output` are skipped and new lines are appended.
/// Per-file failures are recorded in the log and counted in [`RunSummary::failed`]; only setup
/// problems (missing root, unopenable output) return `Err`.
pub fn checksum_dir(opts: &Opts) -> Result<RunSummary> {
    pipeline::run_pipeline(opts)
}
