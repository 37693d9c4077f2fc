//! Pipeline context and tuning: walk inputs, pool size, and the two hand-off channels.

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::engine::unit::DigestUnit;
use crate::utils::config::WorkerThreadLimits;
use crate::utils::fd_limit::cap_workers_by_fd_limit;

/// Pool sizing for one run.
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    pub num_threads: usize,
}

impl PipelineTuning {
    /// Explicit count wins (still capped by the FD limit); otherwise available threads up to
    /// [`WorkerThreadLimits::AUTO_MAX_THREADS`].
    pub fn resolve(requested: Option<usize>) -> Self {
        let limits = WorkerThreadLimits::current();
        let wanted = match requested {
            Some(n) => n,
            None => limits.all_threads.min(limits.auto_max),
        };
        let num_threads = cap_workers_by_fd_limit(wanted.max(limits.floor));
        debug!("worker pool: {} threads (requested {:?})", num_threads, requested);
        Self { num_threads }
    }
}

/// Inputs for the tree walk. Built in `Init` and read-only afterwards.
pub struct PipelineContext {
    /// Canonical scan root (a directory or a single file).
    pub root: PathBuf,
    /// Directory relative paths are computed against.
    pub base: PathBuf,
    /// Canonical output log path when it already exists; never enumerated.
    pub output_canonical: Option<PathBuf>,
    pub include_hidden: bool,
    pub follow_links: bool,
    pub strict: bool,
    /// Relative paths already recorded in the output log (resume). Keyed by relative path.
    pub done: HashMap<String, String>,
}

/// One serialized result travelling from a worker to the writer.
#[derive(Clone, Debug)]
pub struct ResultLine {
    pub line: String,
    pub failed: bool,
}

impl From<&DigestUnit> for ResultLine {
    fn from(unit: &DigestUnit) -> Self {
        Self {
            line: unit.serialize(),
            failed: unit.is_failed(),
        }
    }
}

/// Orchestrator → workers (units) and workers → writer (lines). Both are rendezvous channels:
/// a send blocks until the other side takes the value.
pub struct PipelineChannels {
    pub unit_tx: Sender<DigestUnit>,
    pub unit_rx: Receiver<DigestUnit>,
    pub line_tx: Sender<ResultLine>,
    pub line_rx: Receiver<ResultLine>,
}

pub fn create_pipeline_channels() -> PipelineChannels {
    let (unit_tx, unit_rx) = bounded::<DigestUnit>(0);
    let (line_tx, line_rx) = bounded::<ResultLine>(0);
    PipelineChannels {
        unit_tx,
        unit_rx,
        line_tx,
        line_rx,
    }
}
