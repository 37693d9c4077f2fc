use anyhow::{Result, anyhow, bail};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::thread::JoinHandle;

use crate::engine::progress_log::{ProgressKey, load_expected_digests, load_progress};
use crate::engine::tools::{canonicalize_output, scan_base};
use crate::engine::unit::DigestUnit;
use crate::pipeline::{self, PipelineContext, PipelineTuning, ResultWriter, WalkReport};
use crate::{Mode, Opts, RunSummary};

/// Lifecycle of one run. Only moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Init,
    Enumerating,
    Running,
    Draining,
    Done,
}

struct StateMachine(RunState);

impl StateMachine {
    fn advance(&mut self, next: RunState) {
        debug!("pipeline: {:?} -> {:?}", self.0, next);
        self.0 = next;
    }
}

/// Relative paths already present in the output log, when resuming into a file.
fn load_done(opts: &Opts) -> HashMap<String, String> {
    match (opts.resume, opts.output_path()) {
        (true, Some(output)) => load_progress(output, ProgressKey::Path),
        (true, None) => {
            warn!("Resume has no effect when results go to stdout");
            HashMap::new()
        }
        (false, _) => HashMap::new(),
    }
}

/// Build `Init` state: canonical root, scan base, skip-set.
pub fn setup_pipeline_context(opts: &Opts) -> Result<PipelineContext> {
    let (root, base) = scan_base(&opts.root)?;
    let done = load_done(opts);
    if !done.is_empty() {
        info!("{} already finished", done.len());
    }
    Ok(PipelineContext {
        root,
        base,
        output_canonical: canonicalize_output(opts.output_path()),
        include_hidden: opts.include_hidden,
        follow_links: opts.follow_links,
        strict: opts.strict,
        done,
    })
}

/// Units for verify mode: one per digest record in `check`, rooted at the scan base.
pub fn verify_units(ctx: &PipelineContext, check: &Path) -> WalkReport {
    let expected = load_expected_digests(check);
    if expected.is_empty() {
        warn!("No digest records found in {}", check.display());
    }
    let mut report = WalkReport::default();
    let mut entries: Vec<(String, String)> = expected.into_iter().collect();
    entries.sort_unstable();
    for (rel, digest) in entries {
        if ctx.done.contains_key(&rel) {
            report.already_done += 1;
            continue;
        }
        report.units.push(DigestUnit::verify(&ctx.base, &rel, &digest));
    }
    report
}

/// Join every hashing worker. A panicked worker is an error: its unit's line is lost.
pub fn shutdown_workers(worker_handles: Vec<JoinHandle<()>>) -> Result<()> {
    let mut panicked = 0;
    for h in worker_handles {
        if h.join().is_err() {
            panicked += 1;
        }
    }
    if panicked > 0 {
        bail!("{} hash worker(s) panicked", panicked);
    }
    Ok(())
}

/// Main orchestrator: enumerate, fan out to the hashing pool, fan in to the writer, drain.
/// Per-file failures are written to the log and counted; they never fail the run.
pub fn run_pipeline(opts: &Opts) -> Result<RunSummary> {
    let mut state = StateMachine(RunState::Init);
    let ctx = setup_pipeline_context(opts)?;

    state.advance(RunState::Enumerating);
    let report = match (opts.mode(), opts.check.as_deref()) {
        (Mode::Verify, Some(check)) => {
            info!("Check md5 of {}", check.display());
            verify_units(&ctx, check)
        }
        _ => {
            info!("Generate md5 for {}", ctx.root.display());
            pipeline::collect_units(&ctx, opts.parallel_walk)?
        }
    };
    pipeline::report_skipped_paths(&report.skipped);

    let mut summary = RunSummary {
        already_done: report.already_done,
        units: report.units.len(),
        skipped: report.skipped.len(),
        ..RunSummary::default()
    };
    if report.units.is_empty() {
        info!("Nothing to do");
        state.advance(RunState::Done);
        return Ok(summary);
    }

    state.advance(RunState::Running);
    let tuning = PipelineTuning::resolve(opts.num_threads);
    let writer = ResultWriter::open(opts.output_path(), opts.resume)?;
    debug!("results go to {}", writer.destination());
    let channels = pipeline::create_pipeline_channels();
    let writer_handle = writer.spawn(channels.line_rx, summary.units, opts.show_progress)?;
    let worker_handles =
        pipeline::spawn_hash_workers(channels.unit_rx, &channels.line_tx, tuning.num_threads);

    let mut fed = 0_usize;
    if !worker_handles.is_empty() {
        for unit in report.units {
            if channels.unit_tx.send(unit).is_err() {
                warn!("Workers stopped before all units were handed out");
                break;
            }
            fed += 1;
        }
    }
    debug!("handed {} units to {} workers", fed, worker_handles.len());

    state.advance(RunState::Draining);
    // Closing the unit channel lets workers finish; the line channel closes once they have.
    drop(channels.unit_tx);
    let no_workers = worker_handles.is_empty();
    let workers_result = shutdown_workers(worker_handles);
    drop(channels.line_tx);
    let written = writer_handle
        .join()
        .map_err(|_| anyhow!("result writer thread panicked"))??;
    workers_result?;
    if no_workers {
        bail!("no hash workers could be started");
    }

    summary.written = written.written;
    summary.failed = written.failed;
    state.advance(RunState::Done);
    Ok(summary)
}
