//! Tree walk: enumerate every regular file under the root into a list of units.
//!
//! Both back-ends (walkdir serial, jwalk parallel) are reduced to a stream of [`WalkOutcome`]
//! and fed through one common loop that applies the hidden, output-log and resume filters.

use anyhow::{Result, bail};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::engine::tools::{is_hidden_name, path_relative_to, path_to_log_string, should_include_in_walk};
use crate::engine::unit::DigestUnit;

use super::context::PipelineContext;

/// One result from a directory walk: either a path to consider or an error with optional path.
pub enum WalkOutcome {
    Ok { path: PathBuf, is_file: bool },
    Err { msg: String, path: Option<PathBuf> },
}

/// What the walk produced.
#[derive(Default)]
pub struct WalkReport {
    pub units: Vec<DigestUnit>,
    /// Files left out because the output log already has them.
    pub already_done: usize,
    /// Entries that could not be read, with the error message.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Convert a jwalk result into [`WalkOutcome`].
pub fn to_outcome_jwalk(r: Result<jwalk::DirEntry<((), ())>, jwalk::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => WalkOutcome::Ok {
            is_file: entry.file_type().is_file(),
            path: entry.path(),
        },
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

/// Convert a walkdir result into [`WalkOutcome`].
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => WalkOutcome::Ok {
            is_file: entry.file_type().is_file(),
            path: entry.into_path(),
        },
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

fn jwalk_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    use jwalk::Parallelism;
    use std::time::Duration;
    Box::new(
        jwalk::WalkDir::new(&ctx.root)
            .follow_links(ctx.follow_links)
            .skip_hidden(!ctx.include_hidden)
            .parallelism(Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_secs(60),
            })
            .into_iter()
            .map(to_outcome_jwalk),
    )
}

fn walkdir_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    use walkdir::WalkDir;
    let include_hidden = ctx.include_hidden;
    Box::new(
        WalkDir::new(&ctx.root)
            .follow_links(ctx.follow_links)
            .into_iter()
            // Prune hidden directories instead of descending and filtering each child.
            .filter_entry(move |e| include_hidden || e.depth() == 0 || !is_hidden_name(e.path()))
            .map(to_outcome_walkdir),
    )
}

/// Enumerate the units for a generate run.
/// A root that is a single regular file yields exactly one unit.
pub fn collect_units(ctx: &PipelineContext, parallel_walk: bool) -> Result<WalkReport> {
    if ctx.root.is_file() {
        return Ok(single_file_report(ctx));
    }
    let iter: Box<dyn Iterator<Item = WalkOutcome>> = match parallel_walk {
        true => {
            debug!("Walking in parallel");
            jwalk_iter(ctx)
        }
        false => {
            debug!("Walking serially");
            walkdir_iter(ctx)
        }
    };
    run_walk_loop(ctx, iter)
}

fn single_file_report(ctx: &PipelineContext) -> WalkReport {
    let rel = path_relative_to(&ctx.root, &ctx.base).unwrap_or_else(|| ctx.root.clone());
    let mut report = WalkReport::default();
    report.push_file(ctx, ctx.root.clone(), &rel);
    report
}

impl WalkReport {
    /// Turn one walked file into a unit unless the log already has it or cannot name it.
    fn push_file(&mut self, ctx: &PipelineContext, path: PathBuf, rel: &Path) {
        let Some(key) = path_to_log_string(rel) else {
            warn!("{} cannot be written to the log verbatim; skipped", path.display());
            self.skipped
                .push((path, "path is not valid UTF-8 or contains a line break".to_string()));
            return;
        };
        if ctx.done.contains_key(&key) {
            self.already_done += 1;
            return;
        }
        self.units.push(DigestUnit::generate(path, key));
    }
}

/// Run the common walk loop: keep regular files that pass `should_include_in_walk` and are not
/// already recorded, turning each into a unit. Errors are fatal in strict mode; otherwise the
/// entry is recorded in `skipped` and the walk goes on.
pub fn run_walk_loop<I>(ctx: &PipelineContext, iter: I) -> Result<WalkReport>
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut report = WalkReport::default();
    for outcome in iter {
        match outcome {
            WalkOutcome::Ok { path, is_file } => {
                if !is_file
                    || !should_include_in_walk(
                        &path,
                        &ctx.root,
                        &ctx.output_canonical,
                        ctx.include_hidden,
                    )
                {
                    continue;
                }
                let Some(rel) = path_relative_to(&path, &ctx.base) else {
                    warn!("{} is outside {}; skipped", path.display(), ctx.base.display());
                    continue;
                };
                report.push_file(ctx, path, &rel);
            }
            WalkOutcome::Err { msg, path } => {
                if ctx.strict {
                    bail!("walk failed: {}", msg);
                }
                let path = path.unwrap_or_else(|| PathBuf::from("<no-path>"));
                report.skipped.push((path, msg));
            }
        }
    }
    debug!(
        "walk done: {} units, {} already done, {} skipped",
        report.units.len(),
        report.already_done,
        report.skipped.len()
    );
    Ok(report)
}
