//! The single consumer of result lines. Owns the destination stream and the progress bar.

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use log::debug;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crate::engine::progress::{advance, finish, setup_progress};

use super::context::ResultLine;

/// Where result lines go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// Counts reported by the writer once the line channel closes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: usize,
    pub failed: usize,
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Stdout => write!(f, "stdout"),
            Destination::File(p) => write!(f, "{}", p.display()),
        }
    }
}

pub struct ResultWriter {
    out: Box<dyn Write + Send>,
    dest: Destination,
}

impl ResultWriter {
    /// Open the destination. A resuming run appends so earlier lines are never rewritten;
    /// otherwise the file is truncated. `None` means stdout.
    pub fn open(output: Option<&Path>, resume: bool) -> Result<Self> {
        let Some(path) = output else {
            return Ok(Self {
                out: Box::new(std::io::stdout()),
                dest: Destination::Stdout,
            });
        };
        let mut options = OpenOptions::new();
        options.create(true);
        if resume {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        let file = options
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        debug!(
            "writing results to {} ({})",
            path.display(),
            if resume { "append" } else { "truncate" }
        );
        Ok(Self {
            out: Box::new(BufWriter::new(file)),
            dest: Destination::File(path.to_path_buf()),
        })
    }

    pub fn destination(&self) -> &Destination {
        &self.dest
    }

    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        writeln!(self.out, "{}", line)?;
        // One flush per line: an interrupted run loses at most the line in flight.
        self.out.flush()
    }

    /// Drain `line_rx` until every sender is gone, writing and flushing each line and advancing
    /// the progress bar. A write error stops the writer; dropping `line_rx` then lets workers exit.
    pub fn run(
        mut self,
        line_rx: Receiver<ResultLine>,
        total: usize,
        show_progress: bool,
    ) -> Result<WriteSummary> {
        let mut bar = setup_progress(show_progress, total, "Hashing");
        let mut summary = WriteSummary::default();
        let result = loop {
            let Ok(res) = line_rx.recv() else {
                break Ok(());
            };
            if let Err(e) = self.write_line(&res.line) {
                break Err(e);
            }
            summary.written += 1;
            if res.failed {
                summary.failed += 1;
            }
            advance(&mut bar);
        };
        finish(&mut bar);
        let dest = self.destination().to_string();
        result.with_context(|| format!("failed to write results to {}", dest))?;
        self.out
            .flush()
            .with_context(|| format!("failed to flush {}", dest))?;
        Ok(summary)
    }

    /// Run the writer on its own thread.
    pub fn spawn(
        self,
        line_rx: Receiver<ResultLine>,
        total: usize,
        show_progress: bool,
    ) -> Result<JoinHandle<Result<WriteSummary>>> {
        thread::Builder::new()
            .name("result-writer".to_string())
            .spawn(move || self.run(line_rx, total, show_progress))
            .context("spawn result writer thread")
    }
}
