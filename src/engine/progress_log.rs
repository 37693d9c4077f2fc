//! Reading a previous result log back: resume skip-set and verify input.
//!
//! Parsing is best-effort. A log that cannot be opened reads as empty ("no prior progress"),
//! and lines that do not split into two fields are dropped without complaint.

use log::{debug, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::engine::hashing::is_hex_digest;
use crate::utils::config::LogFormat;

/// One parsed log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogRecord {
    /// `digest<TAB>path`, written by generate mode.
    Digest { digest: String, path: String },
    /// `path<TAB>ok`, written by verify mode.
    Verified { path: String },
    /// `path<TAB>reason` for a unit that failed.
    Failed { path: String, reason: String },
}

impl LogRecord {
    /// The relative path this record is about, whatever its shape.
    pub fn path(&self) -> &str {
        match self {
            LogRecord::Digest { path, .. }
            | LogRecord::Verified { path }
            | LogRecord::Failed { path, .. } => path,
        }
    }

    /// The non-path column.
    pub fn value(&self) -> &str {
        match self {
            LogRecord::Digest { digest, .. } => digest,
            LogRecord::Verified { .. } => LogFormat::VERIFIED_OK,
            LogRecord::Failed { reason, .. } => reason,
        }
    }
}

/// Which column keys the map returned by [`load_progress`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressKey {
    /// relative path → digest / `ok` / error text. Every record shape contributes.
    Path,
    /// digest → relative path. Only digest records contribute.
    Digest,
}

fn trim_field(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\'')
}

/// Parse one log line. Returns `None` for blank or single-field lines.
///
/// Lines written by this crate always contain a tab. For those only the line terminator is
/// removed and the path column is taken verbatim, so names with spaces, quotes or tabs keep
/// their exact key: a digest record splits at the first tab, an `ok`/error record at the last.
/// Lines without a tab are hand-written or foreign; they are trimmed of whitespace and `'`
/// and split at the first whitespace run.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.contains(LogFormat::SEPARATOR) {
        parse_tab_line(line)
    } else {
        parse_spaced_line(line)
    }
}

fn parse_tab_line(line: &str) -> Option<LogRecord> {
    let (left, right) = line.split_once(LogFormat::SEPARATOR)?;
    let digest = trim_field(left);
    if is_hex_digest(digest) && !right.is_empty() {
        return Some(LogRecord::Digest {
            digest: digest.to_ascii_lowercase(),
            path: right.to_string(),
        });
    }
    let (path, status) = line.rsplit_once(LogFormat::SEPARATOR)?;
    status_record(path, trim_field(status))
}

fn parse_spaced_line(line: &str) -> Option<LogRecord> {
    let line = trim_field(line);
    let (left, right) = line.split_once(char::is_whitespace)?;
    let (left, right) = (trim_field(left), trim_field(right));
    if is_hex_digest(left) && !right.is_empty() {
        return Some(LogRecord::Digest {
            digest: left.to_ascii_lowercase(),
            path: right.to_string(),
        });
    }
    status_record(left, right)
}

fn status_record(path: &str, status: &str) -> Option<LogRecord> {
    if path.is_empty() || status.is_empty() {
        return None;
    }
    let record = if status == LogFormat::VERIFIED_OK {
        LogRecord::Verified {
            path: path.to_string(),
        }
    } else {
        LogRecord::Failed {
            path: path.to_string(),
            reason: status.to_string(),
        }
    };
    Some(record)
}

/// Read every well-formed record from `path`. Missing or unopenable file → empty.
pub fn load_records(path: &Path) -> Vec<LogRecord> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!("no prior progress at {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    let mut records = Vec::new();
    for chunk in BufReader::new(file).split(b'\n') {
        let bytes = match chunk {
            Ok(b) => b,
            Err(e) => {
                warn!("stopped reading {} early: {}", path.display(), e);
                break;
            }
        };
        if let Some(record) = parse_line(&String::from_utf8_lossy(&bytes)) {
            records.push(record);
        }
    }
    records
}

/// Load a log into a lookup table keyed as `key` selects. Later lines win on duplicate keys.
pub fn load_progress(path: &Path, key: ProgressKey) -> HashMap<String, String> {
    let records = load_records(path);
    match key {
        ProgressKey::Path => records
            .into_iter()
            .map(|r| (r.path().to_string(), r.value().to_string()))
            .collect(),
        ProgressKey::Digest => records
            .into_iter()
            .filter_map(|r| match r {
                LogRecord::Digest { digest, path } => Some((digest, path)),
                _ => None,
            })
            .collect(),
    }
}

/// Expected digests for verify mode: relative path → digest, from digest records only.
/// Keyed by path so files with identical content each get their own unit.
pub fn load_expected_digests(path: &Path) -> HashMap<String, String> {
    load_records(path)
        .into_iter()
        .filter_map(|r| match r {
            LogRecord::Digest { digest, path } => Some((path, digest)),
            _ => None,
        })
        .collect()
}
