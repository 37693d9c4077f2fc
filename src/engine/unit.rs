//! One file under consideration: where it is, what its digest is (or should be), and what went wrong.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::hashing::{digest_equals, hash_file};
use crate::utils::config::LogFormat;

/// Per-file failure. Recorded in the log in place of a digest; never aborts a run.
/// The `Display` text is exactly what goes into the log's status column.
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("not exist")]
    NotExist,
    #[error("failed to open file: {0}")]
    Open(#[source] std::io::Error),
    #[error("failed to read file: {0}")]
    Read(#[source] std::io::Error),
    #[error("mismatch")]
    Mismatch,
}

/// A file to hash (generate) or check against an expected digest (verify).
#[derive(Debug)]
pub struct DigestUnit {
    /// Absolute (or root-joined) path used to open the file.
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated. The log key.
    pub rel_path: String,
    /// Empty until computed, or the expected digest in verify mode.
    pub digest: String,
    pub verify: bool,
    pub error: Option<UnitError>,
}

impl DigestUnit {
    /// Unit for generate mode. `rel_path` is the log key (see [`path_to_log_string`](crate::engine::tools::path_to_log_string)).
    pub fn generate(path: PathBuf, rel_path: String) -> Self {
        Self {
            path,
            rel_path,
            digest: String::new(),
            verify: false,
            error: None,
        }
    }

    /// Unit for verify mode: the file at `base/rel_path` is expected to hash to `expected`.
    pub fn verify(base: &Path, rel_path: &str, expected: &str) -> Self {
        Self {
            path: base.join(rel_path),
            rel_path: rel_path.to_string(),
            digest: expected.to_string(),
            verify: true,
            error: None,
        }
    }

    /// Hash the file once and record either the digest, the verification outcome, or the error.
    pub fn compute(&mut self) {
        // Only for a clearer message; a file removed after this check still funnels into NotExist.
        if !self.path.exists() {
            self.error = Some(UnitError::NotExist);
            return;
        }
        match hash_file(&self.path) {
            Ok(computed) if self.verify => {
                if !digest_equals(&computed, &self.digest) {
                    self.error = Some(UnitError::Mismatch);
                }
            }
            Ok(computed) => self.digest = computed,
            Err(e) => self.error = Some(e),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// The log line for this unit, without a trailing newline.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DigestUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = LogFormat::SEPARATOR;
        match (&self.error, self.verify) {
            (Some(e), _) => write!(f, "{}{sep}{}", self.rel_path, e),
            (None, true) => write!(f, "{}{sep}{}", self.rel_path, LogFormat::VERIFIED_OK),
            (None, false) => write!(f, "{}{sep}{}", self.digest, self.rel_path),
        }
    }
}
