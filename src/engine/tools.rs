//! Path and filter utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::utils::config::LogFormat;

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Relative path as written in the log: `/`-separated on every platform.
///
/// Returns `None` for paths the line format cannot carry unchanged: non-UTF-8 names and names
/// containing a line break. Only the platform separator is rewritten, so a `\` inside a Unix
/// file name is kept.
pub fn path_to_log_string(path: &Path) -> Option<String> {
    let s = path.to_str()?;
    if s.contains(['\n', '\r']) {
        return None;
    }
    if std::path::MAIN_SEPARATOR != '/' {
        return Some(s.replace(std::path::MAIN_SEPARATOR, "/"));
    }
    Some(s.to_string())
}

/// True if the file or directory name starts with the hidden marker (`.`).
pub fn is_hidden_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(LogFormat::HIDDEN_PREFIX))
}

/// Returns true if the walked path should become a unit.
/// The root itself and the output log are never units.
pub fn should_include_in_walk(
    path: &Path,
    root: &Path,
    output_canonical: &Option<PathBuf>,
    include_hidden: bool,
) -> bool {
    if path == root {
        return false;
    }
    if let Some(out) = output_canonical
        && path == out.as_path()
    {
        return false;
    }
    include_hidden || !is_hidden_name(path)
}

/// Canonicalize the scan root. A missing root is fatal.
pub fn canonicalize_root(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("scan root {} does not exist or is unreadable", path.display()))
}

/// Scan base and canonical root: a directory is its own base; a single file is scanned
/// relative to its parent so its log key is the file name.
pub fn scan_base(root: &Path) -> Result<(PathBuf, PathBuf)> {
    let root = canonicalize_root(root)?;
    let meta = std::fs::metadata(&root).context("read scan root metadata")?;
    let base = if meta.is_file() {
        root.parent().map(Path::to_path_buf).unwrap_or_else(|| root.clone())
    } else {
        root.clone()
    };
    Ok((root, base))
}

/// Canonical output path when it already exists, so the walk can skip it.
pub fn canonicalize_output(output: Option<&Path>) -> Option<PathBuf> {
    output.and_then(|p| p.canonicalize().ok())
}
