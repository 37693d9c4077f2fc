//! Load `.dirsum.toml` from the scan root (CLI only). Lib callers build [`Opts`] themselves.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct DirsumToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    output: Option<String>,
    threads: Option<usize>,
    resume: Option<bool>,
    hidden: Option<bool>,
    follow_links: Option<bool>,
    parallel_walk: Option<bool>,
    strict: Option<bool>,
    progress: Option<bool>,
}

/// Load the settings file from `dir` if present. Missing or unparsable → None (parse errors are warned).
pub fn load_settings(dir: &Path) -> Option<DirsumToml> {
    let path = dir.join(PackagePaths::get().settings_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_settings(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

pub fn parse_settings(s: &str) -> Result<DirsumToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $opts_field:ident) => {
        if let Some(v) = $sec.$sec_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file settings to opts (only fields present in the file). Call before applying CLI.
/// The scan root and the check log are never taken from the file.
pub fn apply_file_to_opts(file: &DirsumToml, opts: &mut Opts) {
    let sec = &file.settings;
    if let Some(ref p) = sec.output {
        opts.output = Some(PathBuf::from(p));
    }
    if let Some(n) = sec.threads.filter(|n| *n > 0) {
        opts.num_threads = Some(n);
    }
    apply_file_opt!(sec, opts, resume => resume);
    apply_file_opt!(sec, opts, hidden => include_hidden);
    apply_file_opt!(sec, opts, follow_links => follow_links);
    apply_file_opt!(sec, opts, parallel_walk => parallel_walk);
    apply_file_opt!(sec, opts, strict => strict);
    apply_file_opt!(sec, opts, progress => show_progress);
}
