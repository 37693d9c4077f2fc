//! Engine: per-file hashing, log parsing, path helpers, CLI.

pub mod arg_parser;
pub mod cli;
pub mod hashing;
pub mod progress;
pub mod progress_log;
pub mod tools;
pub mod unit;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{build_opts, handle_run};
pub use hashing::{digest_equals, hash_bytes, hash_file, is_hex_digest};
pub use progress_log::{
    LogRecord, ProgressKey, load_expected_digests, load_progress, load_records, parse_line,
};
pub use tools::{is_hidden_name, path_relative_to, path_to_log_string, should_include_in_walk};
pub use unit::{DigestUnit, UnitError};
