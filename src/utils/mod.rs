pub mod config;
pub mod fd_limit;
pub mod logger;
pub mod settings;

pub use config::*;
pub use fd_limit::{FDS_PER_WORKER, cap_workers_by_fd_limit, max_open_fds, max_workers_by_fd_limit};
pub use logger::{Colors, setup_logging};
pub use settings::{DirsumToml, apply_file_to_opts, load_settings, parse_settings};
