use log::{debug, warn};
use std::path::PathBuf;

/// Report walk entries that were left out. Individual paths are only listed at debug level.
pub fn report_skipped_paths(skipped: &[(PathBuf, String)]) {
    if skipped.is_empty() {
        return;
    }
    warn!(
        "Skipped {} paths due to permission errors or access issues",
        skipped.len()
    );
    for (path, msg) in skipped {
        debug!("  skipped: {} ({})", path.display(), msg);
    }
}
