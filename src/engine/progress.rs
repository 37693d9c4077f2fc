//! Progress bar utilities. The bar is owned by the result writer and advanced once per written line.

use kdam::{Animation, Bar, BarExt};

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> Bar {
    kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " files"
    )
}

/// Bar for a run of `total` units, or `None` when progress is disabled.
pub fn setup_progress(show: bool, total: usize, desc: &'static str) -> Option<Bar> {
    show.then(|| create_progress_bar(ProgressBarConfig::new(total, desc, Animation::Classic)))
}

/// Advance by one unit.
pub fn advance(bar: &mut Option<Bar>) {
    if let Some(bar) = bar.as_mut() {
        let _ = bar.update(1);
    }
}

/// Final refresh and newline so later log output starts on its own line.
pub fn finish(bar: &mut Option<Bar>) {
    if let Some(bar) = bar.as_mut() {
        let _ = bar.refresh();
        eprintln!();
    }
}
