//! CLI command handler: generate by default; --check verifies against a previous log.

use anyhow::Result;
use log::info;
use std::path::Path;

use crate::Opts;
use crate::RunSummary;
use crate::engine::arg_parser::Cli;
use crate::pipeline::run_pipeline;
use crate::utils::{Colors, apply_file_to_opts, load_settings, setup_logging};

/// Layer defaults, the root's settings file, then explicit CLI flags.
pub fn build_opts(cli: &Cli) -> Opts {
    let mut opts = Opts {
        root: cli.input.clone(),
        show_progress: true,
        ..Opts::default()
    };

    let settings_dir = if cli.input.is_dir() {
        cli.input.as_path()
    } else {
        cli.input.parent().unwrap_or(Path::new("."))
    };
    if let Some(file) = load_settings(settings_dir) {
        apply_file_to_opts(&file, &mut opts);
        // A relative output in the settings file is relative to the file, not the cwd.
        if let Some(out) = opts
            .output
            .as_mut()
            .filter(|p| p.is_relative() && !p.as_os_str().is_empty())
        {
            *out = settings_dir.join(&*out);
        }
    }

    if let Some(ref output) = cli.output {
        opts.output = Some(output.clone());
    }
    if let Some(n) = cli.threads {
        opts.num_threads = Some(n as usize);
    }
    opts.check = cli.check.clone();
    macro_rules! apply_cli_flag {
        ($cli_field:ident => $opts_field:ident) => {
            if let Some(v) = cli.$cli_field {
                opts.$opts_field = v;
            }
        };
    }
    apply_cli_flag!(resume => resume);
    apply_cli_flag!(hidden => include_hidden);
    apply_cli_flag!(follow_links => follow_links);
    apply_cli_flag!(parallel_walk => parallel_walk);
    apply_cli_flag!(strict => strict);
    if cli.quiet {
        opts.show_progress = false;
    }
    opts
}

fn print_summary(summary: &RunSummary) {
    let ok = summary.written.saturating_sub(summary.failed);
    info!(
        "finished: {} | {} | {}",
        Colors::colorize(Colors::OK, &format!("ok: {}", ok)),
        Colors::colorize(Colors::FAILED, &format!("failed: {}", summary.failed)),
        Colors::colorize(
            Colors::SKIPPED,
            &format!("already done: {}", summary.already_done)
        )
    );
}

/// Run generate or verify for the parsed command line.
pub fn handle_run(cli: &Cli) -> Result<RunSummary> {
    setup_logging(cli.verbose);
    let opts = build_opts(cli);
    log::debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    let summary = run_pipeline(&opts)?;
    print_summary(&summary);
    Ok(summary)
}
