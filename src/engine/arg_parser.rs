use clap::Parser;
use std::path::PathBuf;

struct DefaultArgs;

impl DefaultArgs {
    pub const INPUT: &'static str = ".";
}

/// Concurrent MD5 checksums for a directory tree, with resume and verification.
#[derive(Clone, Debug, Parser)]
#[command(name = "dirsum", version)]
#[command(about = "Generate or check md5 for every file under a directory; --resume picks up an interrupted run.")]
pub struct Cli {
    /// The path to file or directory. Default: current directory.
    #[arg(long, short, value_name = "PATH", default_value = DefaultArgs::INPUT)]
    pub input: PathBuf,

    /// The path to output file. Omit (or pass an empty string) to write to stdout.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// How many threads to use. Default: available cores, capped by the open-file limit.
    #[arg(long, short = 't', value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: Option<u16>,

    /// Check files against an existing md5 log instead of generating one.
    #[arg(long, short = 'c', value_name = "LOG")]
    pub check: Option<PathBuf>,

    /// Skip paths already recorded in the output file and append to it.
    #[arg(long, short = 'r', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub resume: Option<bool>,

    /// Include hidden files and directories (names starting with '.').
    #[arg(long, short = 'a', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub hidden: Option<bool>,

    /// Follow symbolic links.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Walk the tree with the parallel walker.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub parallel_walk: Option<bool>,

    /// Strict mode: fail on first unreadable directory instead of skipping it.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub strict: Option<bool>,

    /// Do not show the progress bar.
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
