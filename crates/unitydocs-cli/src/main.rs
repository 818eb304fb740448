//! Command-line interface for unitydocs.
//!
//! Usage:
//!   unitydocs html2md `<input>` [`<output-dir>`] [--clean] [--recursive] [--ignore `<name>`]...
//!   unitydocs md2html `<input>` [`<output-dir>`] [--clean] [--recursive] [--ignore `<name>`]...

mod batch;
mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::Cli;

/// Exit status when one or more files failed to convert
const EXIT_FAILED_SOME_FILES: i32 = 2;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let args = cli.command.args();

    let default_filter = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let job = cli.command.into_job();
    let report = batch::run(&job)?;

    if !report.is_success() {
        eprintln!("{}", report.failure_summary());
        std::process::exit(EXIT_FAILED_SOME_FILES);
    }

    Ok(())
}
