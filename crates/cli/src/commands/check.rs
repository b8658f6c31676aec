//! Default command: compile, prepare the tier databases, analyze and report

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use typegate_core::{ProgressSink, Silent};

use super::{resolve_format, Session};
use crate::output;
use crate::progress::StepProgress;
use crate::{Cli, OutputFormat};

pub fn run(path: Option<&Path>, cli: &Cli) -> Result<ExitCode> {
    let start = Instant::now();

    // ── 1. Config ────────────────────────────────────────────────
    let session = Session::open(path)?;
    let format = resolve_format(cli.format, &session.config)?;

    if format == OutputFormat::Terminal {
        eprintln!(
            "{}",
            format!("  typegate v{}: analyzing project", typegate_core::VERSION).bold()
        );
        eprintln!();
    }

    // ── 2. Ignore patterns ───────────────────────────────────────
    let patterns = session.config.ignore_patterns(&session.root)?;

    // ── 3. Tiers + analysis ──────────────────────────────────────
    let progress: Box<dyn ProgressSink> = match format {
        OutputFormat::Terminal => Box::new(StepProgress::new()),
        _ => Box::new(Silent),
    };
    let options = session.run_options(cli, true);
    let report = session.runner(patterns).run(options, progress.as_ref())?;
    drop(progress);

    // ── 4. Output ────────────────────────────────────────────────
    match format {
        OutputFormat::Terminal => {
            output::terminal::print_report(&report, cli.list_unused_patterns, start)
        }
        OutputFormat::Short => output::short::print_report(&report, cli.list_unused_patterns),
        OutputFormat::Json => output::json::print_report(&report, cli.list_unused_patterns),
    }

    let status = report.exit_status();
    if cli.ignore_exit_status && !status.is_success() {
        return Ok(ExitCode::SUCCESS);
    }
    Ok(status.into())
}
