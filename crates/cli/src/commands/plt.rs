//! Prepare the tier databases only

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
    let session = Session::open(path)?;
    let format = resolve_format(cli.format, &session.config)?;

    let progress: Box<dyn ProgressSink> = match format {
        OutputFormat::Terminal => {
            eprintln!(
                "{}",
                format!("  typegate v{}: preparing databases", typegate_core::VERSION).bold()
            );
            eprintln!();
            Box::new(StepProgress::new())
        }
        _ => Box::new(Silent),
    };

    // Patterns are irrelevant without an analyze pass.
    let options = session.run_options(cli, false);
    let report = session.runner(Vec::new()).run(options, progress.as_ref())?;
    drop(progress);

    match format {
        OutputFormat::Terminal => {
            output::terminal::print_tiers(&report);
            println!();
            println!("  Time: {:.1}s", start.elapsed().as_secs_f64());
        }
        // Nothing was analyzed, so there are no warning lines.
        OutputFormat::Short => {}
        OutputFormat::Json => output::json::print_report(&report, false),
    }

    Ok(ExitCode::SUCCESS)
}
