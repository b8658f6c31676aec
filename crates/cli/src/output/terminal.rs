//! Terminal output formatting

use colored::Colorize;
use std::time::Instant;
use typegate_core::report::render_diagnostic;
use typegate_core::{
    Diagnostic, MissingComponent, Pattern, RunReport, Summary, TierAction, TierOutcome,
};

pub fn format_diagnostic(diagnostic: &Diagnostic, ignored: bool) -> String {
    if ignored {
        format!("  {} {}", "·".dimmed(), render_diagnostic(diagnostic).dimmed())
    } else {
        format!("  {} {}", "⚠️ ", render_diagnostic(diagnostic))
    }
}

pub fn format_tier(outcome: &TierOutcome) -> String {
    let action = match outcome.action {
        TierAction::Build => format!("{:<10}", "built").green(),
        TierAction::Validate if outcome.is_stale() => format!("{:<10}", "stale").yellow(),
        TierAction::Validate => format!("{:<10}", "validated").green(),
        TierAction::Skip => format!("{:<10}", "reused").dimmed(),
    };
    format!(
        "  {:<22} {} {}",
        outcome.tier.to_string(),
        action,
        outcome.database.display().to_string().dimmed()
    )
}

pub fn format_stale_notice(outcome: &TierOutcome, notice: &str) -> String {
    format!("  {}: {} database: {}", "stale".yellow(), outcome.tier, notice)
}

pub fn format_missing(missing: &MissingComponent) -> String {
    format!(
        "  {}: {} component `{}` not found, omitted from the database",
        "warn".yellow(),
        missing.tier,
        missing.name
    )
}

pub fn format_unused(pattern: &Pattern) -> String {
    format!("  {}: {}", "unused pattern".yellow(), pattern)
}

pub fn format_summary(summary: &Summary) -> String {
    let message = summary.message();
    if summary.is_success() {
        message.green().bold().to_string()
    } else {
        message.red().bold().to_string()
    }
}

/// Tier notes shared by every command that runs the orchestrator.
pub fn print_tiers(report: &RunReport) {
    println!();
    for outcome in &report.tiers {
        println!("{}", format_tier(outcome));
    }

    for outcome in report.stale_tiers() {
        for notice in &outcome.stale {
            println!("{}", format_stale_notice(outcome, notice));
        }
    }
    for hint in rebuild_hints(report) {
        println!("  {}", hint.dimmed());
    }
    for missing in &report.missing {
        println!("{}", format_missing(missing));
    }
}

/// One hint per tier whose database reported stale notices.
pub fn rebuild_hints(report: &RunReport) -> Vec<String> {
    report
        .stale_tiers()
        .map(|outcome| {
            format!(
                "Run `typegate clean --tier {}` to rebuild the stale {} database",
                outcome.tier.short_name(),
                outcome.tier
            )
        })
        .collect()
}

pub fn print_report(report: &RunReport, list_unused: bool, start: Instant) {
    print_tiers(report);

    if let Some(result) = &report.result {
        if !result.ignored.is_empty() || !result.failed.is_empty() {
            println!();
        }
        for diagnostic in &result.ignored {
            println!("{}", format_diagnostic(diagnostic, true));
        }
        for diagnostic in &result.failed {
            println!("{}", format_diagnostic(diagnostic, false));
        }
    }

    if list_unused && !report.unused_patterns.is_empty() {
        println!();
        for pattern in &report.unused_patterns {
            println!("{}", format_unused(pattern));
        }
    }

    println!();
    println!("  {}", "\u{2500}".repeat(60).dimmed());
    if let Some(result) = &report.result {
        println!("  {}", format_summary(&Summary::of(result)));
    }
    println!("  Time: {:.1}s", start.elapsed().as_secs_f64());
}
