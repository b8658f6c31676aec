//! JSON output formatting

use serde::Serialize;
use typegate_core::report::render_diagnostic;
use typegate_core::{
    Diagnostic, ExitStatus, MissingComponent, RunReport, Summary, Tier, TierAction, TierOutcome,
};

#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub tiers: Vec<JsonTier>,
    pub missing_components: Vec<MissingComponent>,
    pub failed: Vec<JsonDiagnostic>,
    pub ignored: Vec<JsonDiagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unused_patterns: Option<Vec<String>>,
    /// Absent when only the tiers were prepared
    pub summary: Option<JsonSummary>,
    pub exit_status: ExitStatus,
}

#[derive(Debug, Serialize)]
pub struct JsonTier {
    pub tier: Tier,
    pub action: TierAction,
    pub database: String,
    pub stale: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    pub category: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub message: String,
    /// The `{category, location, detail}` term ignore patterns match against
    pub shape: String,
}

#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub outcome: Summary,
    pub message: String,
}

impl From<&TierOutcome> for JsonTier {
    fn from(outcome: &TierOutcome) -> Self {
        Self {
            tier: outcome.tier,
            action: outcome.action,
            database: outcome.database.display().to_string(),
            stale: outcome.stale.clone(),
        }
    }
}

impl From<&Diagnostic> for JsonDiagnostic {
    fn from(d: &Diagnostic) -> Self {
        Self {
            category: d.category.clone(),
            file: d.location.as_ref().map(|loc| loc.file.display().to_string()),
            line: d.location.as_ref().map(|loc| loc.line),
            message: render_diagnostic(d),
            shape: d.shape().to_string(),
        }
    }
}

pub fn build_output(report: &RunReport, list_unused: bool) -> JsonOutput {
    let (failed, ignored) = match &report.result {
        Some(result) => (
            result.failed.iter().map(JsonDiagnostic::from).collect(),
            result.ignored.iter().map(JsonDiagnostic::from).collect(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    JsonOutput {
        tiers: report.tiers.iter().map(JsonTier::from).collect(),
        missing_components: report.missing.clone(),
        failed,
        ignored,
        unused_patterns: list_unused.then(|| {
            report
                .unused_patterns
                .iter()
                .map(|p| p.to_string())
                .collect()
        }),
        summary: report.result.as_ref().map(|result| {
            let outcome = Summary::of(result);
            JsonSummary {
                message: outcome.message(),
                outcome,
            }
        }),
        exit_status: report.exit_status(),
    }
}

pub fn print_report(report: &RunReport, list_unused: bool) {
    match serde_json::to_string_pretty(&build_output(report, list_unused)) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize JSON: {}", e),
    }
}
