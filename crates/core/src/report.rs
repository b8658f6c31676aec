//! Result reporting: summaries, per-diagnostic text and exit status

use crate::classify::ClassifiedResult;
use crate::diagnostic::Diagnostic;
use crate::term::Term;
use serde::Serialize;
use std::process::ExitCode;

/// The four mutually exclusive outcomes of a classified batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Summary {
    Clean,
    IgnoredOnly { ignored: usize },
    FailedOnly { failed: usize },
    Mixed { failed: usize, ignored: usize },
}

impl Summary {
    pub fn of(result: &ClassifiedResult) -> Self {
        match (result.ignored.len(), result.failed.len()) {
            (0, 0) => Summary::Clean,
            (ignored, 0) => Summary::IgnoredOnly { ignored },
            (0, failed) => Summary::FailedOnly { failed },
            (ignored, failed) => Summary::Mixed { failed, ignored },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Summary::Clean | Summary::IgnoredOnly { .. })
    }

    pub fn message(&self) -> String {
        match self {
            Summary::Clean => "Passed, no warnings".to_string(),
            Summary::IgnoredOnly { ignored } => {
                format!("Passed, {} warning(s) ignored", ignored)
            }
            Summary::FailedOnly { failed } => format!("{} warning(s) found", failed),
            Summary::Mixed { failed, ignored } => {
                format!("{} warning(s) found, {} ignored", failed, ignored)
            }
        }
    }
}

/// Final process status; only ever moves from success to failure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatus {
    #[default]
    Success,
    WarningsFound,
}

impl ExitStatus {
    pub fn for_result(result: &ClassifiedResult) -> Self {
        if result.has_failures() {
            ExitStatus::WarningsFound
        } else {
            ExitStatus::Success
        }
    }

    pub fn escalate(self, other: ExitStatus) -> Self {
        match (self, other) {
            (ExitStatus::Success, ExitStatus::Success) => ExitStatus::Success,
            _ => ExitStatus::WarningsFound,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitStatus::Success
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::WarningsFound => ExitCode::from(2),
        }
    }
}

/// Human-readable text for one diagnostic.
///
/// Unknown function/type/behaviour references print the referenced symbol
/// instead of a location, since the engine attributes them to a placeholder
/// position.
pub fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    match diagnostic.category.as_str() {
        "unknown_function" => format!("Unknown function: {}", render_mfa(&diagnostic.detail)),
        "unknown_type" => format!("Unknown type: {}", render_mfa(&diagnostic.detail)),
        "unknown_behaviour" | "unknown_behavior" => format!(
            "Unknown behaviour: {}",
            render_symbol(&diagnostic.detail)
        ),
        _ => {
            let location = diagnostic
                .location
                .as_ref()
                .map(|loc| format!("{}:{}: ", loc.file.display(), loc.line))
                .unwrap_or_default();
            match &diagnostic.message {
                Some(message) => format!("{}{}", location, message.trim_end()),
                None => format!("{}{} {}", location, diagnostic.category, diagnostic.detail),
            }
        }
    }
}

fn render_mfa(detail: &Term) -> String {
    match detail {
        Term::Tuple(parts) if parts.len() == 3 => format!(
            "{}:{}/{}",
            parts[0].to_bare_string(),
            parts[1].to_bare_string(),
            parts[2].to_bare_string()
        ),
        other => render_symbol(other),
    }
}

/// A behaviour is usually a bare module name, sometimes wrapped in a 1-tuple.
fn render_symbol(detail: &Term) -> String {
    match detail {
        Term::Tuple(parts) if parts.len() == 1 => parts[0].to_bare_string(),
        other => other.to_bare_string(),
    }
}

/// Categories whose engine location is a placeholder, not a real position
fn has_placeholder_location(category: &str) -> bool {
    matches!(
        category,
        "unknown_function" | "unknown_type" | "unknown_behaviour" | "unknown_behavior"
    )
}

/// One-line `file:line:category` form used by the short output format.
pub fn render_short(diagnostic: &Diagnostic) -> String {
    let location = diagnostic
        .location
        .as_ref()
        .filter(|_| !has_placeholder_location(&diagnostic.category));
    match location {
        Some(loc) => format!(
            "{}:{}:{} {}",
            loc.file.display(),
            loc.line,
            diagnostic.category,
            render_diagnostic(diagnostic)
        ),
        None => format!(
            "{} {}",
            diagnostic.category,
            render_diagnostic(diagnostic)
        ),
    }
}
