//! Boundary to the external type-analysis engine
//!
//! The engine is a black box with three operations. [`CommandEngine`] drives
//! an executable that speaks a small argv protocol:
//!
//! ```text
//! <cmd> [args..] build   --output <db> [--init <db>]... [--input <path>]...
//! <cmd> [args..] check   --database <db>
//! <cmd> [args..] analyze [--database <db>]... [--warning <name>]... <target>...
//! ```
//!
//! A non-zero exit status is a structural failure. `check` prints one
//! stale-database notice per stdout line; `analyze` prints one JSON-encoded
//! [`Diagnostic`] per stdout line.

use crate::diagnostic::Diagnostic;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// The engine could not complete an operation at all
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to launch analysis engine `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("analysis engine {operation} failed ({status}): {stderr}")]
    Failed {
        operation: &'static str,
        status: String,
        stderr: String,
    },

    #[error("analysis engine produced malformed output on line {line}: {source}")]
    MalformedOutput {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub trait AnalysisEngine {
    /// Build a database at `output` from `inputs`, seeded with `predecessors`.
    fn build(
        &self,
        output: &Path,
        inputs: &[PathBuf],
        predecessors: &[PathBuf],
    ) -> Result<(), EngineError>;

    /// Validate an existing database. Returns stale-database notices; an
    /// empty list means the database is consistent.
    fn check(&self, database: &Path) -> Result<Vec<String>, EngineError>;

    /// Analyze `targets` against `databases` with the given warning categories enabled.
    fn analyze(
        &self,
        databases: &[PathBuf],
        targets: &[PathBuf],
        warnings: &[String],
    ) -> Result<Vec<Diagnostic>, EngineError>;
}

/// Runs the engine as a child process
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn invoke(&self, operation: &'static str, extra: Vec<OsString>) -> Result<String, EngineError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(operation).args(&extra);
        debug!(program = %self.program, operation, args = ?extra, "invoking analysis engine");

        let output = cmd.output().map_err(|source| EngineError::Spawn {
            command: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                operation,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn flagged<'a>(flag: &str, paths: impl IntoIterator<Item = &'a PathBuf>) -> Vec<OsString> {
    paths
        .into_iter()
        .flat_map(|p| [OsString::from(flag), p.as_os_str().to_os_string()])
        .collect()
}

impl AnalysisEngine for CommandEngine {
    fn build(
        &self,
        output: &Path,
        inputs: &[PathBuf],
        predecessors: &[PathBuf],
    ) -> Result<(), EngineError> {
        let mut extra = vec![OsString::from("--output"), output.as_os_str().to_os_string()];
        extra.extend(flagged("--init", predecessors));
        extra.extend(flagged("--input", inputs));
        self.invoke("build", extra).map(|_| ())
    }

    fn check(&self, database: &Path) -> Result<Vec<String>, EngineError> {
        let extra = vec![OsString::from("--database"), database.as_os_str().to_os_string()];
        let stdout = self.invoke("check", extra)?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    fn analyze(
        &self,
        databases: &[PathBuf],
        targets: &[PathBuf],
        warnings: &[String],
    ) -> Result<Vec<Diagnostic>, EngineError> {
        let mut extra = flagged("--database", databases);
        for warning in warnings {
            extra.push(OsString::from("--warning"));
            extra.push(OsString::from(warning));
        }
        extra.extend(targets.iter().map(|t| t.as_os_str().to_os_string()));
        let stdout = self.invoke("analyze", extra)?;
        parse_diagnostics(&stdout)
    }
}

/// Decode JSON-lines engine output, skipping blank lines.
pub fn parse_diagnostics(output: &str) -> Result<Vec<Diagnostic>, EngineError> {
    output
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| EngineError::MalformedOutput {
                line: idx + 1,
                source,
            })
        })
        .collect()
}
