//! Diagnostic records emitted by the analysis engine

use crate::term::Term;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source position of a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: u32,
}

/// A single finding from the analyze pass
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Warning category (e.g. `unknown_function`)
    pub category: String,

    /// Where the engine attributes the finding, if anywhere
    #[serde(default)]
    pub location: Option<Location>,

    /// Category-specific structured data
    pub detail: Term,

    /// Human-readable text from the engine's own formatter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Diagnostic {
    pub fn new(category: impl Into<String>, location: Option<Location>, detail: Term) -> Self {
        Self {
            category: category.into(),
            location,
            detail,
            message: None,
        }
    }

    pub fn at(
        category: impl Into<String>,
        file: impl Into<PathBuf>,
        line: u32,
        detail: Term,
    ) -> Self {
        Self::new(
            category,
            Some(Location {
                file: file.into(),
                line,
            }),
            detail,
        )
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The value ignore patterns are matched against:
    /// `{category, {"file", line} | none, detail}`.
    pub fn shape(&self) -> Term {
        let location = match &self.location {
            Some(loc) => Term::Tuple(vec![
                Term::Str(loc.file.to_string_lossy().into_owned()),
                Term::Int(i64::from(loc.line)),
            ]),
            None => Term::atom("none"),
        };
        Term::Tuple(vec![
            Term::Atom(self.category.clone()),
            location,
            self.detail.clone(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_includes_location_tuple() {
        let d = Diagnostic::at("call", "lib/a.ex", 7, Term::atom("x"));
        assert_eq!(d.shape().to_string(), r#"{:call, {"lib/a.ex", 7}, :x}"#);
    }

    #[test]
    fn shape_without_location_uses_none() {
        let d = Diagnostic::new("unknown_behaviour", None, Term::atom("Foo"));
        assert_eq!(d.shape().to_string(), "{:unknown_behaviour, :none, :Foo}");
    }

    #[test]
    fn decodes_engine_json() {
        let line = r#"{"category":"unknown_function","location":{"file":"a.ex","line":5},"detail":{"tuple":[{"atom":"Foo"},{"atom":"bar"},{"int":2}]}}"#;
        let d: Diagnostic = serde_json::from_str(line).unwrap();
        assert_eq!(d.category, "unknown_function");
        assert_eq!(d.location.unwrap().line, 5);
        assert!(d.message.is_none());
    }
}
