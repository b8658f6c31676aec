//! Structured values carried in diagnostic details

use crate::pattern::{parse_pattern, PatternError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A structured value emitted by the analysis engine.
///
/// The text form mirrors the ignore-file syntax: atoms are bare identifiers
/// (or `:name` / `:"quoted name"`), strings are double-quoted, tuples use
/// `{a, b}` and lists use `[a, b]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Atom(String),
    Int(i64),
    Str(String),
    Tuple(Vec<Term>),
    List(Vec<Term>),
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Term::Str(value.into())
    }

    /// Render without quoting atoms or strings, e.g. for `Foo:bar/2`.
    pub fn to_bare_string(&self) -> String {
        match self {
            Term::Atom(name) => name.clone(),
            Term::Str(value) => value.clone(),
            Term::Int(n) => n.to_string(),
            other => other.to_string(),
        }
    }
}

fn is_plain_atom(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '@' | '?' | '!'))
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

pub(crate) fn write_seq<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: &[T],
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) if is_plain_atom(name) => write!(f, ":{}", name),
            Term::Atom(name) => {
                f.write_str(":")?;
                write_escaped(f, name)
            }
            Term::Int(n) => write!(f, "{}", n),
            Term::Str(value) => write_escaped(f, value),
            Term::Tuple(items) => write_seq(f, "{", items, "}"),
            Term::List(items) => write_seq(f, "[", items, "]"),
        }
    }
}

impl FromStr for Term {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pattern(s)?.into_term()
    }
}
