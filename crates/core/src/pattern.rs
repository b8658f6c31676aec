//! Ignore patterns: wildcard templates matched against diagnostic shapes
//!
//! A pattern has the same shape as a diagnostic (`{category, location,
//! detail}`), but any position at any depth may be `_` (or `_name`), which
//! matches anything. Patterns with no wildcards collapse to [`Pattern::Exact`]
//! and only match structurally equal values.

use crate::term::{write_seq, Term};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unexpected `{found}` at offset {offset}, expected {expected}")]
    Unexpected {
        found: char,
        offset: usize,
        expected: &'static str,
    },

    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("integer out of range at offset {0}")]
    IntegerOverflow(usize),

    #[error("trailing input at offset {0}")]
    TrailingInput(usize),

    #[error("wildcard is not allowed in a concrete term")]
    WildcardInTerm,

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<PatternError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Matches any value, including nested structures
    Wildcard,
    /// Matches only a structurally equal value
    Exact(Term),
    Tuple(Vec<Pattern>),
    List(Vec<Pattern>),
}

impl Pattern {
    /// Build a tuple pattern, collapsing to `Exact` when no element is a wildcard.
    pub fn tuple(items: Vec<Pattern>) -> Self {
        match collect_exact(&items) {
            Some(terms) => Pattern::Exact(Term::Tuple(terms)),
            None => Pattern::Tuple(items),
        }
    }

    /// Build a list pattern, collapsing to `Exact` when no element is a wildcard.
    pub fn list(items: Vec<Pattern>) -> Self {
        match collect_exact(&items) {
            Some(terms) => Pattern::Exact(Term::List(terms)),
            None => Pattern::List(items),
        }
    }

    pub fn matches(&self, value: &Term) -> bool {
        match (self, value) {
            (Pattern::Wildcard, _) => true,
            (Pattern::Exact(expected), actual) => expected == actual,
            (Pattern::Tuple(parts), Term::Tuple(items))
            | (Pattern::List(parts), Term::List(items)) => {
                parts.len() == items.len()
                    && parts.iter().zip(items).all(|(p, item)| p.matches(item))
            }
            _ => false,
        }
    }

    pub fn has_wildcard(&self) -> bool {
        !matches!(self, Pattern::Exact(_))
    }

    /// Convert to a concrete term; fails if any position is a wildcard.
    pub fn into_term(self) -> Result<Term, PatternError> {
        match self {
            Pattern::Exact(term) => Ok(term),
            _ => Err(PatternError::WildcardInTerm),
        }
    }
}

fn collect_exact(items: &[Pattern]) -> Option<Vec<Term>> {
    items
        .iter()
        .map(|p| match p {
            Pattern::Exact(t) => Some(t.clone()),
            _ => None,
        })
        .collect()
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => f.write_str("_"),
            Pattern::Exact(term) => write!(f, "{}", term),
            Pattern::Tuple(items) => write_seq(f, "{", items, "}"),
            Pattern::List(items) => write_seq(f, "[", items, "]"),
        }
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pattern(s)
    }
}

/// Parse a single pattern; the whole input must be consumed.
pub fn parse_pattern(src: &str) -> Result<Pattern, PatternError> {
    let mut parser = Parser { src, pos: 0 };
    let pattern = parser.value()?;
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(PatternError::TrailingInput(parser.pos));
    }
    Ok(pattern)
}

/// Parse an ignore list: one pattern per line, blank lines and `#` comments skipped.
pub fn parse_ignore_list(content: &str) -> Result<Vec<Pattern>, PatternError> {
    let mut patterns = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let pattern = parse_pattern(trimmed).map_err(|e| PatternError::AtLine {
            line: idx + 1,
            source: Box::new(e),
        })?;
        patterns.push(pattern);
    }
    Ok(patterns)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn value(&mut self) -> Result<Pattern, PatternError> {
        self.skip_ws();
        let start = self.pos;
        match self.peek() {
            None => Err(PatternError::UnexpectedEnd {
                expected: "a value",
            }),
            Some('{') => {
                self.bump();
                Ok(Pattern::tuple(self.sequence('}')?))
            }
            Some('[') => {
                self.bump();
                Ok(Pattern::list(self.sequence(']')?))
            }
            Some('"') => Ok(Pattern::Exact(Term::Str(self.string()?))),
            Some(':') => {
                self.bump();
                let name = match self.peek() {
                    Some('"') => self.string()?,
                    Some(c) if is_ident_start(c) => self.ident(),
                    Some(c) => {
                        return Err(PatternError::Unexpected {
                            found: c,
                            offset: self.pos,
                            expected: "an atom name",
                        })
                    }
                    None => {
                        return Err(PatternError::UnexpectedEnd {
                            expected: "an atom name",
                        })
                    }
                };
                Ok(Pattern::Exact(Term::Atom(name)))
            }
            Some(c) if c == '-' || c.is_ascii_digit() => self.integer(start),
            Some(c) if is_ident_start(c) => {
                let name = self.ident();
                if name.starts_with('_') {
                    Ok(Pattern::Wildcard)
                } else {
                    Ok(Pattern::Exact(Term::Atom(name)))
                }
            }
            Some(c) => Err(PatternError::Unexpected {
                found: c,
                offset: start,
                expected: "a value",
            }),
        }
    }

    fn sequence(&mut self, close: char) -> Result<Vec<Pattern>, PatternError> {
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(close) {
            self.bump();
            return Ok(items);
        }
        loop {
            items.push(self.value()?);
            self.skip_ws();
            let offset = self.pos;
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(items),
                Some(c) => {
                    return Err(PatternError::Unexpected {
                        found: c,
                        offset,
                        expected: "`,` or a closing bracket",
                    })
                }
                None => {
                    return Err(PatternError::UnexpectedEnd {
                        expected: "`,` or a closing bracket",
                    })
                }
            }
        }
    }

    fn string(&mut self) -> Result<String, PatternError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(PatternError::UnterminatedString(start)),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => out.push(c),
                    None => return Err(PatternError::UnterminatedString(start)),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn integer(&mut self, start: usize) -> Result<Pattern, PatternError> {
        if self.peek() == Some('-') {
            self.bump();
        }
        let digits_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.bump();
        }
        if self.pos == digits_start {
            return match self.peek() {
                Some(c) => Err(PatternError::Unexpected {
                    found: c,
                    offset: self.pos,
                    expected: "a digit",
                }),
                None => Err(PatternError::UnexpectedEnd { expected: "a digit" }),
            };
        }
        let text: String = self.src[start..self.pos]
            .chars()
            .filter(|c| *c != '_')
            .collect();
        text.parse::<i64>()
            .map(|n| Pattern::Exact(Term::Int(n)))
            .map_err(|_| PatternError::IntegerOverflow(start))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '@' | '?' | '!')
}
