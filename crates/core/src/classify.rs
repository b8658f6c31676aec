//! Warning classification: partition diagnostics by ignore patterns

use crate::diagnostic::Diagnostic;
use crate::pattern::Pattern;
use serde::Serialize;

/// One batch of diagnostics split into ignored and failing sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedResult {
    pub ignored: Vec<Diagnostic>,
    pub failed: Vec<Diagnostic>,
}

impl ClassifiedResult {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Whether `diagnostic` matches at least one pattern.
pub fn is_ignored(diagnostic: &Diagnostic, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    let shape = diagnostic.shape();
    patterns.iter().any(|p| p.matches(&shape))
}

/// Partition `diagnostics` into `(ignored, failed)`.
///
/// Input order is preserved within each side. Pattern order has no effect.
pub fn classify(diagnostics: Vec<Diagnostic>, patterns: &[Pattern]) -> ClassifiedResult {
    let (ignored, failed) = diagnostics
        .into_iter()
        .partition(|d| is_ignored(d, patterns));
    ClassifiedResult { ignored, failed }
}

/// Patterns that matched none of `diagnostics`, in configured order.
pub fn unused_patterns<'a>(diagnostics: &[Diagnostic], patterns: &'a [Pattern]) -> Vec<&'a Pattern> {
    let shapes: Vec<_> = diagnostics.iter().map(Diagnostic::shape).collect();
    patterns
        .iter()
        .filter(|p| !shapes.iter().any(|s| p.matches(s)))
        .collect()
}
