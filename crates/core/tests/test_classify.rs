//! Tests for diagnostic classification and reporting

use std::collections::HashSet;
use typegate_core::report::render_diagnostic;
use typegate_core::{
    classify, is_ignored, parse_pattern, unused_patterns, Diagnostic, ExitStatus, Pattern, Summary,
    Term,
};

fn mfa(m: &str, f: &str, a: i64) -> Term {
    Term::Tuple(vec![Term::str(m), Term::str(f), Term::Int(a)])
}

fn return_only_exit() -> Diagnostic {
    Diagnostic::at(
        "warn_return_only_exit",
        "x.ex",
        10,
        Term::Tuple(vec![
            Term::atom("no_return"),
            Term::List(vec![Term::atom("only_explicit")]),
        ]),
    )
}

fn unknown_function() -> Diagnostic {
    Diagnostic::at("unknown_function", "a.ex", 5, mfa("Foo", "bar", 2))
}

fn batch() -> Vec<Diagnostic> {
    vec![
        unknown_function(),
        return_only_exit(),
        Diagnostic::at("call", "lib/b.ex", 3, Term::atom("never_returns")),
        Diagnostic::new("unknown_behaviour", None, Term::atom("GenThing")),
    ]
}

fn patterns(srcs: &[&str]) -> Vec<Pattern> {
    srcs.iter().map(|s| parse_pattern(s).unwrap()).collect()
}

// ── scenarios ───────────────────────────────────────────────────

#[test]
fn test_unknown_function_without_patterns_fails() {
    let result = classify(vec![unknown_function()], &[]);

    assert!(result.ignored.is_empty());
    assert_eq!(result.failed, vec![unknown_function()]);

    let text = render_diagnostic(&result.failed[0]);
    assert_eq!(text, "Unknown function: Foo:bar/2");
    assert!(!text.contains(":5"));
    assert_eq!(ExitStatus::for_result(&result), ExitStatus::WarningsFound);
}

#[test]
fn test_return_only_exit_is_ignored_by_wildcard_pattern() {
    let pats = patterns(&["{warn_return_only_exit, _, {no_return, _}}"]);
    let result = classify(vec![return_only_exit()], &pats);

    assert_eq!(result.ignored, vec![return_only_exit()]);
    assert!(result.failed.is_empty());
    assert_eq!(ExitStatus::for_result(&result), ExitStatus::Success);
}

// ── matching ────────────────────────────────────────────────────

#[test]
fn test_wildcard_matches_nested_structures() {
    let pats = patterns(&["{unknown_function, _, _}"]);
    assert!(is_ignored(&unknown_function(), &pats));

    let nested = Diagnostic::at(
        "unknown_function",
        "c.ex",
        1,
        Term::List(vec![Term::Tuple(vec![Term::Int(1), Term::List(vec![])])]),
    );
    assert!(is_ignored(&nested, &pats));
}

#[test]
fn test_exact_pattern_requires_structural_equality() {
    let exact = patterns(&[r#"{unknown_function, {"a.ex", 5}, {"Foo", "bar", 2}}"#]);
    assert!(!exact[0].has_wildcard());
    assert!(is_ignored(&unknown_function(), &exact));

    let other_arity = Diagnostic::at("unknown_function", "a.ex", 5, mfa("Foo", "bar", 3));
    assert!(!is_ignored(&other_arity, &exact));

    let other_line = Diagnostic::at("unknown_function", "a.ex", 6, mfa("Foo", "bar", 2));
    assert!(!is_ignored(&other_line, &exact));
}

#[test]
fn test_location_can_be_matched_partially() {
    let pats = patterns(&[r#"{call, {"lib/b.ex", _}, _}"#]);
    let result = classify(batch(), &pats);
    assert_eq!(result.ignored.len(), 1);
    assert_eq!(result.ignored[0].category, "call");
}

#[test]
fn test_missing_location_matches_none_atom() {
    let pats = patterns(&["{unknown_behaviour, none, _}"]);
    let result = classify(batch(), &pats);
    assert_eq!(result.ignored.len(), 1);
    assert_eq!(result.ignored[0].category, "unknown_behaviour");
}

// ── properties ──────────────────────────────────────────────────

#[test]
fn test_partition_is_complete_and_disjoint() {
    let pats = patterns(&["{unknown_function, _, _}", "{call, _, _}"]);
    let input = batch();
    let result = classify(input.clone(), &pats);

    let ignored: HashSet<_> = result.ignored.iter().cloned().collect();
    let failed: HashSet<_> = result.failed.iter().cloned().collect();
    let all: HashSet<_> = input.into_iter().collect();

    assert!(ignored.is_disjoint(&failed));
    assert_eq!(&ignored | &failed, all);
}

#[test]
fn test_classification_ignores_pattern_and_input_order() {
    let pats = patterns(&[
        "{unknown_function, _, _}",
        "{warn_return_only_exit, _, _}",
        "{nothing_matches, _, _}",
    ]);
    let mut reversed_pats = pats.clone();
    reversed_pats.reverse();
    let mut reversed_input = batch();
    reversed_input.reverse();

    let a = classify(batch(), &pats);
    let b = classify(reversed_input, &reversed_pats);

    let as_set = |v: &[Diagnostic]| v.iter().cloned().collect::<HashSet<_>>();
    assert_eq!(as_set(&a.ignored), as_set(&b.ignored));
    assert_eq!(as_set(&a.failed), as_set(&b.failed));
}

#[test]
fn test_classification_is_repeatable() {
    let pats = patterns(&["{call, _, _}"]);
    assert_eq!(classify(batch(), &pats), classify(batch(), &pats));
}

#[test]
fn test_unused_patterns_are_listed() {
    let pats = patterns(&["{call, _, _}", "{never_seen, _, _}"]);
    let unused = unused_patterns(&batch(), &pats);
    assert_eq!(unused.len(), 1);
    assert_eq!(unused[0].to_string(), "{:never_seen, _, _}");
}

// ── summaries ───────────────────────────────────────────────────

#[test]
fn test_summary_cases() {
    let clean = classify(vec![], &[]);
    assert_eq!(Summary::of(&clean), Summary::Clean);
    assert!(Summary::of(&clean).is_success());
    assert!(!Summary::of(&clean)
        .message()
        .chars()
        .any(|c| c.is_ascii_digit()));

    let ignored_only = classify(vec![return_only_exit()], &patterns(&["_"]));
    assert_eq!(Summary::of(&ignored_only), Summary::IgnoredOnly { ignored: 1 });
    assert!(Summary::of(&ignored_only).is_success());

    let failed_only = classify(vec![unknown_function()], &[]);
    assert_eq!(Summary::of(&failed_only), Summary::FailedOnly { failed: 1 });
    assert!(!Summary::of(&failed_only).is_success());

    let mixed = classify(batch(), &patterns(&["{call, _, _}"]));
    let summary = Summary::of(&mixed);
    assert_eq!(summary, Summary::Mixed { failed: 3, ignored: 1 });
    assert_eq!(summary.message(), "3 warning(s) found, 1 ignored");
}

#[test]
fn test_ignored_warnings_never_fail() {
    let result = classify(batch(), &patterns(&["_"]));
    assert_eq!(result.ignored.len(), 4);
    assert!(ExitStatus::for_result(&result).is_success());
}
