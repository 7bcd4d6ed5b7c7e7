//! End-to-end behavior of suppression directives through the full suite.

use sql_lint::rules::{ast_dependent_checks, LineLength};
use sql_lint::{Analyzer, Config, RuleKind};

fn findings(text: &str, config: &Config) -> Vec<(RuleKind, usize, usize)> {
    sql_lint::lint_source(text, config, None)
        .expect("Failed to lint")
        .diagnostics
        .iter()
        .map(|d| (d.rule, d.line, d.column))
        .collect()
}

// --- NOLINT / LINT toggling ---

#[test]
fn nolint_and_lint_toggle_per_line() {
    let text = "Select 3 a;\n\
                -- NOLINT ( alias, consistent-letter-case)\n\
                SELEcT 3 a;\n\
                --LINT(alias)\n \
                Select 3 a;\n\
                --NOLINT  (  alias)\n\
                --   LINT (consistent-letter-case)\n \
                Select 3 a;";

    assert_eq!(
        findings(text, &Config::default()),
        [
            (RuleKind::ConsistentLetterCase, 1, 1),
            (RuleKind::Alias, 1, 10),
            (RuleKind::Alias, 5, 11),
            (RuleKind::ConsistentLetterCase, 8, 2),
        ]
    );
}

#[test]
fn directive_on_statement_line_applies_from_next_line() {
    let text = "SELECT COUNT(1) FROM T; -- NOLINT(count-star)\nSELECT COUNT(1) FROM T;\n";
    assert_eq!(findings(text, &Config::default()), [(RuleKind::CountStar, 1, 15)]);
}

#[test]
fn free_text_after_directive_is_ignored() {
    let text = "-- NOLINT(count-star) legacy report, see owners\nSELECT COUNT(1) FROM T;\n";
    assert!(findings(text, &Config::default()).is_empty());
}

// --- Unknown names ---

#[test]
fn unknown_name_is_reported_once_and_suppresses_nothing() {
    let text = "-- NOLINT(not-a-real-check)\nSELECT 1;";
    let report = sql_lint::lint_source(text, &Config::default(), None).expect("Failed to lint");

    assert_eq!(report.diagnostics.len(), 1);
    let d = &report.diagnostics[0];
    assert_eq!(d.rule, RuleKind::UnknownSuppression);
    assert_eq!((d.line, d.column), (1, 28));
    assert_eq!(d.message, "Unknown NOLINT error category: 'not-a-real-check'");
}

#[test]
fn mixed_known_and_unknown_names() {
    let text = "-- NOLINT(bogus, count-star)\nSELECT COUNT(1) FROM T;\n";
    assert_eq!(findings(text, &Config::default()), [(RuleKind::UnknownSuppression, 1, 29)]);
}

// --- Parse failures ---

#[test]
fn ast_checks_stop_at_parse_failure_but_text_checks_continue() {
    let text = "SELECT 3+5\nSELECT 4+6;";
    let config = Config::parse("[linter]\nline_limit = 5\n").expect("Failed to parse config");

    let ast_only = Analyzer::builder()
        .root(".")
        .registry(ast_dependent_checks())
        .config(config.clone())
        .build()
        .expect("Failed to build analyzer");
    assert!(ast_only.lint_source(text, None).is_clean());

    let with_line_length = Analyzer::builder()
        .root(".")
        .registry(ast_dependent_checks().with(LineLength))
        .config(config)
        .build()
        .expect("Failed to build analyzer");
    let report = with_line_length.lint_source(text, None);
    let found: Vec<_> = report.diagnostics.iter().map(|d| (d.rule, d.line, d.column)).collect();
    assert_eq!(found, [(RuleKind::LineLimitExceed, 1, 11)]);
}

#[test]
fn statements_before_parse_failure_are_not_inspected() {
    let text = "SELECT 1 a;\nselect 2 FROM;\n";

    let ast_only = Analyzer::builder()
        .root(".")
        .registry(ast_dependent_checks())
        .build()
        .expect("Failed to build analyzer");
    assert!(ast_only.lint_source(text, None).is_clean());

    assert_eq!(
        findings(text, &Config::default()),
        [(RuleKind::ParserFailed, 2, 14)]
    );
}

// --- Configuration ---

#[test]
fn config_nolint_cannot_be_reenabled_by_directive() {
    let config = Config::parse("[linter]\nnolint = [\"alias\"]\n").expect("Failed to parse config");
    let text = "-- LINT(alias)\nSELECT 3 a;\n";
    assert!(findings(text, &config).is_empty());
}

#[test]
fn disabled_rule_table_matches_nolint() {
    let config = Config::parse("[rules.consistent-letter-case]\nenabled = false\n").expect("Failed to parse config");
    assert!(findings("select 3 AS a;\n", &config).is_empty());
}

#[test]
fn lowercase_keyword_style() {
    let config = Config::parse("[linter]\nupper_keyword = false\n").expect("Failed to parse config");
    assert_eq!(
        findings("select 1 AS a;\n", &config),
        [(RuleKind::ConsistentLetterCase, 1, 10)]
    );
}
