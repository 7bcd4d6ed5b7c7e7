//! Integration test: directives, ledger, registry and report together.

use sql_lint_core::{
    scan_directives, ActivationLedger, Analyzer, Check, CheckError, DiagnosticReport, RuleKind, RunContext,
    SourceText,
};

/// Flags every `1` outside strings and comments as `count-star`.
struct Ones;

impl Check for Ones {
    fn name(&self) -> &'static str {
        "ones"
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let bytes = ctx.source().bytes();
        let delimiter = ctx.source().delimiter();
        let mut report = DiagnosticReport::new();
        let mut i = 0;
        while i < bytes.len() {
            if sql_lint_core::scanner::skip_comment(bytes, &mut i, delimiter, true)
                || sql_lint_core::scanner::skip_string(bytes, &mut i)
            {
                i += 1;
                continue;
            }
            if bytes[i] == b'1' {
                ctx.emit(&mut report, RuleKind::CountStar, i, "one");
            }
            i += 1;
        }
        Ok(report)
    }
}

fn analyzer() -> Analyzer {
    Analyzer::builder()
        .root(".")
        .check(sql_lint_core::ParserSucceeds)
        .check(Ones)
        .build()
        .expect("Failed to build analyzer")
}

// ── Unknown directive names ──

#[test]
fn unknown_name_yields_one_diagnostic_and_no_suppression() {
    let text = "-- NOLINT(not-a-real-check)\nSELECT 1;";
    let source = SourceText::new(text, b'\n');
    let scan = scan_directives(&source);
    assert!(scan.events.is_empty());

    let report = analyzer().lint_source(text, None);
    let rules: Vec<_> = report.diagnostics.iter().map(|d| d.rule).collect();
    assert_eq!(rules, [RuleKind::UnknownSuppression, RuleKind::CountStar]);
}

#[test]
fn unknown_name_can_be_silenced_by_nolint() {
    let text = "-- NOLINT(nolint)\n-- NOLINT(bogus)\nSELECT 2;";
    assert!(analyzer().lint_source(text, None).is_clean());
}

// ── Activation over positions ──

#[test]
fn directive_applies_after_its_line() {
    let text = "SELECT 1; -- NOLINT(count-star)\nSELECT 1;\n-- LINT(count-star)\nSELECT 1;";
    let report = analyzer().lint_source(text, Some("ones.sql"));

    insta::assert_snapshot!(report.render().join("\n"), @r"
    ones.sql:In line 1, column 8: one [count-star]
    ones.sql:In line 4, column 8: one [count-star]
    ");
}

#[test]
fn directives_inside_strings_are_ignored() {
    let text = "SELECT '-- NOLINT(count-star)', 1;";
    let report = analyzer().lint_source(text, None);
    assert_eq!(report.len(), 1);
}

#[test]
fn repeated_disables_are_idempotent() {
    let text = "-- NOLINT(count-star)\n-- NOLINT(count-star)\nSELECT 1;\n-- LINT(count-star)\nSELECT 1;";
    let source = SourceText::new(text, b'\n');
    let scan = scan_directives(&source);
    let ledger = ActivationLedger::builder().events(scan.events).build();

    let state = ledger.state(RuleKind::CountStar).expect("touched");
    assert_eq!(state.transitions().len(), 2);
    assert_eq!(analyzer().lint_source(text, None).len(), 1);
}

// ── Parse failures ──

#[test]
fn parse_failure_does_not_hide_text_checks() {
    let report = analyzer().lint_source("SELECT 1\nSELECT 1;", None);
    let rules: Vec<_> = report.diagnostics.iter().map(|d| d.rule).collect();
    assert_eq!(
        rules,
        [RuleKind::CountStar, RuleKind::ParserFailed, RuleKind::CountStar]
    );
}
