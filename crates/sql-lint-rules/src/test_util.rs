//! Helpers for running a single check in unit tests.

use sql_lint_core::{
    scan_directives, ActivationLedger, Check, DiagnosticReport, LintOptions, RunContext, SourceText,
};

/// Runs `check` over `text` with default options, honoring directives.
pub fn run(check: &dyn Check, text: &str) -> DiagnosticReport {
    run_with(check, text, LintOptions::default())
}

/// Runs `check` over `text` with `options`, honoring directives.
pub fn run_with(check: &dyn Check, text: &str, options: LintOptions) -> DiagnosticReport {
    let source = SourceText::new(text, options.line_delimiter);
    let ledger = ActivationLedger::builder()
        .events(scan_directives(&source).events)
        .build();
    let ctx = RunContext::new(&source, &ledger, &options);
    let mut report = check.check(&ctx).expect("Failed to run check");
    report.sort();
    report
}

/// Returns `(line, column)` of every diagnostic.
pub fn positions(report: &DiagnosticReport) -> Vec<(usize, usize)> {
    report.diagnostics.iter().map(|d| (d.line, d.column)).collect()
}

/// Returns the message of every diagnostic.
pub fn messages(report: &DiagnosticReport) -> Vec<&str> {
    report.diagnostics.iter().map(|d| d.message.as_str()).collect()
}
