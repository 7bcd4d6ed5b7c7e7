//! Check that the document ends with `;`.

use sql_lint_core::scanner::{skip_comment, skip_string};
use sql_lint_core::{Check, CheckError, DiagnosticReport, RuleKind, RunContext};

/// Reports a document whose last statement is not terminated.
///
/// Strings, comments and whitespace are ignored when looking for the last
/// character. A document with nothing else in it passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Semicolon;

impl Semicolon {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for Semicolon {
    fn name(&self) -> &'static str {
        RuleKind::StatementSemicolon.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::StatementSemicolon.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::StatementSemicolon]
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let bytes = ctx.source().bytes();
        let delimiter = ctx.options().line_delimiter;

        let mut last = None;
        let mut i = 0;
        while i < bytes.len() {
            if skip_string(bytes, &mut i) || skip_comment(bytes, &mut i, delimiter, true) {
                i += 1;
                continue;
            }
            let b = bytes[i];
            if b != b' ' && b != b'\t' && b != delimiter {
                last = Some(b);
            }
            i += 1;
        }

        let mut report = DiagnosticReport::new();
        if last.is_some_and(|b| b != b';') {
            ctx.emit(
                &mut report,
                RuleKind::StatementSemicolon,
                bytes.len() - 1,
                "Each statement should end with a semicolon ';'.",
            );
        }
        Ok(report)
    }
}
