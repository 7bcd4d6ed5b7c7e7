//! Checks for indentation whitespace.
//!
//! # Rationale
//!
//! Mixing tabs and spaces renders differently in every editor. Indentation
//! must use `linter.allowed_indent` only, and tabs must not appear after the
//! first non-blank character of a line.

use sql_lint_core::{Check, CheckError, DiagnosticReport, RuleKind, RunContext};

/// Reports the first indentation character that is not `allowed_indent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformIndent;

impl UniformIndent {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for UniformIndent {
    fn name(&self) -> &'static str {
        RuleKind::UniformIndent.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::UniformIndent.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::UniformIndent]
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let options = ctx.options();
        let mut report = DiagnosticReport::new();

        let mut in_indent = true;
        for (i, b) in ctx.source().bytes().iter().copied().enumerate() {
            if b == options.line_delimiter {
                in_indent = true;
            } else if in_indent && b != options.allowed_indent {
                if b == b'\t' || b == b' ' {
                    let expected = if b == b'\t' { "whitespace" } else { "tab character" };
                    ctx.emit(
                        &mut report,
                        RuleKind::UniformIndent,
                        i,
                        format!("Inconsistent use of indentation symbols, expected: {expected}"),
                    );
                }
                in_indent = false;
            }
        }
        Ok(report)
    }
}

/// Reports tabs that follow non-blank text on the same line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotIndentTab;

impl NotIndentTab {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for NotIndentTab {
    fn name(&self) -> &'static str {
        RuleKind::NotIndentTab.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::NotIndentTab.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::NotIndentTab]
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let delimiter = ctx.options().line_delimiter;
        let mut report = DiagnosticReport::new();

        let mut in_indent = true;
        for (i, b) in ctx.source().bytes().iter().copied().enumerate() {
            if b == delimiter {
                in_indent = true;
            } else if b != b' ' && b != b'\t' {
                in_indent = false;
            } else if b == b'\t' && !in_indent {
                ctx.emit(&mut report, RuleKind::NotIndentTab, i, "Tab is not in the indentation");
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{messages, positions, run, run_with};
    use sql_lint_core::LintOptions;

    // --- UniformIndent ---

    #[test]
    fn test_space_indent_passes() {
        assert!(run(&UniformIndent, "SELECT\n  a,\n  b;\n").is_clean());
    }

    #[test]
    fn test_tab_in_space_indent() {
        let report = run(&UniformIndent, "SELECT\n\ta,\n  \tb;\n");
        assert_eq!(positions(&report), [(2, 1), (3, 3)]);
        assert_eq!(
            messages(&report),
            [
                "Inconsistent use of indentation symbols, expected: whitespace",
                "Inconsistent use of indentation symbols, expected: whitespace",
            ]
        );
    }

    #[test]
    fn test_space_in_tab_indent() {
        let options = LintOptions {
            allowed_indent: b'\t',
            ..LintOptions::default()
        };
        let report = run_with(&UniformIndent, "SELECT\n\ta,\n b;\n", options);
        assert_eq!(positions(&report), [(3, 1)]);
        assert_eq!(
            messages(&report),
            ["Inconsistent use of indentation symbols, expected: tab character"]
        );
    }

    #[test]
    fn test_only_first_offending_char_per_line() {
        assert_eq!(run(&UniformIndent, "\t\t\tSELECT 1;").len(), 1);
    }

    // --- NotIndentTab ---

    #[test]
    fn test_leading_tabs_pass() {
        assert!(run(&NotIndentTab, "\tSELECT\n\t\ta;\n").is_clean());
    }

    #[test]
    fn test_tab_after_text() {
        let report = run(&NotIndentTab, "SELECT\ta,\n  b\t\tAS c;\n");
        assert_eq!(positions(&report), [(1, 7), (2, 4), (2, 5)]);
        assert_eq!(messages(&report)[0], "Tab is not in the indentation");
    }
}
