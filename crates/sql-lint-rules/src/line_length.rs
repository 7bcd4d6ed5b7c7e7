//! Check for lines longer than the configured limit.
//!
//! # Rationale
//!
//! Long lines are hard to read in side-by-side diffs and terminals.
//!
//! # Configuration
//!
//! - `linter.line_limit`: maximum width (default: 100)
//! - `linter.tab_size`: width counted for each tab (default: 4)
//!
//! One-line `CREATE ... TABLE Name` and `IMPORT MODULE path` headers are
//! exempt, since the long part is a name that cannot be wrapped.

use sql_lint_core::{Check, CheckError, DiagnosticReport, RuleKind, RunContext};

use crate::case::is_one_line_statement;

/// Reports lines wider than `line_limit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineLength;

impl LineLength {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for LineLength {
    fn name(&self) -> &'static str {
        RuleKind::LineLimitExceed.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::LineLimitExceed.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::LineLimitExceed]
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let options = ctx.options();
        let text = ctx.text();
        let mut report = DiagnosticReport::new();

        let mut line_start = 0;
        let mut width = 0;
        for (i, b) in text.bytes().enumerate() {
            if b == options.line_delimiter {
                if width > options.line_limit && !is_one_line_statement(&text[line_start..i]) {
                    ctx.emit(
                        &mut report,
                        RuleKind::LineLimitExceed,
                        i,
                        format!("Lines should be <= {} characters long.", options.line_limit),
                    );
                }
                line_start = i + 1;
                width = 0;
            } else if b == b'\t' {
                width += options.tab_size;
            } else if b & 0xC0 != 0x80 {
                width += 1;
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

    fn limited(limit: usize) -> LintOptions {
        LintOptions {
            line_limit: limit,
            ..LintOptions::default()
        }
    }

    #[test]
    fn test_short_lines_pass() {
        assert!(run(&LineLength, "SELECT 1;\nSELECT 2;\n").is_clean());
    }

    #[test]
    fn test_reports_at_delimiter() {
        let report = run_with(&LineLength, "SELECT 1;\nSELECT 12345;\nSELECT 2;\n", limited(10));
        assert_eq!(positions(&report), [(2, 14)]);
        assert_eq!(messages(&report), ["Lines should be <= 10 characters long."]);
    }

    #[test]
    fn test_last_line_without_delimiter_is_not_measured() {
        assert!(run_with(&LineLength, "SELECT 123456789;", limited(5)).is_clean());
    }

    #[test]
    fn test_tabs_count_tab_size() {
        let options = LintOptions {
            tab_size: 8,
            ..limited(10)
        };
        assert_eq!(run_with(&LineLength, "\tSELECT 1\n", options).len(), 1);
        assert!(run_with(&LineLength, "\tSELECT 1\n", limited(12)).is_clean());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(run_with(&LineLength, "SELECT 'ééé'\n", limited(12)).is_clean());
    }

    #[test]
    fn test_one_line_headers_are_exempt() {
        let text = "CREATE TABLE VeryLongTableNameThatGoesOnAndOn\nIMPORT MODULE some.long.module.path;\n";
        assert!(run_with(&LineLength, text, limited(10)).is_clean());
    }

    #[test]
    fn test_respects_nolint() {
        let text = "-- NOLINT(line-limit-exceed)\nSELECT 1234567890123456789012345;\n";
        assert!(run_with(&LineLength, text, limited(30)).is_clean());
    }
}
