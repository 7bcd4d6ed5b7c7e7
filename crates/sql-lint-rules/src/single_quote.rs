//! Check that string literals use the configured quote style.
//!
//! # Configuration
//!
//! - `linter.single_quote`: require `'...'` when true, `"..."` when false
//!   (default: true)

use sql_lint_core::scanner::{skip_comment, skip_string};
use sql_lint_core::{Check, CheckError, DiagnosticReport, RuleKind, RunContext};

/// Reports opening quotes of the wrong style.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleQuote;

impl SingleQuote {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for SingleQuote {
    fn name(&self) -> &'static str {
        RuleKind::SingleOrDoubleQuote.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::SingleOrDoubleQuote.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::SingleOrDoubleQuote]
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let bytes = ctx.source().bytes();
        let options = ctx.options();
        let (wrong, message) = if options.single_quote {
            (b'"', "Use single quotes(') instead of double quotes(\")")
        } else {
            (b'\'', "Use double quotes(\") instead of single quotes(')")
        };

        let mut report = DiagnosticReport::new();
        let mut i = 0;
        while i < bytes.len() {
            if skip_comment(bytes, &mut i, options.line_delimiter, true) {
                i += 1;
                continue;
            }
            if bytes[i] == wrong {
                ctx.emit(&mut report, RuleKind::SingleOrDoubleQuote, i, message);
            }
            skip_string(bytes, &mut i);
            i += 1;
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{messages, positions, run, run_with};
    use sql_lint_core::LintOptions;

    #[test]
    fn test_single_quotes_pass() {
        assert!(run(&SingleQuote, "SELECT 'a', 'b\"c';").is_clean());
    }

    #[test]
    fn test_double_quotes_reported() {
        let report = run(&SingleQuote, "SELECT 'a', \"b'c\";");
        assert_eq!(positions(&report), [(1, 13)]);
        assert_eq!(messages(&report), ["Use single quotes(') instead of double quotes(\")"]);
    }

    #[test]
    fn test_double_quote_mode() {
        let options = LintOptions {
            single_quote: false,
            ..LintOptions::default()
        };
        let report = run_with(&SingleQuote, "SELECT \"a\", 'b';", options);
        assert_eq!(positions(&report), [(1, 13)]);
        assert_eq!(messages(&report), ["Use double quotes(\") instead of single quotes(')"]);
    }

    #[test]
    fn test_quotes_in_comments_are_ignored() {
        assert!(run(&SingleQuote, "-- \"quoted\"\nSELECT 1; /* \"x\" */").is_clean());
    }

    #[test]
    fn test_respects_nolint() {
        let text = "SELECT \"a\"; -- NOLINT(single-or-double-quote)\nSELECT \"b\";";
        let report = run(&SingleQuote, text);
        assert_eq!(positions(&report), [(1, 8)]);
    }
}
