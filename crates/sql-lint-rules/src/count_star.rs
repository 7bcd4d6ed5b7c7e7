//! Check for `COUNT(1)`.

use sql_lint_core::scanner::{skip_comment, skip_spaces_forward, skip_string};
use sql_lint_core::{Check, CheckError, DiagnosticReport, RuleKind, RunContext};

/// Reports `COUNT(1)`, in any letter case and with any spacing.
///
/// The diagnostic points at the closing parenthesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountStar;

impl CountStar {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Matches `( 1 )` from `pos`, returning the offset of `)`.
fn count_one_close(bytes: &[u8], mut pos: usize) -> Option<usize> {
    for &expected in b"(1)" {
        if skip_spaces_forward(bytes, &mut pos) || bytes[pos] != expected {
            return None;
        }
        pos += 1;
    }
    Some(pos - 1)
}

const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl Check for CountStar {
    fn name(&self) -> &'static str {
        RuleKind::CountStar.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::CountStar.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::CountStar]
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let bytes = ctx.source().bytes();
        let delimiter = ctx.options().line_delimiter;
        let mut report = DiagnosticReport::new();

        let mut i = 0;
        while i < bytes.len() {
            if skip_comment(bytes, &mut i, delimiter, true) || skip_string(bytes, &mut i) {
                i += 1;
                continue;
            }
            let at_word_start = i == 0 || !is_word_byte(bytes[i - 1]);
            let is_count = bytes
                .get(i..i + 5)
                .is_some_and(|word| word.eq_ignore_ascii_case(b"COUNT"));
            if at_word_start && is_count {
                if let Some(close) = count_one_close(bytes, i + 5) {
                    ctx.emit(&mut report, RuleKind::CountStar, close, "Use COUNT(*) instead of COUNT(1)");
                }
                i += 5;
                continue;
            }
            i += 1;
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{messages, positions, run};

    #[test]
    fn test_count_star_passes() {
        assert!(run(&CountStar, "SELECT COUNT(*) FROM T;").is_clean());
        assert!(run(&CountStar, "SELECT COUNT(10), COUNT(x1) FROM T;").is_clean());
    }

    #[test]
    fn test_count_one_reported_at_close_paren() {
        let report = run(&CountStar, "SELECT COUNT(1) FROM T;");
        assert_eq!(positions(&report), [(1, 15)]);
        assert_eq!(messages(&report), ["Use COUNT(*) instead of COUNT(1)"]);
    }

    #[test]
    fn test_case_and_spacing() {
        let report = run(&CountStar, "SELECT count ( 1\n) FROM T;");
        assert_eq!(positions(&report), [(2, 1)]);
    }

    #[test]
    fn test_ignores_strings_comments_and_longer_words() {
        let text = "SELECT 'COUNT(1)', ACCOUNT(1) -- COUNT(1)\nFROM T;";
        assert!(run(&CountStar, text).is_clean());
    }

    #[test]
    fn test_truncated_input() {
        assert!(run(&CountStar, "SELECT COUNT(1").is_clean());
        assert!(run(&CountStar, "SELECT COUNT").is_clean());
    }
}
