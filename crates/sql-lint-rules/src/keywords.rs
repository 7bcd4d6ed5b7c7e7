//! Checks over keyword tokens of parsed statements.
//!
//! A keyword token is either used as a keyword, or (for non-reserved words
//! and path components) as an identifier. The parser decides which: a token
//! whose span is exactly an `Identifier` node is an identifier.
//!
//! - [`LetterCase`] checks the spelling of keywords used as keywords.
//! - [`KeywordIdentifier`] reports keywords used as identifiers.
//!
//! Both see nothing in a document that fails to parse.

use std::collections::HashSet;

use sql_lint_core::{dispatch, Check, CheckError, DiagnosticReport, RuleKind, RunContext};
use sql_lint_syntax::{NodeKind, Span, Token, TokenClass};

use crate::case::has_keyword_case;

/// Returns every keyword token and whether it is used as an identifier.
fn keyword_tokens(ctx: &RunContext<'_>) -> Vec<(Token, bool)> {
    let mut keywords = Vec::new();
    for unit in dispatch::units(ctx).iter() {
        let identifiers: HashSet<Span> = unit
            .walk()
            .filter(|node| node.kind() == NodeKind::Identifier)
            .map(|node| node.span())
            .collect();
        keywords.extend(
            unit.tokens()
                .iter()
                .filter(|token| token.class() == TokenClass::Keyword)
                .map(|token| (*token, identifiers.contains(&token.span))),
        );
    }
    keywords
}

/// Reports keywords not spelled in the configured case.
///
/// # Configuration
///
/// - `linter.upper_keyword`: require uppercase when true, lowercase when
///   false (default: true)
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterCase;

impl LetterCase {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for LetterCase {
    fn name(&self) -> &'static str {
        RuleKind::ConsistentLetterCase.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::ConsistentLetterCase.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::ConsistentLetterCase]
    }

    fn requires_ast(&self) -> bool {
        true
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let upper = ctx.options().upper_keyword;
        let case = if upper { "uppercase" } else { "lowercase" };
        let mut report = DiagnosticReport::new();

        for (token, is_identifier) in keyword_tokens(ctx) {
            let word = token.text(ctx.text());
            if !is_identifier && !has_keyword_case(word, upper) {
                ctx.emit(
                    &mut report,
                    RuleKind::ConsistentLetterCase,
                    token.span.start,
                    format!("Keyword '{word}' should be all {case}"),
                );
            }
        }
        Ok(report)
    }
}

/// Reports identifiers spelled like SQL keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordIdentifier;

impl KeywordIdentifier {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for KeywordIdentifier {
    fn name(&self) -> &'static str {
        RuleKind::KeywordIdentifier.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::KeywordIdentifier.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::KeywordIdentifier]
    }

    fn requires_ast(&self) -> bool {
        true
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let mut report = DiagnosticReport::new();
        for (token, is_identifier) in keyword_tokens(ctx) {
            if is_identifier {
                let word = token.text(ctx.text());
                ctx.emit(
                    &mut report,
                    RuleKind::KeywordIdentifier,
                    token.span.start,
                    format!("Identifier `{word}` is an SQL keyword. Change the name or escape with backticks (`)"),
                );
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

    // --- LetterCase ---

    #[test]
    fn test_uppercase_keywords_pass() {
        assert!(run(&LetterCase, "SELECT a AS b FROM T WHERE x IS NULL;").is_clean());
    }

    #[test]
    fn test_mixed_case_keyword() {
        let report = run(&LetterCase, "SELECT a\nfrom T;");
        assert_eq!(positions(&report), [(2, 1)]);
        assert_eq!(messages(&report), ["Keyword 'from' should be all uppercase"]);
    }

    #[test]
    fn test_lowercase_mode() {
        let options = LintOptions {
            upper_keyword: false,
            ..LintOptions::default()
        };
        let report = run_with(&LetterCase, "select a From T;", options);
        assert_eq!(positions(&report), [(1, 10)]);
        assert_eq!(messages(&report), ["Keyword 'From' should be all lowercase"]);
    }

    #[test]
    fn test_keywords_used_as_identifiers_are_skipped() {
        assert!(run(&LetterCase, "SELECT t.select FROM T;").is_clean());
    }

    #[test]
    fn test_statements_after_parse_failure_are_skipped() {
        assert!(run(&LetterCase, "SELECT 1 FROM;\nselect 2;").is_clean());
    }

    #[test]
    fn test_statements_before_parse_failure_are_skipped() {
        assert!(run(&LetterCase, "select 1;\nSELECT 2 FROM;").is_clean());
    }

    // --- KeywordIdentifier ---

    #[test]
    fn test_plain_identifiers_pass() {
        assert!(run(&KeywordIdentifier, "SELECT a, `select` FROM T;").is_clean());
    }

    #[test]
    fn test_keyword_path_component() {
        let report = run(&KeywordIdentifier, "SELECT t.select FROM T;");
        assert_eq!(positions(&report), [(1, 10)]);
        assert_eq!(
            messages(&report),
            ["Identifier `select` is an SQL keyword. Change the name or escape with backticks (`)"]
        );
    }

    #[test]
    fn test_non_reserved_keyword_as_column() {
        let report = run(&KeywordIdentifier, "SELECT type FROM T;");
        assert_eq!(positions(&report), [(1, 8)]);
    }
}
