//! Check for `AND` and `OR` mixed without parentheses.
//!
//! # Rationale
//!
//! `a OR b AND c` parses as `a OR (b AND c)`, which readers routinely get
//! wrong. An `AND` directly under an `OR` (or the reverse) must be wrapped
//! in parentheses.

use sql_lint_core::scanner::{skip_spaces_backward, skip_spaces_forward};
use sql_lint_core::{dispatch, Check, CheckError, DiagnosticReport, RuleKind, RunContext};
use sql_lint_syntax::{NodeKind, Span};

/// Reports nested `AND`/`OR` expressions without parentheses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionParentheses;

impl ExpressionParentheses {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_logical(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::AndExpr | NodeKind::OrExpr)
}

/// Returns true if `span` is immediately wrapped by `(` and `)`, ignoring
/// whitespace.
fn is_parenthesized(bytes: &[u8], span: Span) -> bool {
    let Some(open) = span.start.checked_sub(1).and_then(|pos| skip_spaces_backward(bytes, pos)) else {
        return false;
    };
    let mut close = span.end;
    !skip_spaces_forward(bytes, &mut close) && bytes[open] == b'(' && bytes[close] == b')'
}

impl Check for ExpressionParentheses {
    fn name(&self) -> &'static str {
        RuleKind::ExpressionParentheses.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::ExpressionParentheses.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::ExpressionParentheses]
    }

    fn requires_ast(&self) -> bool {
        true
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let bytes = ctx.source().bytes();
        Ok(dispatch::apply(ctx, |node, ctx| {
            let mut report = DiagnosticReport::new();
            let Some(parent) = node.parent() else {
                return report;
            };
            if is_logical(node.kind())
                && is_logical(parent.kind())
                && node.kind() != parent.kind()
                && !is_parenthesized(bytes, node.span())
            {
                ctx.emit(
                    &mut report,
                    RuleKind::ExpressionParentheses,
                    node.span().start,
                    "Use parentheses between consecutive AND and OR operators",
                );
            }
            report
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{messages, positions, run};

    #[test]
    fn test_parenthesized_passes() {
        assert!(run(&ExpressionParentheses, "SELECT 1 FROM T WHERE a OR (b AND c);").is_clean());
        assert!(run(&ExpressionParentheses, "SELECT 1 FROM T WHERE ( a OR b ) AND c;").is_clean());
    }

    #[test]
    fn test_single_operator_passes() {
        assert!(run(&ExpressionParentheses, "SELECT 1 FROM T WHERE a AND b AND c;").is_clean());
    }

    #[test]
    fn test_and_under_or() {
        let report = run(&ExpressionParentheses, "SELECT 1 FROM T WHERE a OR b AND c;");
        assert_eq!(positions(&report), [(1, 28)]);
        assert_eq!(
            messages(&report),
            ["Use parentheses between consecutive AND and OR operators"]
        );
    }

    #[test]
    fn test_each_nested_operand_is_reported() {
        let text = "SELECT 1 FROM T WHERE a AND b OR c AND d;";
        assert_eq!(run(&ExpressionParentheses, text).len(), 2);
    }
}
