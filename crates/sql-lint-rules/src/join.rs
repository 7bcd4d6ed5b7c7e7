//! Check that joins state their type.

use sql_lint_core::{dispatch, Check, CheckError, DiagnosticReport, RuleKind, RunContext};
use sql_lint_syntax::NodeKind;

/// Reports a bare `JOIN` without `INNER`, `LEFT`, `CROSS` and so on.
///
/// Comma joins are explicit and pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Join;

impl Join {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for Join {
    fn name(&self) -> &'static str {
        RuleKind::Join.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::Join.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::Join]
    }

    fn requires_ast(&self) -> bool {
        true
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        Ok(dispatch::apply(ctx, |node, ctx| {
            let mut report = DiagnosticReport::new();
            if node.kind() == (NodeKind::Join { join_type: None }) {
                ctx.emit(
                    &mut report,
                    RuleKind::Join,
                    node.span().start,
                    "Always explicitly indicate the type of join.",
                );
            }
            report
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{messages, run};

    #[test]
    fn test_typed_joins_pass() {
        let text = "SELECT 1 FROM A INNER JOIN B ON A.x = B.x LEFT OUTER JOIN C USING (y), D;";
        assert!(run(&Join, text).is_clean());
    }

    #[test]
    fn test_bare_join() {
        let report = run(&Join, "SELECT 1 FROM A JOIN B ON A.x = B.x;");
        assert_eq!(report.len(), 1);
        assert_eq!(messages(&report), ["Always explicitly indicate the type of join."]);
    }

    #[test]
    fn test_nested_bare_joins() {
        let report = run(&Join, "SELECT 1 FROM A JOIN B USING (x) JOIN C USING (y);");
        assert_eq!(report.len(), 2);
    }
}
