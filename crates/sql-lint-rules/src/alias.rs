//! Check that aliases are introduced with `AS`.

use sql_lint_core::{dispatch, Check, CheckError, DiagnosticReport, RuleKind, RunContext};
use sql_lint_syntax::NodeKind;

/// Reports `SELECT x y` and `FROM T t` style aliases.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alias;

impl Alias {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for Alias {
    fn name(&self) -> &'static str {
        RuleKind::Alias.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::Alias.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::Alias]
    }

    fn requires_ast(&self) -> bool {
        true
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        Ok(dispatch::apply(ctx, |node, ctx| {
            let mut report = DiagnosticReport::new();
            if node.kind() == (NodeKind::Alias { explicit: false }) {
                ctx.emit(
                    &mut report,
                    RuleKind::Alias,
                    node.span().start,
                    "Always use AS keyword before aliases",
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
    fn test_explicit_aliases_pass() {
        assert!(run(&Alias, "SELECT a AS b FROM T AS t;").is_clean());
    }

    #[test]
    fn test_implicit_aliases() {
        let report = run(&Alias, "SELECT a b\nFROM T t;");
        assert_eq!(positions(&report), [(1, 10), (2, 8)]);
        assert_eq!(messages(&report)[0], "Always use AS keyword before aliases");
    }

    #[test]
    fn test_import_into_is_not_an_alias() {
        assert!(run(&Alias, "IMPORT PROTO 'a.proto' INTO p;").is_clean());
    }
}
