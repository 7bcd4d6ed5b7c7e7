//! Applies node rules to every node of every parsed statement.

use std::borrow::Cow;

use sql_lint_syntax::{NodeRef, ParseUnit};

use crate::context::{ParseCache, RunContext};
use crate::report::DiagnosticReport;

/// Returns the statements AST checks should see.
///
/// Uses the run's parse cache when it is populated; otherwise parses the
/// document here. A document that does not parse completely yields no
/// statements at all.
#[must_use]
pub fn units<'c>(ctx: &'c RunContext<'_>) -> Cow<'c, [ParseUnit]> {
    match ctx.parse_cache() {
        Some(cache) if cache.is_complete() => Cow::Borrowed(cache.units.as_slice()),
        Some(_) => Cow::Borrowed(&[]),
        None => {
            let cache = ParseCache::parse(ctx.text());
            if cache.is_complete() {
                Cow::Owned(cache.units)
            } else {
                Cow::Borrowed(&[])
            }
        }
    }
}

/// Calls `rule` on every node of every statement in pre-order and merges
/// what it returns.
pub fn apply<F>(ctx: &RunContext<'_>, mut rule: F) -> DiagnosticReport
where
    F: FnMut(NodeRef<'_>, &RunContext<'_>) -> DiagnosticReport,
{
    let mut report = DiagnosticReport::new();
    for unit in units(ctx).iter() {
        for node in unit.walk() {
            report.merge(rule(node, ctx));
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivationLedger, LintOptions, RuleKind, SourceText};
    use sql_lint_syntax::NodeKind;

    fn count_selects(ctx: &RunContext<'_>) -> usize {
        apply(ctx, |node, ctx| {
            let mut report = DiagnosticReport::new();
            if node.kind() == NodeKind::Select {
                ctx.emit(&mut report, RuleKind::Alias, node.span().start, "select");
            }
            report
        })
        .len()
    }

    #[test]
    fn test_apply_visits_every_statement() {
        let source = SourceText::new("SELECT 1;\nSELECT 2;\nSELECT 3;", b'\n');
        let ledger = ActivationLedger::new();
        let options = LintOptions::default();
        let ctx = RunContext::new(&source, &ledger, &options);
        assert_eq!(count_selects(&ctx), 3);
    }

    #[test]
    fn test_apply_skips_document_with_parse_failure() {
        let source = SourceText::new("SELECT 1;\nSELECT 2\nSELECT 3;", b'\n');
        let ledger = ActivationLedger::new();
        let options = LintOptions::default();

        let uncached = RunContext::new(&source, &ledger, &options);
        assert_eq!(count_selects(&uncached), 0);

        let cached = RunContext::new(&source, &ledger, &options);
        assert_eq!(cached.parse_cache_or_init().units.len(), 1);
        assert!(units(&cached).is_empty());
        assert_eq!(count_selects(&cached), 0);
    }

    #[test]
    fn test_cached_and_uncached_agree() {
        let source = SourceText::new("SELECT 1;\nSELECT 2 FROM T;\nSELECT 3;", b'\n');
        let ledger = ActivationLedger::new();
        let options = LintOptions::default();

        let uncached = RunContext::new(&source, &ledger, &options);
        let cached = RunContext::new(&source, &ledger, &options);
        cached.parse_cache_or_init();

        assert!(matches!(units(&uncached), Cow::Owned(_)));
        assert!(matches!(units(&cached), Cow::Borrowed(_)));
        assert_eq!(count_selects(&uncached), 3);
        assert_eq!(count_selects(&cached), 3);
    }
}
