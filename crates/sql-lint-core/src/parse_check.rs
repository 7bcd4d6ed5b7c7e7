//! The check that parses the document and shares the result.

use crate::check::{Check, CheckError};
use crate::context::RunContext;
use crate::report::DiagnosticReport;
use crate::RuleKind;

/// Reports the first statement that fails to parse.
///
/// Running this check populates the run's parse cache, so it must come
/// before every check that inspects the syntax tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserSucceeds;

impl Check for ParserSucceeds {
    fn name(&self) -> &'static str {
        RuleKind::ParserFailed.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::ParserFailed.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::ParserFailed]
    }

    fn provides_parse(&self) -> bool {
        true
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let cache = ctx.parse_cache_or_init();
        let mut report = DiagnosticReport::new();
        if let Some(err) = &cache.failure {
            tracing::debug!(offset = err.offset, parsed = cache.units.len(), "Parse failed: {err}");
            ctx.emit(&mut report, RuleKind::ParserFailed, err.offset, err.message.clone());
        }
        Ok(report)
    }
}
