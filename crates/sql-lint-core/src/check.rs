//! The check trait.

use thiserror::Error;

use crate::context::RunContext;
use crate::report::DiagnosticReport;
use crate::RuleKind;

/// A check that could not run to completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The document could not be tokenized.
    #[error("tokenizer failed at offset {offset}: {message}")]
    Tokenize {
        /// Offset of the offending input.
        offset: usize,
        /// Tokenizer message.
        message: String,
    },

    /// Any other failure.
    #[error("{0}")]
    Failed(String),
}

impl From<sql_lint_syntax::LexError> for CheckError {
    fn from(err: sql_lint_syntax::LexError) -> Self {
        Self::Tokenize {
            offset: err.offset,
            message: err.message,
        }
    }
}

/// A style check over one document.
///
/// Checks receive a [`RunContext`] and must filter every diagnostic through
/// the activation ledger, usually via [`RunContext::emit`].
///
/// # Example
///
/// ```
/// use sql_lint_core::{Check, CheckError, DiagnosticReport, RuleKind, RunContext};
///
/// pub struct NoSelectStar;
///
/// impl Check for NoSelectStar {
///     fn name(&self) -> &'static str { "no-select-star" }
///
///     fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
///         let mut report = DiagnosticReport::new();
///         if let Some(offset) = ctx.text().find("SELECT *") {
///             ctx.emit(&mut report, RuleKind::CountStar, offset, "avoid SELECT *");
///         }
///         Ok(report)
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// Returns the kebab-case name of this check.
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this check looks for.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the rule kinds this check reports under.
    fn kinds(&self) -> &'static [RuleKind] {
        &[]
    }

    /// Whether this check inspects the syntax tree.
    fn requires_ast(&self) -> bool {
        false
    }

    /// Whether this check populates the run's parse cache.
    fn provides_parse(&self) -> bool {
        false
    }

    /// Checks a single document.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot complete; the registry records
    /// it as a failure and continues with the next check.
    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError>;
}

/// Type alias for boxed `Check` trait objects.
pub type CheckBox = Box<dyn Check>;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCheck;

    impl Check for TestCheck {
        fn name(&self) -> &'static str {
            "test-check"
        }

        fn check(&self, _ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
            Err(CheckError::Failed("nope".to_string()))
        }
    }

    #[test]
    fn test_check_defaults() {
        let check = TestCheck;
        assert_eq!(check.name(), "test-check");
        assert_eq!(check.description(), "");
        assert!(check.kinds().is_empty());
        assert!(!check.requires_ast());
        assert!(!check.provides_parse());
    }

    #[test]
    fn test_lex_error_converts() {
        let err: CheckError = sql_lint_syntax::LexError::new(4, "Syntax error: Unclosed comment").into();
        assert_eq!(
            err.to_string(),
            "tokenizer failed at offset 4: Syntax error: Unclosed comment"
        );
    }
}
