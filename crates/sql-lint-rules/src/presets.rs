//! Check suites.

use sql_lint_core::{CheckRegistry, ParserSucceeds, RuleKind};

use crate::{
    Alias, CommentStyle, CountStar, ExpressionParentheses, Imports, Join, KeywordIdentifier, LetterCase, LineLength,
    Names, NotIndentTab, Semicolon, SingleQuote, UniformIndent,
};

/// Named check suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every check, parser first.
    #[default]
    All,
    /// Only the checks that inspect the syntax tree.
    AstDependent,
}

impl Preset {
    /// Returns the checks for this preset.
    #[must_use]
    pub fn checks(self) -> CheckRegistry {
        match self {
            Self::All => all_checks(),
            Self::AstDependent => ast_dependent_checks(),
        }
    }
}

/// Returns every check.
///
/// `ParserSucceeds` comes first so that the AST checks after it share its
/// parse of the document.
#[must_use]
pub fn all_checks() -> CheckRegistry {
    CheckRegistry::new()
        .with(ParserSucceeds)
        .with(LineLength::new())
        .with(Semicolon::new())
        .with(LetterCase::new())
        .with(CommentStyle::new())
        .with(Alias::new())
        .with(UniformIndent::new())
        .with(NotIndentTab::new())
        .with(SingleQuote::new())
        .with(Names::new())
        .with(Join::new())
        .with(Imports::new())
        .with(ExpressionParentheses::new())
        .with(CountStar::new())
        .with(KeywordIdentifier::new())
}

/// Returns the checks that inspect the syntax tree.
///
/// Without `ParserSucceeds` in front, each of them parses the document on
/// its own and parse failures are not reported.
#[must_use]
pub fn ast_dependent_checks() -> CheckRegistry {
    CheckRegistry::new()
        .with(LetterCase::new())
        .with(Alias::new())
        .with(Names::new())
        .with(Join::new())
        .with(ExpressionParentheses::new())
        .with(KeywordIdentifier::new())
}

/// Returns the rule kinds reported by the checks of `registry`.
#[must_use]
pub fn reported_kinds(registry: &CheckRegistry) -> Vec<RuleKind> {
    let mut kinds: Vec<RuleKind> = registry.iter().flat_map(|check| check.kinds().iter().copied()).collect();
    kinds.sort_unstable();
    kinds.dedup();
    kinds
}
