//! Per-run state shared by every check.

use std::cell::OnceCell;

use sql_lint_syntax::{ParseError, ParseUnit, StatementParser};

use crate::config::LintOptions;
use crate::ledger::ActivationLedger;
use crate::report::DiagnosticReport;
use crate::source::SourceText;
use crate::RuleKind;

/// Statements parsed from one document.
///
/// Holds every statement before the first parse failure, in source order,
/// and the failure itself if there was one. AST checks only see the
/// statements of a complete parse (see [`crate::dispatch::units`]).
#[derive(Debug, Clone, Default)]
pub struct ParseCache {
    /// Successfully parsed statements.
    pub units: Vec<ParseUnit>,
    /// The error that stopped parsing.
    pub failure: Option<ParseError>,
}

impl ParseCache {
    /// Parses `text` statement by statement, stopping at the first error.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut cache = Self::default();
        for result in StatementParser::new(text) {
            match result {
                Ok(unit) => cache.units.push(unit),
                Err(err) => {
                    cache.failure = Some(err);
                    break;
                }
            }
        }
        cache
    }

    /// Returns true if every statement parsed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Context provided to checks for one document.
///
/// The source, ledger and options are read-only. The parse cache is written
/// at most once, by the check that parses the whole document.
#[derive(Debug)]
pub struct RunContext<'a> {
    source: &'a SourceText<'a>,
    ledger: &'a ActivationLedger,
    options: &'a LintOptions,
    parse_cache: OnceCell<ParseCache>,
}

impl<'a> RunContext<'a> {
    /// Creates a context with an empty parse cache.
    #[must_use]
    pub fn new(source: &'a SourceText<'a>, ledger: &'a ActivationLedger, options: &'a LintOptions) -> Self {
        Self {
            source,
            ledger,
            options,
            parse_cache: OnceCell::new(),
        }
    }

    /// Returns the document being linted.
    #[must_use]
    pub fn source(&self) -> &'a SourceText<'a> {
        self.source
    }

    /// Returns the document text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.source.as_str()
    }

    /// Returns the activation ledger.
    #[must_use]
    pub fn ledger(&self) -> &'a ActivationLedger {
        self.ledger
    }

    /// Returns the style options.
    #[must_use]
    pub fn options(&self) -> &'a LintOptions {
        self.options
    }

    /// Returns true if `kind` is active at `offset`.
    #[must_use]
    pub fn is_active(&self, kind: RuleKind, offset: usize) -> bool {
        self.ledger.is_active(kind, offset)
    }

    /// Adds a diagnostic to `report` if `kind` is active at `offset`.
    pub fn emit(&self, report: &mut DiagnosticReport, kind: RuleKind, offset: usize, message: impl Into<String>) {
        if self.is_active(kind, offset) {
            report.add(kind, self.source, offset, message);
        }
    }

    /// Returns the parse cache, if a check has populated it.
    #[must_use]
    pub fn parse_cache(&self) -> Option<&ParseCache> {
        self.parse_cache.get()
    }

    /// Returns the parse cache, parsing the document first if needed.
    pub fn parse_cache_or_init(&self) -> &ParseCache {
        self.parse_cache.get_or_init(|| {
            tracing::debug!(len = self.source.len(), "Parsing document");
            ParseCache::parse(self.text())
        })
    }
}
