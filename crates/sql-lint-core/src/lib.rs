//! # sql-lint-core
//!
//! Orchestration core for SQL style linting.
//!
//! This crate decides which rules are active at every byte of a document,
//! scans raw text safely around strings and comments, runs checks, and
//! collects their diagnostics. It includes:
//!
//! - [`scanner`] probes that skip string literals and comments
//! - [`ActivationLedger`], built from `NOLINT(...)` / `LINT(...)` directives
//!   found by [`scan_directives`]
//! - the [`Check`] trait, [`CheckRegistry`] and the [`ParserSucceeds`] check
//!   that shares one parse of the document with every AST check
//! - [`dispatch`] for applying node rules to every parsed statement
//! - [`DiagnosticReport`] for sorting and rendering findings
//! - [`Analyzer`] for linting strings, files and directories
//!
//! ## Example
//!
//! ```
//! use sql_lint_core::{Analyzer, ParserSucceeds};
//!
//! let analyzer = Analyzer::builder()
//!     .root(".")
//!     .check(ParserSucceeds)
//!     .build()?;
//!
//! let report = analyzer.lint_source("SELECT 1;\nSELECT 2\nSELECT 3;", Some("q.sql"));
//! assert_eq!(
//!     report.render(),
//!     ["q.sql:In line 3, column 1: Syntax error: Expected \";\" but got keyword SELECT [parser-failed]"]
//! );
//! # Ok::<(), sql_lint_core::AnalyzerError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod check;
mod config;
mod context;
pub mod directives;
pub mod dispatch;
pub mod ledger;
mod parse_check;
mod registry;
mod report;
mod rule_kind;
pub mod scanner;
mod source;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use check::{Check, CheckBox, CheckError};
pub use config::{
    AnalyzerConfig, Config, ConfigError, LintOptions, LinterConfig, RuleConfig, DEFAULT_EXTENSIONS,
    DEFAULT_LINE_LIMIT, DEFAULT_TAB_SIZE,
};
pub use context::{ParseCache, RunContext};
pub use directives::{scan_directives, DirectiveScan, UnknownName};
pub use ledger::{ActivationLedger, ActivationState, DirectiveEvent, LedgerBuilder, Toggle};
pub use parse_check::ParserSucceeds;
pub use registry::CheckRegistry;
pub use report::{Diagnostic, DiagnosticReport, DiagnosticSnippet, Failure, LintResult};
pub use rule_kind::RuleKind;
pub use source::{LineIndex, SourceText, TranslateError};
