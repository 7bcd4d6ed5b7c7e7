//! Diagnostics and per-document reports.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use miette::{Diagnostic as MietteDiagnostic, SourceSpan};
use serde::{Deserialize, Serialize};

use crate::source::SourceText;
use crate::RuleKind;

/// A style finding at a position in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Category of the finding.
    pub rule: RuleKind,
    /// Byte offset the finding points at.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in characters).
    pub column: usize,
    /// Human-readable message.
    pub message: String,
    /// File the finding belongs to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Diagnostic {
    /// Renders the diagnostic as one line of text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(filename) = &self.filename {
            let _ = write!(out, "{filename}:");
        }
        let _ = write!(
            out,
            "In line {}, column {}: {} [{}]",
            self.line, self.column, self.message, self.rule
        );
        out
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// A hard failure that could not be reported as a positioned diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Check or rule that produced the failure.
    pub origin: String,
    /// Offset involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    /// What went wrong.
    pub message: String,
}

impl Failure {
    /// Creates a new failure.
    #[must_use]
    pub fn new(origin: impl Into<String>, offset: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            offset,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed", self.origin)?;
        if let Some(offset) = self.offset {
            write!(f, " at offset {offset}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Everything found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// File the report belongs to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Positioned findings.
    pub diagnostics: Vec<Diagnostic>,
    /// Hard failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<Failure>,
}

impl DiagnosticReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic at `offset`, translating it to a line and column.
    ///
    /// An offset outside `source` is recorded as a [`Failure`] instead.
    pub fn add(
        &mut self,
        rule: RuleKind,
        source: &SourceText<'_>,
        offset: usize,
        message: impl Into<String>,
    ) {
        let message = message.into();
        match source.translate(offset) {
            Ok((line, column)) => self.diagnostics.push(Diagnostic {
                rule,
                offset,
                line,
                column,
                message,
                filename: self.filename.clone(),
            }),
            Err(err) => {
                tracing::warn!(rule = %rule, offset, "Dropping diagnostic: {err}");
                self.failures
                    .push(Failure::new(rule.name(), Some(offset), format!("{err}: {message}")));
            }
        }
    }

    /// Records a hard failure.
    pub fn add_failure(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    /// Moves everything from `other` into this report.
    pub fn merge(&mut self, other: Self) {
        let filename = self.filename.clone();
        self.diagnostics
            .extend(other.diagnostics.into_iter().map(|mut d| {
                if filename.is_some() {
                    d.filename.clone_from(&filename);
                }
                d
            }));
        self.failures.extend(other.failures);
    }

    /// Sorts diagnostics by line, then column; ties keep insertion order.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by_key(|d| (d.line, d.column));
    }

    /// Sets the filename on the report and on every diagnostic.
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        let filename = filename.into();
        for diagnostic in &mut self.diagnostics {
            diagnostic.filename = Some(filename.clone());
        }
        self.filename = Some(filename);
    }

    /// Returns true if there are no diagnostics and no failures.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.failures.is_empty()
    }

    /// Returns the number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if there are no diagnostics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Counts diagnostics per rule.
    #[must_use]
    pub fn count_by_rule(&self) -> BTreeMap<RuleKind, usize> {
        let mut counts = BTreeMap::new();
        for diagnostic in &self.diagnostics {
            *counts.entry(diagnostic.rule).or_insert(0) += 1;
        }
        counts
    }

    /// Renders one line per diagnostic, followed by one line per failure.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let prefix = self
            .filename
            .as_deref()
            .map_or_else(String::new, |f| format!("{f}:"));
        self.diagnostics
            .iter()
            .map(Diagnostic::render)
            .chain(self.failures.iter().map(|f| format!("{prefix}{f}")))
            .collect()
    }
}

/// Result of linting a set of files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// One report per file, in discovery order.
    pub reports: Vec<DiagnosticReport>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every report is clean.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.reports.iter().all(DiagnosticReport::is_clean)
    }

    /// Returns the total number of diagnostics.
    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.reports.iter().map(DiagnosticReport::len).sum()
    }

    /// Returns the total number of failures.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.reports.iter().map(|r| r.failures.len()).sum()
    }

    /// Counts diagnostics per rule across every report.
    #[must_use]
    pub fn count_by_rule(&self) -> BTreeMap<RuleKind, usize> {
        let mut counts = BTreeMap::new();
        for report in &self.reports {
            for (rule, n) in report.count_by_rule() {
                *counts.entry(rule).or_insert(0) += n;
            }
        }
        counts
    }

    /// Adds a report for one more file.
    pub fn push(&mut self, report: DiagnosticReport) {
        self.reports.push(report);
        self.files_checked += 1;
    }

    /// Adds everything from another result.
    pub fn extend(&mut self, other: Self) {
        self.reports.extend(other.reports);
        self.files_checked += other.files_checked;
    }
}

/// A diagnostic in `miette` form, for rendering with a source snippet.
#[derive(Debug, thiserror::Error, MietteDiagnostic)]
#[error("{message}")]
pub struct DiagnosticSnippet {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Diagnostic> for DiagnosticSnippet {
    fn from(d: &Diagnostic) -> Self {
        Self {
            message: format!("[{}] {}", d.rule.code(), d.message),
            help: Some(d.rule.description().to_string()),
            span: SourceSpan::from((d.offset, 0)),
            label_message: d.rule.name().to_string(),
        }
    }
}
