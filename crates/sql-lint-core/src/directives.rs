//! `NOLINT(...)` / `LINT(...)` directives in single-line comments.
//!
//! ```text
//! SELECT 1 one;  -- NOLINT(alias) reason text is ignored
//! SELECT 2 two;
//! -- LINT(alias)
//! ```
//!
//! A directive takes effect after the line it is written on.

use crate::ledger::{ActivationLedger, DirectiveEvent, Toggle};
use crate::report::DiagnosticReport;
use crate::scanner;
use crate::source::SourceText;
use crate::RuleKind;

/// A directive that named a rule which does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName {
    /// Position of the directive.
    pub offset: usize,
    /// The name as written.
    pub name: String,
}

/// Result of scanning a document for directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveScan {
    /// Valid toggles, in source order.
    pub events: Vec<DirectiveEvent>,
    /// Names that did not match any rule.
    pub unknown: Vec<UnknownName>,
}

impl DirectiveScan {
    /// Reports every unknown name that is not itself suppressed.
    #[must_use]
    pub fn unknown_report(&self, source: &SourceText<'_>, ledger: &ActivationLedger) -> DiagnosticReport {
        let mut report = DiagnosticReport::new();
        for unknown in &self.unknown {
            if ledger.is_active(RuleKind::UnknownSuppression, unknown.offset) {
                report.add(
                    RuleKind::UnknownSuppression,
                    source,
                    unknown.offset,
                    format!("Unknown NOLINT error category: '{}'", unknown.name),
                );
            }
        }
        report
    }
}

/// A parsed directive body.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive<'a> {
    toggle: Toggle,
    names: Vec<&'a str>,
}

/// Finds every directive in `source`.
///
/// Strings and block comments are skipped, so directive-like text inside
/// them is ignored.
#[must_use]
pub fn scan_directives(source: &SourceText<'_>) -> DirectiveScan {
    let text = source.as_str();
    let bytes = source.bytes();
    let delimiter = source.delimiter();
    let mut scan = DirectiveScan::default();

    let mut i = 0;
    while i < bytes.len() {
        if scanner::skip_comment(bytes, &mut i, delimiter, false) || scanner::skip_string(bytes, &mut i) {
            i += 1;
            continue;
        }
        if !scanner::is_line_comment_start(bytes, i) {
            i += 1;
            continue;
        }

        let opener_len = if bytes[i] == b'#' { 1 } else { 2 };
        let body_start = i + opener_len;
        scanner::skip_comment(bytes, &mut i, delimiter, true);
        let body = text.get(body_start..i).unwrap_or("");

        if let Some(directive) = parse_directive(body) {
            tracing::debug!(offset = i, ?directive.toggle, names = ?directive.names, "Found directive");
            for name in directive.names {
                match RuleKind::from_name(name) {
                    Some(kind) => scan.events.push(DirectiveEvent {
                        offset: i,
                        toggle: directive.toggle,
                        kind,
                    }),
                    None => scan.unknown.push(UnknownName {
                        offset: i,
                        name: name.to_string(),
                    }),
                }
            }
        }
        i += 1;
    }

    scan
}

/// Parses `NOLINT(a, b) free text` or `LINT(a)` from a comment body.
///
/// Returns `None` for ordinary comments.
fn parse_directive(body: &str) -> Option<Directive<'_>> {
    let body = body.trim_start();

    let (toggle, rest) = if let Some(rest) = body.strip_prefix("NOLINT") {
        (Toggle::Disable, rest)
    } else if let Some(rest) = body.strip_prefix("LINT") {
        (Toggle::Enable, rest)
    } else {
        return None;
    };

    let list = rest.trim_start().strip_prefix('(')?;
    let close = list.find(')')?;
    let list = &list[..close];

    if !list
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == ',' || c.is_whitespace())
    {
        return None;
    }

    let names = list.split(',').map(str::trim).collect();
    Some(Directive { toggle, names })
}
