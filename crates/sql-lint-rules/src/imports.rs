//! Check for well-formed `IMPORT` statements.
//!
//! # Rationale
//!
//! Imports should say what they import (`IMPORT MODULE` or `IMPORT PROTO`),
//! keep protos and modules in two separate groups, and never import the same
//! thing twice.
//!
//! Only the uppercase spelling `IMPORT` is recognized.

use sql_lint_core::scanner::{next_word, skip_comment, skip_string};
use sql_lint_core::{Check, CheckError, DiagnosticReport, RuleKind, RunContext};

/// Reports untyped, interleaved or duplicated imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct Imports;

impl Imports {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportKind {
    Proto,
    Module,
}

impl ImportKind {
    fn parse(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("PROTO") {
            Some(Self::Proto)
        } else if word.eq_ignore_ascii_case("MODULE") {
            Some(Self::Module)
        } else {
            None
        }
    }
}

/// Reads the imported name: a quoted path or a bare word.
fn import_name<'a>(text: &'a str, pos: &mut usize) -> &'a str {
    let bytes = text.as_bytes();
    while *pos < bytes.len() && matches!(bytes[*pos], b' ' | b'\t') {
        *pos += 1;
    }
    let start = *pos;
    if skip_string(bytes, pos) {
        *pos = (*pos + 1).min(bytes.len());
        return text.get(start..*pos).unwrap_or("");
    }
    next_word(text, pos)
}

fn is_import_keyword(bytes: &[u8], i: usize) -> bool {
    let before = i.checked_sub(1).map(|j| bytes[j]);
    let after = bytes.get(i + 6).copied();
    bytes[i..].starts_with(b"IMPORT")
        && !before.is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        && after.map_or(true, |b| b.is_ascii_whitespace() || b == b';')
}

impl Check for Imports {
    fn name(&self) -> &'static str {
        RuleKind::Imports.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::Imports.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::Imports]
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let text = ctx.text();
        let bytes = text.as_bytes();
        let delimiter = ctx.options().line_delimiter;
        let mut report = DiagnosticReport::new();

        let mut names: Vec<&str> = Vec::new();
        let mut first_group: Option<ImportKind> = None;
        let mut second_group: Option<ImportKind> = None;

        let mut i = 0;
        while i < bytes.len() {
            if skip_string(bytes, &mut i) || skip_comment(bytes, &mut i, delimiter, true) {
                i += 1;
                continue;
            }
            if !is_import_keyword(bytes, i) {
                i += 1;
                continue;
            }
            let active = ctx.is_active(RuleKind::Imports, i);
            i += 6;
            if !active {
                continue;
            }

            let word = next_word(text, &mut i);
            let Some(kind) = ImportKind::parse(word) else {
                ctx.emit(
                    &mut report,
                    RuleKind::Imports,
                    i,
                    "Imports should specify the type 'MODULE' or 'PROTO'.",
                );
                continue;
            };

            if first_group == Some(kind) && second_group.is_some() {
                ctx.emit(
                    &mut report,
                    RuleKind::Imports,
                    i,
                    "PROTO and MODULE inputs should be in separate groups.",
                );
            }
            if first_group.is_none() {
                first_group = Some(kind);
            } else if second_group.is_none() && first_group != Some(kind) {
                second_group = Some(kind);
            }

            let name = import_name(text, &mut i);
            if names.contains(&name) {
                ctx.emit(
                    &mut report,
                    RuleKind::Imports,
                    i,
                    format!("\"{name}\" is already defined."),
                );
            }
            tracing::debug!(name, ?kind, offset = i, "Import recorded");
            names.push(name);
        }
        Ok(report)
    }
}
