//! Check that single-line comments use one marker.
//!
//! # Rationale
//!
//! `--`, `//` and `#` all start a single-line comment. Mixing them in one
//! file is noise. The first marker found fixes the style for the rest of the
//! document.

use sql_lint_core::scanner::{is_line_comment_start, skip_comment, skip_string};
use sql_lint_core::{Check, CheckError, DiagnosticReport, RuleKind, RunContext};

/// Reports single-line comments that differ from the first one.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentStyle;

impl CommentStyle {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn marker_at(bytes: &[u8], pos: usize) -> &'static str {
    match bytes[pos] {
        b'-' => "--",
        b'/' => "//",
        _ => "#",
    }
}

impl Check for CommentStyle {
    fn name(&self) -> &'static str {
        RuleKind::ConsistentCommentStyle.name()
    }

    fn description(&self) -> &'static str {
        RuleKind::ConsistentCommentStyle.description()
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &[RuleKind::ConsistentCommentStyle]
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        let bytes = ctx.source().bytes();
        let delimiter = ctx.options().line_delimiter;
        let mut report = DiagnosticReport::new();

        let mut expected: Option<&'static str> = None;
        let mut i = 0;
        while i < bytes.len() {
            if skip_string(bytes, &mut i) || skip_comment(bytes, &mut i, delimiter, false) {
                i += 1;
                continue;
            }
            if is_line_comment_start(bytes, i) {
                let found = marker_at(bytes, i);
                match expected {
                    None => expected = Some(found),
                    Some(first) if first != found => ctx.emit(
                        &mut report,
                        RuleKind::ConsistentCommentStyle,
                        i + found.len() - 1,
                        format!("One line comments should be consistent, expected: {first}, found: {found}"),
                    ),
                    Some(_) => {}
                }
                skip_comment(bytes, &mut i, delimiter, true);
            }
            i += 1;
        }
        Ok(report)
    }
}
