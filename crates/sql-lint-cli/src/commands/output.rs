//! Shared output formatting for lint results.

use anyhow::Result;
use miette::NamedSource;
use serde::Serialize;
use sql_lint::{DiagnosticReport, DiagnosticSnippet, LintResult};

use crate::OutputFormat;

/// A linted document and the name it is reported under.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Display name, usually the path.
    pub name: String,
    /// Full document text.
    pub text: String,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    files_checked: usize,
    diagnostic_count: usize,
    failure_count: usize,
    reports: &'a [DiagnosticReport],
}

/// Print lint results in the specified format.
pub fn print(result: &LintResult, sources: &[SourceFile], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Pretty => print_pretty(result, sources),
    }
    Ok(())
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();
    for line in result.reports.iter().flat_map(DiagnosticReport::render) {
        out.push_str(&line);
        out.push('\n');
    }

    let summary_color = if result.failure_count() > 0 {
        "\x1b[31m"
    } else if result.diagnostic_count() > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    out.push_str(&format!(
        "{summary_color}Found {} diagnostic(s) and {} failure(s) in {} file(s)\x1b[0m\n",
        result.diagnostic_count(),
        result.failure_count(),
        result.files_checked
    ));
    out
}

fn render_json(result: &LintResult) -> Result<String> {
    let output = JsonOutput {
        files_checked: result.files_checked,
        diagnostic_count: result.diagnostic_count(),
        failure_count: result.failure_count(),
        reports: &result.reports,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn print_pretty(result: &LintResult, sources: &[SourceFile]) {
    for report in &result.reports {
        let source = sources
            .iter()
            .find(|s| report.filename.as_deref() == Some(s.name.as_str()));

        for diagnostic in &report.diagnostics {
            let snippet = miette::Report::new(DiagnosticSnippet::from(diagnostic));
            match source {
                Some(source) => {
                    let named = NamedSource::new(&source.name, source.text.clone());
                    println!("{:?}", snippet.with_source_code(named));
                }
                None => println!("{snippet:?}"),
            }
        }
        for failure in &report.failures {
            println!("{failure}");
        }
    }
    println!(
        "Found {} diagnostic(s) in {} file(s)",
        result.diagnostic_count(),
        result.files_checked
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_lint::{Analyzer, Failure, ParserSucceeds};

    fn result_for(text: &str) -> LintResult {
        let analyzer = Analyzer::builder()
            .root(".")
            .check(ParserSucceeds)
            .build()
            .expect("Failed to build analyzer");
        let mut result = LintResult::new();
        result.push(analyzer.lint_source(text, Some("q.sql")));
        result
    }

    #[test]
    fn test_text_lists_diagnostics_then_summary() {
        let text = render_text(&result_for("SELECT 1;\nSELECT 2\nSELECT 3;"));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "q.sql:In line 3, column 1: Syntax error: Expected \";\" but got keyword SELECT [parser-failed]"
        );
        assert!(lines[1].contains("Found 1 diagnostic(s) and 0 failure(s) in 1 file(s)"));
    }

    #[test]
    fn test_text_includes_failures() {
        let mut result = result_for("SELECT 1;");
        result.reports[0].add_failure(Failure::new("join", Some(99), "Offset out of range"));
        let text = render_text(&result);
        assert!(text.starts_with("q.sql:join failed at offset 99: Offset out of range\n"));
    }

    #[test]
    fn test_json_shape() {
        let json = render_json(&result_for("SELECT 1;\nSELECT 2\nSELECT 3;")).expect("Failed to render json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("Failed to parse json");

        assert_eq!(value["files_checked"], 1);
        assert_eq!(value["diagnostic_count"], 1);
        let diagnostic = &value["reports"][0]["diagnostics"][0];
        assert_eq!(diagnostic["rule"], "parser-failed");
        assert_eq!(diagnostic["line"], 3);
        assert_eq!(diagnostic["filename"], "q.sql");
    }
}
