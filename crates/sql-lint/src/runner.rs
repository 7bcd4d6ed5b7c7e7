//! One-call entry points over the built-in check suites.

use sql_lint_core::{Analyzer, AnalyzerError, Config, DiagnosticReport};
use sql_lint_rules::Preset;

/// Builds an analyzer for `config` running the checks of `preset`.
///
/// The root directory comes from `config.analyzer.root`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn analyzer(config: Config, preset: Preset) -> Result<Analyzer, AnalyzerError> {
    Analyzer::builder().registry(preset.checks()).config(config).build()
}

/// Lints `text` with every built-in check.
///
/// `filename` prefixes each rendered diagnostic when given.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, for example a
/// multi-character line delimiter.
pub fn lint_source(text: &str, config: &Config, filename: Option<&str>) -> Result<DiagnosticReport, AnalyzerError> {
    let analyzer = analyzer(config.clone(), Preset::All)?;
    Ok(analyzer.lint_source(text, filename))
}
