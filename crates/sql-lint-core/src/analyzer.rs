//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, LintOptions};
use crate::context::RunContext;
use crate::directives::scan_directives;
use crate::ledger::ActivationLedger;
use crate::registry::CheckRegistry;
use crate::report::{DiagnosticReport, LintResult};
use crate::source::SourceText;
use crate::{Check, CheckBox, RuleKind};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be read as UTF-8 text.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path to the file that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// An AST check was registered before the parser check.
    #[error("Check '{0}' inspects the syntax tree but runs before the parser check")]
    CheckOrder(&'static str),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    registry: CheckRegistry,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a check to the analyzer.
    #[must_use]
    pub fn check<C: Check + 'static>(mut self, check: C) -> Self {
        self.registry.push(Box::new(check));
        self
    }

    /// Adds a boxed check to the analyzer.
    #[must_use]
    pub fn check_box(mut self, check: CheckBox) -> Self {
        self.registry.push(check);
        self
    }

    /// Appends every check from `registry`, keeping their order.
    #[must_use]
    pub fn registry(mut self, registry: CheckRegistry) -> Self {
        for check in registry {
            self.registry.push(check);
        }
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, if an AST check is
    /// registered before the parser check, or if the current directory
    /// cannot be determined.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let options = config.lint_options()?;

        if !self.registry.parser_precedes_ast_checks() {
            let offender = self
                .registry
                .iter()
                .take_while(|c| !c.provides_parse())
                .find(|c| c.requires_ast())
                .map_or("unknown", |c| c.name());
            return Err(AnalyzerError::CheckOrder(offender));
        }

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        Ok(Analyzer {
            root,
            registry: self.registry,
            exclude_patterns,
            disabled: config.disabled_rules(),
            options,
            config,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    registry: CheckRegistry,
    exclude_patterns: Vec<String>,
    disabled: Vec<RuleKind>,
    options: LintOptions,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        self.registry.len()
    }

    /// Returns the validated style options.
    #[must_use]
    pub fn options(&self) -> &LintOptions {
        &self.options
    }

    /// Returns the configuration the analyzer was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lints one document.
    ///
    /// Directives are collected first, then every check runs against the
    /// resulting ledger. The report is sorted by position.
    #[must_use]
    pub fn lint_source(&self, text: &str, filename: Option<&str>) -> DiagnosticReport {
        let source = SourceText::new(text, self.options.line_delimiter);

        let scan = scan_directives(&source);
        let ledger = self
            .disabled
            .iter()
            .fold(
                ActivationLedger::builder().events(scan.events.iter().copied()),
                |builder, &kind| builder.disable_for_run(kind),
            )
            .build();

        let mut report = scan.unknown_report(&source, &ledger);
        let ctx = RunContext::new(&source, &ledger, &self.options);
        report.merge(self.registry.run(&ctx));

        if let Some(filename) = filename {
            report.set_filename(filename);
        }
        report.sort();
        report
    }

    /// Reads and lints one file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn lint_file(&self, path: &Path) -> Result<DiagnosticReport, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string();

        Ok(self.lint_source(&content, Some(&name)))
    }

    /// Lints every supported file under the root.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let mut result = LintResult::new();
        for file_path in &files {
            result.push(self.lint_file(file_path)?);
        }

        info!(
            "Analysis complete: {} diagnostics in {} files",
            result.diagnostic_count(),
            result.files_checked
        );

        Ok(result)
    }

    /// Discovers every file with a supported extension.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut files = Vec::new();

        for ext in &self.config.analyzer.extensions {
            let pattern = format!("{}/**/*.{ext}", self.root.display());
            for entry in glob::glob(&pattern)? {
                let path = entry.map_err(std::io::Error::from)?;

                if self.should_exclude(&path) {
                    debug!("Excluding: {}", path.display());
                    continue;
                }

                files.push(path);
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    #[must_use]
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/target/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty()
                && normalized_pattern != "/"
                && path_str.contains(&normalized_pattern)
            {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CheckError, ParserSucceeds};

    struct NoLowercaseSelect;

    impl Check for NoLowercaseSelect {
        fn name(&self) -> &'static str {
            "no-lowercase-select"
        }

        fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
            let mut report = DiagnosticReport::new();
            for (offset, _) in ctx.text().match_indices("select") {
                ctx.emit(&mut report, RuleKind::ConsistentLetterCase, offset, "lowercase");
            }
            Ok(report)
        }
    }

    struct AstFirst;

    impl Check for AstFirst {
        fn name(&self) -> &'static str {
            "ast-first"
        }

        fn requires_ast(&self) -> bool {
            true
        }

        fn check(&self, _ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
            Ok(DiagnosticReport::new())
        }
    }

    fn analyzer() -> Analyzer {
        Analyzer::builder()
            .root(".")
            .check(ParserSucceeds)
            .check(NoLowercaseSelect)
            .build()
            .expect("Failed to build analyzer")
    }

    // --- Builder ---

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/target/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert_eq!(analyzer.check_count(), 0);
    }

    #[test]
    fn test_builder_rejects_misordered_checks() {
        let err = Analyzer::builder()
            .check(AstFirst)
            .check(ParserSucceeds)
            .build()
            .err()
            .expect("should reject");
        assert!(matches!(err, AnalyzerError::CheckOrder("ast-first")));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = Config::parse("[linter]\nallowed_indent = \"x\"\n").expect("Failed to parse");
        let result = Analyzer::builder().config(config).build();
        assert!(matches!(result, Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/target/**")
            .exclude("**/vendor/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/target/debug/q.sql")));
        assert!(analyzer.should_exclude(Path::new("/foo/vendor/q.sql")));
        assert!(!analyzer.should_exclude(Path::new("/foo/src/q.sql")));
    }

    // --- Linting ---

    #[test]
    fn test_lint_source_sorts_and_names() {
        let report = analyzer().lint_source("select 1;\nselect 2\nselect 3;", Some("q.sql"));
        let lines = report.render();
        assert_eq!(lines[0], "q.sql:In line 1, column 1: lowercase [consistent-letter-case]");
        assert!(lines.iter().any(|l| l.ends_with("[parser-failed]")));
        assert_eq!(report.len(), 4);
    }

    #[test]
    fn test_lint_source_applies_directives() {
        let text = "select 1;\n-- NOLINT(consistent-letter-case)\nselect 2;\n-- LINT(consistent-letter-case)\nselect 3;";
        let report = analyzer().lint_source(text, None);
        let lines: Vec<_> = report.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, [1, 5]);
    }

    #[test]
    fn test_config_disables_for_whole_run() {
        let config = Config::parse("[rules.consistent-letter-case]\nenabled = false\n")
            .expect("Failed to parse");
        let analyzer = Analyzer::builder()
            .root(".")
            .config(config)
            .check(NoLowercaseSelect)
            .build()
            .expect("Failed to build analyzer");

        let text = "-- LINT(consistent-letter-case)\nselect 1;";
        assert!(analyzer.lint_source(text, None).is_clean());
    }

    #[test]
    fn test_analyze_discovers_sql_files() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("nested")).expect("Failed to create dir");
        std::fs::create_dir_all(dir.path().join("target")).expect("Failed to create dir");
        std::fs::write(dir.path().join("a.sql"), "SELECT 1;\n").expect("Failed to write");
        std::fs::write(dir.path().join("nested/b.gsql"), "select 1;\n").expect("Failed to write");
        std::fs::write(dir.path().join("target/c.sql"), "select 1;\n").expect("Failed to write");
        std::fs::write(dir.path().join("notes.txt"), "select").expect("Failed to write");

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .exclude("**/target/**")
            .check(NoLowercaseSelect)
            .build()
            .expect("Failed to build analyzer");
        let result = analyzer.analyze().expect("Failed to analyze");

        assert_eq!(result.files_checked, 2);
        assert_eq!(result.diagnostic_count(), 1);
        let dirty = result.reports.iter().find(|r| !r.is_clean()).expect("dirty report");
        assert_eq!(
            dirty.filename.as_deref(),
            Some(Path::new("nested").join("b.gsql").to_string_lossy().as_ref())
        );
    }
}
