//! Configuration types for sql-lint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::RuleKind;

/// Default maximum line width.
pub const DEFAULT_LINE_LIMIT: usize = 100;

/// Default tab width used when measuring lines.
pub const DEFAULT_TAB_SIZE: usize = 4;

/// File extensions treated as SQL by default.
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["sql", "sqlm", "sqlp", "sqlt", "gsql"];

/// Top-level configuration for sql-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Style options shared by every check.
    #[serde(default)]
    pub linter: LinterConfig,

    /// File discovery configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled by name.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        !self.linter.nolint.iter().any(|n| n == rule_name)
            && self
                .rules
                .get(rule_name)
                .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Returns the rules disabled for the whole run.
    ///
    /// Unknown names are logged and ignored.
    #[must_use]
    pub fn disabled_rules(&self) -> Vec<RuleKind> {
        let from_rules = self
            .rules
            .iter()
            .filter(|(_, c)| c.enabled == Some(false))
            .map(|(name, _)| name.as_str());

        let mut disabled = Vec::new();
        for name in self.linter.nolint.iter().map(String::as_str).chain(from_rules) {
            match RuleKind::from_name(name) {
                Some(kind) if !disabled.contains(&kind) => disabled.push(kind),
                Some(_) => {}
                None => tracing::warn!("Ignoring unknown rule '{name}' in configuration"),
            }
        }
        disabled
    }

    /// Validates the `[linter]` table.
    ///
    /// # Errors
    ///
    /// Returns an error if the delimiter or indent is not a single allowed
    /// character.
    pub fn lint_options(&self) -> Result<LintOptions, ConfigError> {
        self.linter.to_options()
    }
}

/// The `[linter]` table as written in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Line delimiter; a single ASCII character.
    #[serde(default = "default_line_delimiter")]
    pub line_delimiter: String,

    /// Maximum line width.
    #[serde(default = "default_line_limit")]
    pub line_limit: usize,

    /// Indentation character, `" "` or `"\t"`.
    #[serde(default = "default_allowed_indent")]
    pub allowed_indent: String,

    /// Require single-quoted strings (otherwise double).
    #[serde(default = "default_true")]
    pub single_quote: bool,

    /// Require uppercase keywords (otherwise lowercase).
    #[serde(default = "default_true")]
    pub upper_keyword: bool,

    /// Width of a tab when measuring lines.
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Rules disabled for the whole run.
    #[serde(default)]
    pub nolint: Vec<String>,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            line_delimiter: default_line_delimiter(),
            line_limit: DEFAULT_LINE_LIMIT,
            allowed_indent: default_allowed_indent(),
            single_quote: true,
            upper_keyword: true,
            tab_size: DEFAULT_TAB_SIZE,
            nolint: Vec::new(),
        }
    }
}

impl LinterConfig {
    fn to_options(&self) -> Result<LintOptions, ConfigError> {
        let line_delimiter = single_ascii("line_delimiter", &self.line_delimiter)?;
        let allowed_indent = single_ascii("allowed_indent", &self.allowed_indent)?;
        if !matches!(allowed_indent, b' ' | b'\t') {
            return Err(ConfigError::Invalid {
                key: "allowed_indent",
                message: "must be a space or a tab".to_string(),
            });
        }
        Ok(LintOptions {
            line_delimiter,
            line_limit: self.line_limit,
            allowed_indent,
            single_quote: self.single_quote,
            upper_keyword: self.upper_keyword,
            tab_size: self.tab_size,
        })
    }
}

fn single_ascii(key: &'static str, value: &str) -> Result<u8, ConfigError> {
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ConfigError::Invalid {
            key,
            message: format!("expected a single ASCII character, got {value:?}"),
        }),
    }
}

fn default_line_delimiter() -> String {
    "\n".to_string()
}

fn default_line_limit() -> usize {
    DEFAULT_LINE_LIMIT
}

fn default_allowed_indent() -> String {
    " ".to_string()
}

fn default_tab_size() -> usize {
    DEFAULT_TAB_SIZE
}

fn default_true() -> bool {
    true
}

/// Validated style options handed to checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintOptions {
    /// Line delimiter byte.
    pub line_delimiter: u8,
    /// Maximum line width.
    pub line_limit: usize,
    /// Indentation byte, space or tab.
    pub allowed_indent: u8,
    /// Require single-quoted strings.
    pub single_quote: bool,
    /// Require uppercase keywords.
    pub upper_keyword: bool,
    /// Width of a tab when measuring lines.
    pub tab_size: usize,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            line_delimiter: b'\n',
            line_limit: DEFAULT_LINE_LIMIT,
            allowed_indent: b' ',
            single_quote: true,
            upper_keyword: true,
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extensions treated as SQL.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/target/**".to_string()],
            extensions: default_extensions(),
            respect_gitignore: true,
        }
    }
}

impl AnalyzerConfig {
    /// Returns true if `path` has one of the configured extensions.
    #[must_use]
    pub fn is_supported(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x == ext))
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect()
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A value is well-formed TOML but not usable.
    #[error("Invalid value for '{key}': {message}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },
}
