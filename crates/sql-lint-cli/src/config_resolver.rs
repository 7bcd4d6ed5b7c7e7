//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/sql-lint.toml` or `.sql-lint.toml`
//! 3. `$SQL_LINT_CONFIG_DIR/config.toml` or `~/.sql-lint/config.toml`
//! 4. No config found → defaults

use anyhow::{Context, Result};
use sql_lint::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No configuration file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["sql-lint.toml", ".sql-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Accepts `global_dir` as a parameter so tests need no env vars.
fn resolve_inner(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Returns the global config directory path.
///
/// Resolution: `$SQL_LINT_CONFIG_DIR` > `~/.sql-lint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("SQL_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".sql-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_lint::{ConfigError, LintOptions, RuleKind};
    use std::fs;
    use tempfile::TempDir;

    fn temp_dir() -> TempDir {
        TempDir::new().expect("Failed to create temp dir")
    }

    fn write(path: &Path, content: &str) {
        fs::write(path, content).expect("Failed to write file");
    }

    fn load_options(source: &ConfigSource) -> LintOptions {
        source
            .load()
            .expect("Failed to load config")
            .lint_options()
            .expect("Failed to validate config")
    }

    // --- Resolution order ---

    #[test]
    fn test_explicit_file_overrides_project_line_limit() {
        let tmp = temp_dir();
        write(&tmp.path().join("sql-lint.toml"), "[linter]\nline_limit = 120\n");
        let explicit = tmp.path().join("ci.toml");
        write(&explicit, "[linter]\nline_limit = 60\n");

        let source = resolve_inner(tmp.path(), Some(&explicit), None);
        assert_eq!(source, ConfigSource::Explicit(explicit));
        assert_eq!(load_options(&source).line_limit, 60);
    }

    #[test]
    fn test_dot_prefixed_project_config_sets_keyword_case() {
        let tmp = temp_dir();
        write(&tmp.path().join(".sql-lint.toml"), "[linter]\nupper_keyword = false\n");

        let source = resolve_inner(tmp.path(), None, None);
        assert_eq!(source, ConfigSource::Project(tmp.path().join(".sql-lint.toml")));
        assert!(!load_options(&source).upper_keyword);

        write(&tmp.path().join("sql-lint.toml"), "[linter]\nsingle_quote = false\n");
        let options = load_options(&resolve_inner(tmp.path(), None, None));
        assert!(options.upper_keyword);
        assert!(!options.single_quote);
    }

    #[test]
    fn test_global_config_disables_rules_without_project_config() {
        let project = temp_dir();
        let global = temp_dir();
        write(
            &global.path().join("config.toml"),
            "[linter]\nnolint = [\"count-star\"]\n\n[rules.join]\nenabled = false\n",
        );

        let source = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(source, ConfigSource::Global(global.path().join("config.toml")));
        let config = source.load().expect("Failed to load config");
        assert_eq!(config.disabled_rules(), [RuleKind::CountStar, RuleKind::Join]);
    }

    #[test]
    fn test_project_config_shadows_global_nolint() {
        let project = temp_dir();
        write(&project.path().join("sql-lint.toml"), "[linter]\ntab_size = 2\n");
        let global = temp_dir();
        write(&global.path().join("config.toml"), "[linter]\nnolint = [\"join\"]\n");

        let source = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        let config = source.load().expect("Failed to load config");
        assert!(config.disabled_rules().is_empty());
        assert_eq!(config.lint_options().expect("Failed to validate config").tab_size, 2);
    }

    #[test]
    fn test_no_config_uses_builtin_options() {
        let project = temp_dir();
        let global = temp_dir();

        let source = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());
        assert_eq!(load_options(&source), LintOptions::default());
    }

    // --- Loading ---

    #[test]
    fn test_bad_indent_loads_but_fails_validation() {
        let tmp = temp_dir();
        write(&tmp.path().join("sql-lint.toml"), "[linter]\nallowed_indent = \"x\"\n");

        let config = resolve_inner(tmp.path(), None, None)
            .load()
            .expect("Failed to load config");
        assert!(matches!(
            config.lint_options(),
            Err(ConfigError::Invalid { key: "allowed_indent", .. })
        ));
    }

    #[test]
    fn test_malformed_toml_names_the_file() {
        let tmp = temp_dir();
        let path = tmp.path().join("sql-lint.toml");
        write(&path, "[linter\nline_limit = 80\n");

        let err = ConfigSource::Project(path.clone())
            .load()
            .expect_err("malformed toml must fail");
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let source = resolve_inner(Path::new("."), Some(Path::new("/nonexistent/sql-lint.toml")), None);
        let err = source.load().expect_err("missing file must fail");
        assert!(err.to_string().contains("Failed to load config"));
    }
}
