//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# sql-lint configuration

[linter]
# Line delimiter, a single character
line_delimiter = "\n"

# Maximum line width; tabs count as tab_size columns
line_limit = 100
tab_size = 4

# Indentation character, " " or "\t"
allowed_indent = " "

# Require 'single' (true) or "double" (false) quoted strings
single_quote = true

# Require UPPERCASE (true) or lowercase (false) keywords
upper_keyword = true

# Rules disabled for every file; see `sql-lint list-rules`
nolint = []

[analyzer]
# Glob patterns to exclude from analysis
exclude = [
    "**/target/**",
    "**/generated/**",
]

# File extensions treated as SQL
extensions = ["sql", "sqlm", "sqlp", "sqlt", "gsql"]

# Respect .gitignore files
respect_gitignore = true

# [rules.count-star]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("."), force)?;

    println!("Created {}", PROJECT_CONFIG_NAMES[0]);
    println!("\nNext steps:");
    println!("  1. Edit {} to configure rules", PROJECT_CONFIG_NAMES[0]);
    println!("  2. Run: sql-lint check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(PROJECT_CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sql_lint::{Config, LintOptions};
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_builtin_defaults() {
        let config = Config::parse(DEFAULT_CONFIG).expect("Failed to parse default config");
        let options = config.lint_options().expect("Failed to validate default config");
        assert_eq!(options, LintOptions::default());
        assert!(config.disabled_rules().is_empty());
        assert_eq!(config.analyzer.extensions, sql_lint::DEFAULT_EXTENSIONS);
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(tmp.path().join("sql-lint.toml"), "# mine\n").expect("Failed to write");

        let err = write_config(tmp.path(), false).expect_err("existing file must be kept");
        assert!(err.to_string().contains("--force"));

        write_config(tmp.path(), true).expect("Failed to overwrite");
        let written = std::fs::read_to_string(tmp.path().join("sql-lint.toml")).expect("Failed to read");
        assert_eq!(written, DEFAULT_CONFIG);
    }
}
