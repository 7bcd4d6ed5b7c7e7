//! Directory analysis over real files.

use std::fs;

use sql_lint::rules::Preset;
use sql_lint::{Config, RuleKind};
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir_all(dir.path().join("queries/generated")).expect("Failed to create dirs");
    fs::write(dir.path().join("queries/daily.sql"), "SELECT COUNT(1) FROM Events;\n").expect("Failed to write");
    fs::write(dir.path().join("queries/clean.sqlm"), "SELECT 1 AS one;\n").expect("Failed to write");
    fs::write(dir.path().join("queries/generated/out.sql"), "select 1\n").expect("Failed to write");
    fs::write(dir.path().join("README.md"), "select 1\n").expect("Failed to write");
    dir
}

fn config_for(dir: &TempDir, extra: &str) -> Config {
    let toml = format!("[analyzer]\nroot = {:?}\n{extra}", dir.path().display().to_string());
    Config::parse(&toml).expect("Failed to parse config")
}

#[test]
fn analyze_walks_supported_files_only() {
    let dir = project();
    let analyzer = sql_lint::analyzer(config_for(&dir, ""), Preset::All).expect("Failed to build analyzer");
    let result = analyzer.analyze().expect("Failed to analyze");

    assert_eq!(result.files_checked, 3);
    assert!(!result.is_clean());
    assert_eq!(result.count_by_rule().get(&RuleKind::CountStar), Some(&1));
}

#[test]
fn analyze_respects_exclude_patterns() {
    let dir = project();
    let config = config_for(&dir, "exclude = [\"**/generated/**\"]\n");
    let analyzer = sql_lint::analyzer(config, Preset::All).expect("Failed to build analyzer");
    let result = analyzer.analyze().expect("Failed to analyze");

    assert_eq!(result.files_checked, 2);
    let mut rendered: Vec<String> = result.reports.iter().flat_map(|r| r.render()).collect();
    rendered.sort();
    insta::assert_snapshot!(rendered.join("\n"), @"queries/daily.sql:In line 1, column 15: Use COUNT(*) instead of COUNT(1) [count-star]");
}

#[test]
fn lint_file_reports_unreadable_path() {
    let dir = project();
    let analyzer = sql_lint::analyzer(config_for(&dir, ""), Preset::All).expect("Failed to build analyzer");
    let err = analyzer
        .lint_file(&dir.path().join("missing.sql"))
        .expect_err("missing file must fail");
    assert!(err.to_string().contains("missing.sql"));
}
