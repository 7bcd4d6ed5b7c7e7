//! Check command implementation.

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use sql_lint::rules::Preset;
use sql_lint::scanner::{skip_comment, skip_string};
use sql_lint::syntax::StatementParser;
use sql_lint::{Analyzer, Config, LintResult, RuleKind};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::output::{self, SourceFile};
use crate::config_resolver;
use crate::CheckArgs;

/// Name shown for text read from standard input.
const STDIN_NAME: &str = "<stdin>";

/// Runs the check command.
///
/// Returns `Ok(true)` when every linted document is clean.
pub fn run(args: &CheckArgs, config_path: Option<&Path>) -> Result<bool> {
    let project_dir = project_dir(args);
    let mut config = config_resolver::resolve(&project_dir, config_path).load()?;
    restrict_rules(&mut config, &args.rules);

    let analyzer = Analyzer::builder()
        .root(&project_dir)
        .registry(Preset::All.checks())
        .excludes(args.exclude.iter().cloned())
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    let sources = if args.stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        let statement = first_statement(&text, analyzer.options().line_delimiter);
        vec![SourceFile {
            name: STDIN_NAME.to_string(),
            text: statement.to_string(),
        }]
    } else {
        read_sources(&collect_files(&args.paths, &analyzer))?
    };

    tracing::info!(
        "Linting {} document(s) with {} checks",
        sources.len(),
        analyzer.check_count()
    );

    let mut result = LintResult::new();
    for source in &sources {
        if args.print_ast {
            print_ast(source);
        }
        result.push(analyzer.lint_source(&source.text, Some(&source.name)));
    }

    output::print(&result, &sources, args.format)?;
    Ok(result.is_clean())
}

/// Picks the directory used for config lookup and relative file names.
fn project_dir(args: &CheckArgs) -> PathBuf {
    match args.paths.first() {
        Some(p) if !args.stdin && p.is_dir() => p.clone(),
        Some(p) if !args.stdin => p
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        _ => PathBuf::from("."),
    }
}

/// Disables every rule not named in `selected`.
///
/// Names and codes (`SQL021`) are both accepted. An empty selection keeps
/// every rule.
fn restrict_rules(config: &mut Config, selected: &[String]) {
    if selected.is_empty() {
        return;
    }

    let mut keep = Vec::new();
    for name in selected.iter().map(String::as_str).map(str::trim).filter(|s| !s.is_empty()) {
        let kind = RuleKind::from_name(name)
            .or_else(|| RuleKind::ALL.into_iter().find(|k| k.code().eq_ignore_ascii_case(name)));
        match kind {
            Some(kind) => keep.push(kind),
            None => tracing::warn!("Unknown rule: {name}"),
        }
    }

    for kind in RuleKind::ALL {
        if !keep.contains(&kind) && !config.linter.nolint.iter().any(|n| n == kind.name()) {
            config.linter.nolint.push(kind.name().to_string());
        }
    }
}

/// Expands directories and drops files the analyzer does not lint.
fn collect_files(paths: &[PathBuf], analyzer: &Analyzer) -> Vec<PathBuf> {
    let settings = &analyzer.config().analyzer;
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let walker = WalkBuilder::new(path)
                .git_ignore(settings.respect_gitignore)
                .build();
            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!("Skipping unreadable entry: {e}");
                        continue;
                    }
                };
                let file = entry.path();
                if entry.file_type().is_some_and(|t| t.is_file())
                    && settings.is_supported(file)
                    && !analyzer.should_exclude(file)
                {
                    files.push(file.to_path_buf());
                }
            }
        } else if settings.is_supported(path) {
            files.push(path.clone());
        } else {
            tracing::warn!("Skipping {}: unsupported file extension", path.display());
        }
    }

    files.sort();
    files.dedup();
    files
}

fn read_sources(files: &[PathBuf]) -> Result<Vec<SourceFile>> {
    files
        .iter()
        .map(|path| {
            tracing::debug!("Reading: {}", path.display());
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(SourceFile {
                name: path.display().to_string(),
                text,
            })
        })
        .collect()
}

/// Returns `text` up to and including the first `;` outside strings and
/// comments, or all of it when there is none.
fn first_statement(text: &str, delimiter: u8) -> &str {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if skip_string(bytes, &mut i) || skip_comment(bytes, &mut i, delimiter, true) {
            i += 1;
            continue;
        }
        if bytes[i] == b';' {
            return &text[..=i];
        }
        i += 1;
    }
    text
}

fn print_ast(source: &SourceFile) {
    let mut parser = StatementParser::new(&source.text);
    while let Some(unit) = parser.parse_next() {
        match unit {
            Ok(unit) => println!("{}", unit.debug_tree(&source.text)),
            Err(err) => println!("{}: {err}", source.name),
        }
    }
}
