//! # sql-lint
//!
//! Style linter for SQL scripts.
//!
//! This is the facade crate that re-exports the core framework, the
//! built-in checks and the parser.
//!
//! ## Quick Start
//!
//! ```
//! use sql_lint::Config;
//!
//! let report = sql_lint::lint_source("select 1;\n", &Config::default(), Some("q.sql"))?;
//! assert_eq!(
//!     report.render(),
//!     ["q.sql:In line 1, column 1: Keyword 'select' should be all uppercase [consistent-letter-case]"]
//! );
//! # Ok::<(), sql_lint::AnalyzerError>(())
//! ```
//!
//! ## Suppression Directives
//!
//! Checks can be switched off and on again from inside a script. A
//! directive takes effect at the end of the line it is written on:
//!
//! ```sql
//! -- NOLINT(alias, consistent-letter-case)
//! select 1 a;
//! -- LINT(alias)
//! ```
//!
//! ## Programmatic Usage
//!
//! ```no_run
//! use sql_lint::rules::Preset;
//! use sql_lint::{Analyzer, Config};
//!
//! let config = Config::from_file("sql-lint.toml".as_ref())?;
//! let analyzer = sql_lint::analyzer(config, Preset::All)?;
//! let result = analyzer.analyze()?;
//! println!("{} diagnostics", result.diagnostic_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub use sql_lint_core::*;

/// Built-in checks and presets.
pub mod rules {
    pub use sql_lint_rules::*;
}

/// Tokenizer and statement parser.
pub mod syntax {
    pub use sql_lint_syntax::*;
}

mod runner;

pub use runner::{analyzer, lint_source};
