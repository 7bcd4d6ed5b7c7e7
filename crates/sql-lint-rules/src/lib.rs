//! # sql-lint-rules
//!
//! Built-in style checks for sql-lint.
//!
//! ## Available Checks
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SQL001 | `parser-failed` | Statement could not be parsed (from `sql-lint-core`) |
//! | SQL003 | `line-limit-exceed` | Line is longer than the configured limit |
//! | SQL004 | `statement-semicolon` | Last statement must end with a semicolon |
//! | SQL005 | `consistent-letter-case` | Keywords must use the configured letter case |
//! | SQL006 | `consistent-comment-style` | Single-line comments must use one style |
//! | SQL007 | `alias` | Aliases must be introduced with `AS` |
//! | SQL008 | `uniform-indent` | Indentation must use the configured character |
//! | SQL009 | `not-indent-tab` | Tabs are only allowed in indentation |
//! | SQL010 | `single-or-double-quote` | Strings must use the configured quote style |
//! | SQL011-017 | `table-name` ... `constant-name` | Naming conventions, see [`Names`] |
//! | SQL018 | `join` | Joins must state their type explicitly |
//! | SQL019 | `imports` | `IMPORT` statements must be typed, grouped and unique |
//! | SQL020 | `expression-parentheses` | Mixed `AND`/`OR` expressions need parentheses |
//! | SQL021 | `count-star` | Use `COUNT(*)` instead of `COUNT(1)` |
//! | SQL022 | `keyword-identifier` | Identifiers must not be spelled like keywords |
//!
//! ## Usage
//!
//! ```
//! use sql_lint_core::Analyzer;
//! use sql_lint_rules::{all_checks, CountStar};
//!
//! let analyzer = Analyzer::builder()
//!     .root(".")
//!     .registry(all_checks())
//!     .build()?;
//!
//! let report = analyzer.lint_source("SELECT COUNT(1) FROM T;\n", None);
//! assert_eq!(report.render(), ["In line 1, column 15: Use COUNT(*) instead of COUNT(1) [count-star]"]);
//!
//! let only_counts = Analyzer::builder().root(".").check(CountStar::new()).build()?;
//! assert_eq!(only_counts.check_count(), 1);
//! # Ok::<(), sql_lint_core::AnalyzerError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod alias;
pub mod case;
mod comment_style;
mod count_star;
mod expression_parentheses;
mod imports;
mod indent;
mod join;
mod keywords;
mod line_length;
mod names;
mod presets;
mod semicolon;
mod single_quote;

#[cfg(test)]
mod test_util;

pub use alias::Alias;
pub use comment_style::CommentStyle;
pub use count_star::CountStar;
pub use expression_parentheses::ExpressionParentheses;
pub use imports::Imports;
pub use indent::{NotIndentTab, UniformIndent};
pub use join::Join;
pub use keywords::{KeywordIdentifier, LetterCase};
pub use line_length::LineLength;
pub use names::Names;
pub use presets::{all_checks, ast_dependent_checks, reported_kinds, Preset};
pub use semicolon::Semicolon;
pub use single_quote::SingleQuote;
