//! SQL tokenizer and resumable statement parser for sql-lint.
//!
//! This crate covers the subset of GoogleSQL that the style checks inspect:
//! queries with joins, filters, grouping and window clauses, the common
//! `CREATE` statements, and `IMPORT`. Statements are parsed one at a time
//! into an arena tree ([`ParseUnit`]) whose nodes carry parent links and
//! byte spans.
//!
//! ```
//! use sql_lint_syntax::{parse_script, NodeKind};
//!
//! let units = parse_script("SELECT a AS b FROM t;").unwrap();
//! let aliases = units[0]
//!     .walk()
//!     .filter(|node| matches!(node.kind(), NodeKind::Alias { .. }))
//!     .count();
//! assert_eq!(aliases, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
mod error;
mod lexer;
mod parser;
mod span;
mod token;

pub use ast::{BinaryOp, JoinType, NodeData, NodeId, NodeKind, NodeRef, ParseUnit, Walk};
pub use error::{LexError, ParseError};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse_script, StatementParser};
pub use span::Span;
pub use token::{Keyword, Token, TokenClass, TokenKind};
