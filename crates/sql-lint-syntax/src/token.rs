//! Token types produced by the lexer.

use crate::Span;

macro_rules! keywords {
    ($($variant:ident => $text:literal, $reserved:literal;)*) => {
        /// SQL keywords.
        ///
        /// Reserved keywords can never be used as bare identifiers;
        /// non-reserved ones are classified as keywords by the tokenizer but
        /// the parser also accepts them wherever an identifier is expected.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// Looks up a keyword, ignoring ASCII case.
            #[must_use]
            pub fn lookup(word: &str) -> Option<Self> {
                match word.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the canonical (uppercase) spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }

            /// Returns true if the keyword cannot be used as an identifier.
            #[must_use]
            pub const fn is_reserved(self) -> bool {
                match self {
                    $(Self::$variant => $reserved,)*
                }
            }
        }
    };
}

keywords! {
    All => "ALL", true;
    And => "AND", true;
    Any => "ANY", true;
    Array => "ARRAY", true;
    As => "AS", true;
    Asc => "ASC", true;
    At => "AT", true;
    Between => "BETWEEN", true;
    By => "BY", true;
    Case => "CASE", true;
    Cast => "CAST", true;
    Collate => "COLLATE", true;
    Create => "CREATE", true;
    Cross => "CROSS", true;
    Cube => "CUBE", true;
    Current => "CURRENT", true;
    Default => "DEFAULT", true;
    Desc => "DESC", true;
    Distinct => "DISTINCT", true;
    Else => "ELSE", true;
    End => "END", true;
    Enum => "ENUM", true;
    Escape => "ESCAPE", true;
    Except => "EXCEPT", true;
    Exclude => "EXCLUDE", true;
    Exists => "EXISTS", true;
    Extract => "EXTRACT", true;
    False => "FALSE", true;
    Fetch => "FETCH", true;
    Following => "FOLLOWING", true;
    For => "FOR", true;
    From => "FROM", true;
    Full => "FULL", true;
    Group => "GROUP", true;
    Grouping => "GROUPING", true;
    Hash => "HASH", true;
    Having => "HAVING", true;
    If => "IF", true;
    Ignore => "IGNORE", true;
    In => "IN", true;
    Inner => "INNER", true;
    Intersect => "INTERSECT", true;
    Interval => "INTERVAL", true;
    Into => "INTO", true;
    Is => "IS", true;
    Join => "JOIN", true;
    Lateral => "LATERAL", true;
    Left => "LEFT", true;
    Like => "LIKE", true;
    Limit => "LIMIT", true;
    Lookup => "LOOKUP", true;
    Merge => "MERGE", true;
    Natural => "NATURAL", true;
    New => "NEW", true;
    No => "NO", true;
    Not => "NOT", true;
    Null => "NULL", true;
    Nulls => "NULLS", true;
    Of => "OF", true;
    On => "ON", true;
    Or => "OR", true;
    Order => "ORDER", true;
    Outer => "OUTER", true;
    Over => "OVER", true;
    Partition => "PARTITION", true;
    Preceding => "PRECEDING", true;
    Proto => "PROTO", true;
    Range => "RANGE", true;
    Recursive => "RECURSIVE", true;
    Respect => "RESPECT", true;
    Right => "RIGHT", true;
    Rollup => "ROLLUP", true;
    Rows => "ROWS", true;
    Select => "SELECT", true;
    Set => "SET", true;
    Some => "SOME", true;
    Struct => "STRUCT", true;
    Tablesample => "TABLESAMPLE", true;
    Then => "THEN", true;
    To => "TO", true;
    Treat => "TREAT", true;
    True => "TRUE", true;
    Unbounded => "UNBOUNDED", true;
    Union => "UNION", true;
    Unnest => "UNNEST", true;
    Using => "USING", true;
    When => "WHEN", true;
    Where => "WHERE", true;
    Window => "WINDOW", true;
    With => "WITH", true;
    Within => "WITHIN", true;
    Constant => "CONSTANT", false;
    Date => "DATE", false;
    Function => "FUNCTION", false;
    Import => "IMPORT", false;
    Language => "LANGUAGE", false;
    Module => "MODULE", false;
    Offset => "OFFSET", false;
    Options => "OPTIONS", false;
    Private => "PRIVATE", false;
    Public => "PUBLIC", false;
    Replace => "REPLACE", false;
    Returns => "RETURNS", false;
    Table => "TABLE", false;
    Temp => "TEMP", false;
    Temporary => "TEMPORARY", false;
    Time => "TIME", false;
    Timestamp => "TIMESTAMP", false;
    Type => "TYPE", false;
    View => "VIEW", false;
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Integer literal (e.g. `42`, `0x1F`).
    Integer,
    /// Floating point literal (e.g. `6.28`, `1e10`).
    Float,
    /// String or bytes literal in any quoting style.
    String,
    /// Bare identifier.
    Identifier,
    /// Backtick-quoted identifier.
    QuotedIdentifier,
    /// SQL keyword.
    Keyword(Keyword),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `=`
    Eq,
    /// `!=` or `<>`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `||`
    Concat,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `~`
    BitNot,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `?`
    Question,
    /// `@`
    At,
    /// End of input.
    Eof,
}

/// Coarse classification used by token-based checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Any keyword, reserved or not.
    Keyword,
    /// Bare or backtick-quoted identifier.
    Identifier,
    /// Literals, operators and punctuation.
    Other,
}

/// A token with its location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range in the source text.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns the coarse classification of this token.
    #[must_use]
    pub const fn class(&self) -> TokenClass {
        match self.kind {
            TokenKind::Keyword(_) => TokenClass::Keyword,
            TokenKind::Identifier | TokenKind::QuotedIdentifier => TokenClass::Identifier,
            _ => TokenClass::Other,
        }
    }

    /// Returns the source text of this token.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }

    /// Describes the token for error messages (e.g. `keyword SELECT`).
    #[must_use]
    pub fn describe(&self, source: &str) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Keyword(kw) => format!("keyword {}", kw.as_str()),
            TokenKind::Identifier | TokenKind::QuotedIdentifier => {
                format!("identifier \"{}\"", self.text(source))
            }
            TokenKind::Integer | TokenKind::Float => {
                format!("number \"{}\"", self.text(source))
            }
            TokenKind::String => format!("string literal {}", self.text(source)),
            _ => format!("\"{}\"", self.text(source)),
        }
    }
}
