//! The closed set of diagnostic categories.

use serde::{Deserialize, Serialize};

/// A diagnostic category.
///
/// The kebab-case name is what users write in `NOLINT(...)` directives and
/// in configuration files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// A statement could not be parsed.
    ParserFailed,
    /// A directive named a category that does not exist.
    #[serde(rename = "nolint")]
    UnknownSuppression,
    /// A line is longer than the configured limit.
    LineLimitExceed,
    /// The last statement does not end with `;`.
    StatementSemicolon,
    /// A keyword does not use the configured letter case.
    ConsistentLetterCase,
    /// Single-line comments mix `--`, `//` and `#`.
    ConsistentCommentStyle,
    /// An alias is not introduced by `AS`.
    Alias,
    /// Indentation uses the wrong character.
    UniformIndent,
    /// A tab appears after the indentation.
    NotIndentTab,
    /// A string uses the wrong quote style.
    SingleOrDoubleQuote,
    /// A table name is not `UpperCamelCase`.
    TableName,
    /// A window name is not `UpperCamelCase`.
    WindowName,
    /// A function name is not `UpperCamelCase`.
    FunctionName,
    /// A simple data type is not all caps.
    DataTypeName,
    /// A column alias is not `lower_snake_case`.
    ColumnName,
    /// A function parameter does not follow its naming convention.
    ParameterName,
    /// A constant name is not `CAPS_SNAKE_CASE`.
    ConstantName,
    /// A join does not state its type.
    Join,
    /// `IMPORT` statements are grouped, duplicated or untyped.
    Imports,
    /// `AND` and `OR` are mixed without parentheses.
    ExpressionParentheses,
    /// `COUNT(1)` is used instead of `COUNT(*)`.
    CountStar,
    /// An identifier is spelled like a keyword.
    KeywordIdentifier,
}

impl RuleKind {
    /// Every category, in stable order.
    pub const ALL: [Self; 22] = [
        Self::ParserFailed,
        Self::UnknownSuppression,
        Self::LineLimitExceed,
        Self::StatementSemicolon,
        Self::ConsistentLetterCase,
        Self::ConsistentCommentStyle,
        Self::Alias,
        Self::UniformIndent,
        Self::NotIndentTab,
        Self::SingleOrDoubleQuote,
        Self::TableName,
        Self::WindowName,
        Self::FunctionName,
        Self::DataTypeName,
        Self::ColumnName,
        Self::ParameterName,
        Self::ConstantName,
        Self::Join,
        Self::Imports,
        Self::ExpressionParentheses,
        Self::CountStar,
        Self::KeywordIdentifier,
    ];

    /// Returns the kebab-case name used in directives and configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ParserFailed => "parser-failed",
            Self::UnknownSuppression => "nolint",
            Self::LineLimitExceed => "line-limit-exceed",
            Self::StatementSemicolon => "statement-semicolon",
            Self::ConsistentLetterCase => "consistent-letter-case",
            Self::ConsistentCommentStyle => "consistent-comment-style",
            Self::Alias => "alias",
            Self::UniformIndent => "uniform-indent",
            Self::NotIndentTab => "not-indent-tab",
            Self::SingleOrDoubleQuote => "single-or-double-quote",
            Self::TableName => "table-name",
            Self::WindowName => "window-name",
            Self::FunctionName => "function-name",
            Self::DataTypeName => "data-type-name",
            Self::ColumnName => "column-name",
            Self::ParameterName => "parameter-name",
            Self::ConstantName => "constant-name",
            Self::Join => "join",
            Self::Imports => "imports",
            Self::ExpressionParentheses => "expression-parentheses",
            Self::CountStar => "count-star",
            Self::KeywordIdentifier => "keyword-identifier",
        }
    }

    /// Returns the short code (e.g. `SQL007`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ParserFailed => "SQL001",
            Self::UnknownSuppression => "SQL002",
            Self::LineLimitExceed => "SQL003",
            Self::StatementSemicolon => "SQL004",
            Self::ConsistentLetterCase => "SQL005",
            Self::ConsistentCommentStyle => "SQL006",
            Self::Alias => "SQL007",
            Self::UniformIndent => "SQL008",
            Self::NotIndentTab => "SQL009",
            Self::SingleOrDoubleQuote => "SQL010",
            Self::TableName => "SQL011",
            Self::WindowName => "SQL012",
            Self::FunctionName => "SQL013",
            Self::DataTypeName => "SQL014",
            Self::ColumnName => "SQL015",
            Self::ParameterName => "SQL016",
            Self::ConstantName => "SQL017",
            Self::Join => "SQL018",
            Self::Imports => "SQL019",
            Self::ExpressionParentheses => "SQL020",
            Self::CountStar => "SQL021",
            Self::KeywordIdentifier => "SQL022",
        }
    }

    /// Returns a one-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ParserFailed => "Statement could not be parsed",
            Self::UnknownSuppression => "NOLINT/LINT directive names an unknown check",
            Self::LineLimitExceed => "Line is longer than the configured limit",
            Self::StatementSemicolon => "Last statement must end with a semicolon",
            Self::ConsistentLetterCase => "Keywords must use the configured letter case",
            Self::ConsistentCommentStyle => "Single-line comments must use one style",
            Self::Alias => "Aliases must be introduced with AS",
            Self::UniformIndent => "Indentation must use the configured character",
            Self::NotIndentTab => "Tabs are only allowed in indentation",
            Self::SingleOrDoubleQuote => "Strings must use the configured quote style",
            Self::TableName => "Table names must be UpperCamelCase",
            Self::WindowName => "Window names must be UpperCamelCase",
            Self::FunctionName => "Function names must be UpperCamelCase",
            Self::DataTypeName => "Simple data types must be all caps",
            Self::ColumnName => "Column aliases must be lower_snake_case",
            Self::ParameterName => "Function parameters must follow naming conventions",
            Self::ConstantName => "Constant names must be CAPS_SNAKE_CASE",
            Self::Join => "Joins must state their type explicitly",
            Self::Imports => "IMPORT statements must be typed, grouped and unique",
            Self::ExpressionParentheses => "Mixed AND/OR expressions need parentheses",
            Self::CountStar => "Use COUNT(*) instead of COUNT(1)",
            Self::KeywordIdentifier => "Identifiers must not be spelled like keywords",
        }
    }

    /// Looks up a category by its kebab-case name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(RuleKind::from_name("not-a-real-check"), None);
    }

    #[test]
    fn test_codes_are_sequential() {
        for (i, kind) in RuleKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.code(), format!("SQL{:03}", i + 1));
        }
    }

    #[test]
    fn test_serde_uses_directive_names() {
        let json = serde_json::to_string(&RuleKind::UnknownSuppression).expect("serialize");
        assert_eq!(json, "\"nolint\"");
        let json = serde_json::to_string(&RuleKind::SingleOrDoubleQuote).expect("serialize");
        assert_eq!(json, "\"single-or-double-quote\"");
    }
}
