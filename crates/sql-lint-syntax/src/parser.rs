//! Resumable statement parser.
//!
//! [`StatementParser`] tokenizes the whole input up front and then hands out
//! one [`ParseUnit`] per statement. After the first error the parser is
//! exhausted, so callers see exactly the successfully parsed prefix.

use crate::ast::{BinaryOp, JoinType, NodeId, NodeKind, ParseUnit, TreeBuilder};
use crate::{Keyword, LexError, Lexer, ParseError, Span, Token, TokenKind};

type Result<T> = std::result::Result<T, ParseError>;

/// A parsed expression: its node and its outer span.
///
/// The outer span includes surrounding parentheses, which the node's own
/// span does not.
type Expr = (NodeId, Span);

/// Binary operator precedence levels, lowest first.
const BINARY_LEVELS: &[&[(TokenKind, BinaryOp)]] = &[
    &[(TokenKind::BitOr, BinaryOp::BitOr)],
    &[(TokenKind::BitXor, BinaryOp::BitXor)],
    &[(TokenKind::BitAnd, BinaryOp::BitAnd)],
    &[
        (TokenKind::ShiftLeft, BinaryOp::ShiftLeft),
        (TokenKind::ShiftRight, BinaryOp::ShiftRight),
    ],
    &[
        (TokenKind::Plus, BinaryOp::Plus),
        (TokenKind::Minus, BinaryOp::Minus),
    ],
    &[
        (TokenKind::Star, BinaryOp::Multiply),
        (TokenKind::Slash, BinaryOp::Divide),
        (TokenKind::Percent, BinaryOp::Modulo),
        (TokenKind::Concat, BinaryOp::Concat),
    ],
];

/// Parses a script one statement at a time.
pub struct StatementParser<'a> {
    source: &'a str,
    /// All tokens; always ends with an `Eof` token.
    tokens: Vec<Token>,
    /// Tokenizer failure; the final `Eof` sits at its offset.
    lex_error: Option<LexError>,
    pos: usize,
    tree: TreeBuilder,
    exhausted: bool,
}

impl<'a> StatementParser<'a> {
    /// Creates a parser positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        let mut lex_error = None;
        loop {
            match lexer.next_token() {
                Ok(token) => {
                    let eof = token.is_eof();
                    tokens.push(token);
                    if eof {
                        break;
                    }
                }
                Err(err) => {
                    tokens.push(Token::new(
                        TokenKind::Eof,
                        Span::new(err.offset, err.offset),
                    ));
                    lex_error = Some(err);
                    break;
                }
            }
        }

        Self {
            source,
            tokens,
            lex_error,
            pos: 0,
            tree: TreeBuilder::default(),
            exhausted: false,
        }
    }

    /// Parses the next statement.
    ///
    /// Returns `None` at the end of input. After an error, every further
    /// call returns `None`.
    pub fn parse_next(&mut self) -> Option<Result<ParseUnit>> {
        if self.exhausted {
            return None;
        }
        while self.eat(TokenKind::Semicolon).is_some() {}

        if self.peek().is_eof() {
            self.exhausted = true;
            return self.lex_error.take().map(|err| Err(err.into()));
        }

        let start_idx = self.pos;
        self.tree = TreeBuilder::default();
        let root = match self
            .parse_statement()
            .and_then(|root| self.expect_statement_end().map(|()| root))
        {
            Ok(root) => root,
            Err(err) => {
                self.exhausted = true;
                return Some(Err(err));
            }
        };

        let tokens = self.tokens[start_idx..self.pos].to_vec();
        let span = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => Span::default(),
        };
        self.eat(TokenKind::Semicolon);
        let tree = std::mem::take(&mut self.tree);
        Some(Ok(tree.finish(root, span, tokens)))
    }

    // --- Token cursor ---

    fn peek(&self) -> Token {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Token {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens[(self.pos + n).min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// End offset of the last consumed token.
    fn prev_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .map_or(0, |idx| self.tokens[idx].span.end)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn at_keyword(&self, keyword: Keyword) -> bool {
        self.at(TokenKind::Keyword(keyword))
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        self.at(kind).then(|| self.advance())
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> Option<Token> {
        self.eat(TokenKind::Keyword(keyword))
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        self.eat(kind).ok_or_else(|| self.error_here(expected))
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token> {
        self.eat_keyword(keyword)
            .ok_or_else(|| self.error_here(&format!("keyword {}", keyword.as_str())))
    }

    fn error_here(&self, expected: &str) -> ParseError {
        let token = self.peek();
        if token.is_eof() {
            if let Some(err) = &self.lex_error {
                return err.clone().into();
            }
        }
        ParseError::unexpected(token.span.start, expected, &token.describe(self.source))
    }

    fn at_identifier(&self) -> bool {
        is_identifier_like(self.peek().kind)
    }

    fn expect_statement_end(&self) -> Result<()> {
        match self.peek().kind {
            TokenKind::Semicolon | TokenKind::Eof => Ok(()),
            _ => Err(self.error_here("\";\"")),
        }
    }

    /// Skips a balanced parenthesized group starting at `(`.
    fn skip_parenthesized(&mut self) -> Result<()> {
        self.expect(TokenKind::LeftParen, "\"(\"")?;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.advance();
            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                TokenKind::Eof => return Err(self.error_here("\")\"")),
                _ => {}
            }
        }
        Ok(())
    }

    fn skip_options(&mut self) -> Result<()> {
        if self.eat_keyword(Keyword::Options).is_some() {
            self.skip_parenthesized()?;
        }
        Ok(())
    }

    fn eat_if_not_exists(&mut self) -> Result<()> {
        if self.eat_keyword(Keyword::If).is_some() {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
        }
        Ok(())
    }

    // --- Identifiers and paths ---

    fn parse_identifier(&mut self) -> Result<NodeId> {
        if !self.at_identifier() {
            return Err(self.error_here("identifier"));
        }
        let token = self.advance();
        Ok(self.tree.leaf(NodeKind::Identifier, token.span))
    }

    /// Parses `a.b.c`. Any keyword is accepted after a dot.
    fn parse_path(&mut self) -> Result<NodeId> {
        let first = self.parse_identifier()?;
        let mut children = vec![first];
        while self.at(TokenKind::Dot) && is_path_continuation(self.peek_at(1).kind) {
            self.advance();
            let token = self.advance();
            children.push(self.tree.leaf(NodeKind::Identifier, token.span));
        }
        let span = Span::new(self.tree.span(first).start, self.prev_end());
        Ok(self.tree.add(NodeKind::PathExpression, span, children))
    }

    fn parse_optional_alias(&mut self) -> Result<Option<NodeId>> {
        if let Some(as_token) = self.eat_keyword(Keyword::As) {
            let ident = self.parse_identifier()?;
            let span = Span::new(as_token.span.start, self.prev_end());
            return Ok(Some(self.tree.add(
                NodeKind::Alias { explicit: true },
                span,
                vec![ident],
            )));
        }
        if matches!(
            self.peek().kind,
            TokenKind::Identifier | TokenKind::QuotedIdentifier
        ) {
            let ident = self.parse_identifier()?;
            let span = self.tree.span(ident);
            return Ok(Some(self.tree.add(
                NodeKind::Alias { explicit: false },
                span,
                vec![ident],
            )));
        }
        Ok(None)
    }

    // --- Statements ---

    fn parse_statement(&mut self) -> Result<NodeId> {
        match self.peek().kind {
            TokenKind::Keyword(Keyword::Select | Keyword::With) | TokenKind::LeftParen => {
                let query = self.parse_query()?;
                let span = self.tree.span(query);
                Ok(self.tree.add(NodeKind::QueryStatement, span, vec![query]))
            }
            TokenKind::Keyword(Keyword::Create) => self.parse_create(),
            TokenKind::Keyword(Keyword::Import) => self.parse_import(),
            _ => Err(self.error_here("statement")),
        }
    }

    fn parse_create(&mut self) -> Result<NodeId> {
        let start = self.expect_keyword(Keyword::Create)?.span.start;
        if self.eat_keyword(Keyword::Or).is_some() {
            self.expect_keyword(Keyword::Replace)?;
        }
        for scope in [
            Keyword::Temp,
            Keyword::Temporary,
            Keyword::Public,
            Keyword::Private,
        ] {
            if self.eat_keyword(scope).is_some() {
                break;
            }
        }

        match self.peek().kind {
            TokenKind::Keyword(Keyword::Table)
                if self.peek_at(1).kind == TokenKind::Keyword(Keyword::Function) =>
            {
                self.advance();
                self.advance();
                self.parse_create_table_function(start)
            }
            TokenKind::Keyword(Keyword::Table) => {
                self.advance();
                self.parse_create_table(start)
            }
            TokenKind::Keyword(Keyword::Function) => {
                self.advance();
                self.parse_create_function(start)
            }
            TokenKind::Keyword(Keyword::Constant) => {
                self.advance();
                self.parse_create_constant(start)
            }
            TokenKind::Keyword(Keyword::View) => {
                self.advance();
                self.parse_create_view(start)
            }
            _ => Err(self.error_here("keyword TABLE, FUNCTION, CONSTANT or VIEW")),
        }
    }

    fn parse_create_table(&mut self, start: usize) -> Result<NodeId> {
        self.eat_if_not_exists()?;
        let mut children = vec![self.parse_path()?];
        if self.at(TokenKind::LeftParen) {
            children.push(self.parse_table_elements()?);
        }
        self.skip_options()?;
        if self.eat_keyword(Keyword::As).is_some() {
            children.push(self.parse_query()?);
        }
        let span = Span::new(start, self.prev_end());
        Ok(self
            .tree
            .add(NodeKind::CreateTableStatement, span, children))
    }

    fn parse_table_elements(&mut self) -> Result<NodeId> {
        let start = self.expect(TokenKind::LeftParen, "\"(\"")?.span.start;
        let mut columns = Vec::new();
        loop {
            let column_start = self.peek().span.start;
            let name = self.parse_identifier()?;
            let ty = self.parse_type()?;
            if self.eat_keyword(Keyword::Not).is_some() {
                self.expect_keyword(Keyword::Null)?;
            }
            self.skip_options()?;
            let span = Span::new(column_start, self.prev_end());
            columns.push(
                self.tree
                    .add(NodeKind::ColumnDefinition, span, vec![name, ty]),
            );
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RightParen, "\")\"")?;
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::TableElementList, span, columns))
    }

    fn parse_create_function(&mut self, start: usize) -> Result<NodeId> {
        self.eat_if_not_exists()?;
        let mut children = vec![self.parse_function_declaration()?];
        loop {
            if self.eat_keyword(Keyword::Returns).is_some() {
                children.push(self.parse_type()?);
            } else if self.eat_keyword(Keyword::Language).is_some() {
                self.parse_identifier()?;
            } else if self.at_keyword(Keyword::Options) {
                self.skip_options()?;
            } else if self.eat_keyword(Keyword::As).is_some() {
                if self.eat(TokenKind::String).is_none() {
                    let open = self.expect(TokenKind::LeftParen, "\"(\"")?.span.start;
                    let (body, _) = self.parse_expr()?;
                    self.expect(TokenKind::RightParen, "\")\"")?;
                    let span = Span::new(open, self.prev_end());
                    children.push(self.tree.add(NodeKind::SqlFunctionBody, span, vec![body]));
                }
            } else {
                break;
            }
        }
        let span = Span::new(start, self.prev_end());
        Ok(self
            .tree
            .add(NodeKind::CreateFunctionStatement, span, children))
    }

    fn parse_create_table_function(&mut self, start: usize) -> Result<NodeId> {
        self.eat_if_not_exists()?;
        let mut children = vec![self.parse_function_declaration()?];
        if self.eat_keyword(Keyword::Returns).is_some() {
            children.push(self.parse_type()?);
        }
        self.skip_options()?;
        self.expect_keyword(Keyword::As)?;
        children.push(self.parse_query()?);
        let span = Span::new(start, self.prev_end());
        Ok(self
            .tree
            .add(NodeKind::CreateTableFunctionStatement, span, children))
    }

    fn parse_create_constant(&mut self, start: usize) -> Result<NodeId> {
        self.eat_if_not_exists()?;
        let name = self.parse_path()?;
        self.expect(TokenKind::Eq, "\"=\"")?;
        let (value, _) = self.parse_expr()?;
        let span = Span::new(start, self.prev_end());
        Ok(self
            .tree
            .add(NodeKind::CreateConstantStatement, span, vec![name, value]))
    }

    fn parse_create_view(&mut self, start: usize) -> Result<NodeId> {
        self.eat_if_not_exists()?;
        let name = self.parse_path()?;
        self.skip_options()?;
        self.expect_keyword(Keyword::As)?;
        let query = self.parse_query()?;
        let span = Span::new(start, self.prev_end());
        Ok(self
            .tree
            .add(NodeKind::CreateViewStatement, span, vec![name, query]))
    }

    fn parse_function_declaration(&mut self) -> Result<NodeId> {
        let start = self.peek().span.start;
        let name = self.parse_path()?;
        let params = self.parse_function_parameters()?;
        let span = Span::new(start, self.prev_end());
        Ok(self
            .tree
            .add(NodeKind::FunctionDeclaration, span, vec![name, params]))
    }

    fn parse_function_parameters(&mut self) -> Result<NodeId> {
        let start = self.expect(TokenKind::LeftParen, "\"(\"")?.span.start;
        let mut params = Vec::new();
        if !self.at(TokenKind::RightParen) {
            loop {
                let param_start = self.peek().span.start;
                let name = self.parse_identifier()?;
                let ty = self.parse_type()?;
                let span = Span::new(param_start, self.prev_end());
                params.push(
                    self.tree
                        .add(NodeKind::FunctionParameter, span, vec![name, ty]),
                );
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "\")\"")?;
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::FunctionParameters, span, params))
    }

    fn parse_import(&mut self) -> Result<NodeId> {
        let start = self.expect_keyword(Keyword::Import)?.span.start;
        let mut children = Vec::new();
        if self.eat_keyword(Keyword::Module).is_some() {
            children.push(self.parse_path()?);
            if let Some(alias) = self.parse_optional_alias()? {
                children.push(alias);
            }
        } else if self.eat_keyword(Keyword::Proto).is_some() {
            let file = self.expect(TokenKind::String, "string literal")?;
            children.push(self.tree.leaf(NodeKind::StringLiteral, file.span));
            if let Some(into) = self.eat_keyword(Keyword::Into) {
                let ident = self.parse_identifier()?;
                let span = Span::new(into.span.start, self.prev_end());
                children.push(self.tree.add(NodeKind::IntoAlias, span, vec![ident]));
            }
        } else {
            return Err(self.error_here("keyword MODULE or PROTO"));
        }
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::ImportStatement, span, children))
    }

    // --- Types ---

    fn parse_type(&mut self) -> Result<NodeId> {
        let token = self.peek();
        let start = token.span.start;
        match token.kind {
            TokenKind::Keyword(Keyword::Array) => {
                self.advance();
                self.expect(TokenKind::Lt, "\"<\"")?;
                let element = self.parse_type()?;
                self.expect_type_close()?;
                let span = Span::new(start, self.prev_end());
                Ok(self.tree.add(NodeKind::ArrayType, span, vec![element]))
            }
            TokenKind::Keyword(Keyword::Struct) => {
                self.advance();
                let fields = self.parse_type_fields(NodeKind::StructField)?;
                let span = Span::new(start, self.prev_end());
                Ok(self.tree.add(NodeKind::StructType, span, fields))
            }
            TokenKind::Keyword(Keyword::Table) if self.peek_at(1).kind == TokenKind::Lt => {
                self.advance();
                let columns = self.parse_type_fields(NodeKind::TvfSchemaColumn)?;
                let span = Span::new(start, self.prev_end());
                Ok(self.tree.add(NodeKind::TvfSchema, span, columns))
            }
            TokenKind::Keyword(Keyword::Any) => {
                self.advance();
                if !self.at_identifier() {
                    return Err(self.error_here("keyword TYPE or TABLE"));
                }
                self.advance();
                let span = Span::new(start, self.prev_end());
                Ok(self.tree.leaf(NodeKind::TemplatedType, span))
            }
            _ if self.at_identifier() => {
                let path = self.parse_path()?;
                if self.at(TokenKind::LeftParen) {
                    self.skip_parenthesized()?;
                }
                let span = Span::new(start, self.prev_end());
                Ok(self.tree.add(NodeKind::SimpleType, span, vec![path]))
            }
            _ => Err(self.error_here("type")),
        }
    }

    /// Parses `<[name] type, ...>` for STRUCT and TABLE types.
    fn parse_type_fields(&mut self, field_kind: NodeKind) -> Result<Vec<NodeId>> {
        self.expect(TokenKind::Lt, "\"<\"")?;
        let mut fields = Vec::new();
        if self.at(TokenKind::Gt) || self.at(TokenKind::ShiftRight) {
            self.expect_type_close()?;
            return Ok(fields);
        }
        loop {
            let start = self.peek().span.start;
            let mut children = Vec::new();
            let named = self.at_identifier()
                && (is_identifier_like(self.peek_at(1).kind)
                    || matches!(
                        self.peek_at(1).kind,
                        TokenKind::Keyword(Keyword::Array | Keyword::Struct | Keyword::Any)
                    ));
            if named {
                children.push(self.parse_identifier()?);
            }
            children.push(self.parse_type()?);
            let span = Span::new(start, self.prev_end());
            fields.push(self.tree.add(field_kind, span, children));
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect_type_close()?;
        Ok(fields)
    }

    /// Consumes a closing `>`, splitting a `>>` token in two.
    fn expect_type_close(&mut self) -> Result<()> {
        let token = self.peek();
        match token.kind {
            TokenKind::Gt => {
                self.advance();
                Ok(())
            }
            TokenKind::ShiftRight => {
                self.tokens[self.pos] = Token::new(
                    TokenKind::Gt,
                    Span::new(token.span.start + 1, token.span.end),
                );
                Ok(())
            }
            _ => Err(self.error_here("\">\"")),
        }
    }

    // --- Queries ---

    fn parse_query(&mut self) -> Result<NodeId> {
        let start = self.peek().span.start;
        let mut children = Vec::new();
        if self.at_keyword(Keyword::With) {
            children.push(self.parse_with_clause()?);
        }
        children.push(self.parse_set_operation()?);
        if self.at_keyword(Keyword::Order) {
            children.push(self.parse_order_by()?);
        }
        if self.at_keyword(Keyword::Limit) {
            children.push(self.parse_limit()?);
        }
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::Query, span, children))
    }

    fn parse_with_clause(&mut self) -> Result<NodeId> {
        let start = self.expect_keyword(Keyword::With)?.span.start;
        self.eat_keyword(Keyword::Recursive);
        let mut entries = Vec::new();
        loop {
            let entry_start = self.peek().span.start;
            let name = self.parse_identifier()?;
            self.expect_keyword(Keyword::As)?;
            self.expect(TokenKind::LeftParen, "\"(\"")?;
            let query = self.parse_query()?;
            self.expect(TokenKind::RightParen, "\")\"")?;
            let span = Span::new(entry_start, self.prev_end());
            entries.push(
                self.tree
                    .add(NodeKind::WithClauseEntry, span, vec![name, query]),
            );
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::WithClause, span, entries))
    }

    fn at_set_operator(&self) -> bool {
        match self.peek().kind {
            TokenKind::Keyword(Keyword::Union | Keyword::Intersect) => true,
            TokenKind::Keyword(Keyword::Except) => matches!(
                self.peek_at(1).kind,
                TokenKind::Keyword(Keyword::All | Keyword::Distinct)
            ),
            _ => false,
        }
    }

    fn parse_set_operation(&mut self) -> Result<NodeId> {
        let start = self.peek().span.start;
        let first = self.parse_query_primary()?;
        if !self.at_set_operator() {
            return Ok(first);
        }
        let mut children = vec![first];
        while self.at_set_operator() {
            self.advance();
            if self.eat_keyword(Keyword::All).is_none() {
                self.eat_keyword(Keyword::Distinct);
            }
            children.push(self.parse_query_primary()?);
        }
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::SetOperation, span, children))
    }

    fn parse_query_primary(&mut self) -> Result<NodeId> {
        if self.eat(TokenKind::LeftParen).is_some() {
            let query = self.parse_query()?;
            self.expect(TokenKind::RightParen, "\")\"")?;
            return Ok(query);
        }
        if self.at_keyword(Keyword::Select) {
            return self.parse_select();
        }
        Err(self.error_here("keyword SELECT"))
    }

    fn parse_select(&mut self) -> Result<NodeId> {
        let start = self.expect_keyword(Keyword::Select)?.span.start;
        if self.eat_keyword(Keyword::All).is_none() {
            self.eat_keyword(Keyword::Distinct);
        }
        if self.eat_keyword(Keyword::As).is_some() {
            // AS STRUCT / AS VALUE
            self.advance();
        }

        let mut children = vec![self.parse_select_list()?];
        if self.at_keyword(Keyword::From) {
            children.push(self.parse_from_clause()?);
        }
        if let Some(token) = self.eat_keyword(Keyword::Where) {
            let (condition, _) = self.parse_expr()?;
            let span = Span::new(token.span.start, self.prev_end());
            children.push(self.tree.add(NodeKind::WhereClause, span, vec![condition]));
        }
        if let Some(token) = self.eat_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            let items = if self.eat_keyword(Keyword::Rollup).is_some() {
                self.expect(TokenKind::LeftParen, "\"(\"")?;
                let items = self.parse_expr_list()?;
                self.expect(TokenKind::RightParen, "\")\"")?;
                items
            } else {
                self.parse_expr_list()?
            };
            let span = Span::new(token.span.start, self.prev_end());
            children.push(self.tree.add(NodeKind::GroupBy, span, items));
        }
        if let Some(token) = self.eat_keyword(Keyword::Having) {
            let (condition, _) = self.parse_expr()?;
            let span = Span::new(token.span.start, self.prev_end());
            children.push(self.tree.add(NodeKind::Having, span, vec![condition]));
        }
        if self.at_keyword(Keyword::Window) {
            children.push(self.parse_window_clause()?);
        }

        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::Select, span, children))
    }

    fn parse_select_list(&mut self) -> Result<NodeId> {
        let start = self.peek().span.start;
        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_select_column()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::SelectList, span, columns))
    }

    fn parse_select_column(&mut self) -> Result<NodeId> {
        let start = self.peek().span.start;
        if let Some(star) = self.eat(TokenKind::Star) {
            let star = self.tree.leaf(NodeKind::Star, star.span);
            self.skip_star_modifiers()?;
            let span = Span::new(start, self.prev_end());
            return Ok(self.tree.add(NodeKind::SelectColumn, span, vec![star]));
        }

        let (mut expr, _) = self.parse_expr()?;
        if self.at(TokenKind::Dot) && self.peek_at(1).kind == TokenKind::Star {
            self.advance();
            self.advance();
            let span = Span::new(start, self.prev_end());
            expr = self.tree.add(NodeKind::DotStar, span, vec![expr]);
            self.skip_star_modifiers()?;
        }
        let mut children = vec![expr];
        if let Some(alias) = self.parse_optional_alias()? {
            children.push(alias);
        }
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::SelectColumn, span, children))
    }

    /// Skips `EXCEPT (...)` / `REPLACE (...)` after a star.
    fn skip_star_modifiers(&mut self) -> Result<()> {
        while matches!(
            self.peek().kind,
            TokenKind::Keyword(Keyword::Except | Keyword::Replace)
        ) && self.peek_at(1).kind == TokenKind::LeftParen
        {
            self.advance();
            self.skip_parenthesized()?;
        }
        Ok(())
    }

    fn parse_from_clause(&mut self) -> Result<NodeId> {
        let start = self.expect_keyword(Keyword::From)?.span.start;
        let items = self.parse_join_tree()?;
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::FromClause, span, vec![items]))
    }

    /// Parses a left-deep chain of joined from-items.
    fn parse_join_tree(&mut self) -> Result<NodeId> {
        let start = self.peek().span.start;
        let mut lhs = self.parse_from_item()?;
        while let Some(join_type) = self.eat_join_operator()? {
            let rhs = self.parse_from_item()?;
            let mut children = vec![lhs, rhs];
            if let Some(on) = self.eat_keyword(Keyword::On) {
                let (condition, _) = self.parse_expr()?;
                let span = Span::new(on.span.start, self.prev_end());
                children.push(self.tree.add(NodeKind::OnClause, span, vec![condition]));
            } else if let Some(using) = self.eat_keyword(Keyword::Using) {
                self.expect(TokenKind::LeftParen, "\"(\"")?;
                let mut columns = Vec::new();
                loop {
                    columns.push(self.parse_identifier()?);
                    if self.eat(TokenKind::Comma).is_none() {
                        break;
                    }
                }
                self.expect(TokenKind::RightParen, "\")\"")?;
                let span = Span::new(using.span.start, self.prev_end());
                children.push(self.tree.add(NodeKind::UsingClause, span, columns));
            }
            let span = Span::new(start, self.prev_end());
            lhs = self.tree.add(NodeKind::Join { join_type }, span, children);
        }
        Ok(lhs)
    }

    /// Consumes a join operator. The outer `Option` is `None` when there is
    /// no join; the inner one is `None` for a bare `JOIN`.
    fn eat_join_operator(&mut self) -> Result<Option<Option<JoinType>>> {
        let join_type = match self.peek().kind {
            TokenKind::Comma => {
                self.advance();
                return Ok(Some(Some(JoinType::Comma)));
            }
            TokenKind::Keyword(Keyword::Join) => None,
            TokenKind::Keyword(Keyword::Inner) => Some(JoinType::Inner),
            TokenKind::Keyword(Keyword::Cross) => Some(JoinType::Cross),
            TokenKind::Keyword(Keyword::Left) => Some(JoinType::Left),
            TokenKind::Keyword(Keyword::Right) => Some(JoinType::Right),
            TokenKind::Keyword(Keyword::Full) => Some(JoinType::Full),
            _ => return Ok(None),
        };
        if join_type.is_some() {
            self.advance();
            self.eat_keyword(Keyword::Outer);
        }
        self.expect_keyword(Keyword::Join)?;
        Ok(Some(join_type))
    }

    fn parse_from_item(&mut self) -> Result<NodeId> {
        let start = self.peek().span.start;
        match self.peek().kind {
            TokenKind::LeftParen
                if matches!(
                    self.peek_at(1).kind,
                    TokenKind::Keyword(Keyword::Select | Keyword::With)
                ) =>
            {
                self.advance();
                let mut children = vec![self.parse_query()?];
                self.expect(TokenKind::RightParen, "\")\"")?;
                if let Some(alias) = self.parse_optional_alias()? {
                    children.push(alias);
                }
                let span = Span::new(start, self.prev_end());
                Ok(self.tree.add(NodeKind::TableSubquery, span, children))
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_join_tree()?;
                self.expect(TokenKind::RightParen, "\")\"")?;
                Ok(inner)
            }
            TokenKind::Keyword(Keyword::Unnest) => {
                self.advance();
                self.expect(TokenKind::LeftParen, "\"(\"")?;
                let (array, _) = self.parse_expr()?;
                self.expect(TokenKind::RightParen, "\")\"")?;
                let mut children = vec![array];
                if let Some(alias) = self.parse_optional_alias()? {
                    children.push(alias);
                }
                if self.at_keyword(Keyword::With)
                    && self.peek_at(1).kind == TokenKind::Keyword(Keyword::Offset)
                {
                    self.advance();
                    self.advance();
                    if let Some(alias) = self.parse_optional_alias()? {
                        children.push(alias);
                    }
                }
                let span = Span::new(start, self.prev_end());
                Ok(self.tree.add(NodeKind::UnnestExpression, span, children))
            }
            _ => {
                let mut children = vec![self.parse_path()?];
                if let Some(alias) = self.parse_optional_alias()? {
                    children.push(alias);
                }
                let span = Span::new(start, self.prev_end());
                Ok(self
                    .tree
                    .add(NodeKind::TablePathExpression, span, children))
            }
        }
    }

    fn parse_order_by(&mut self) -> Result<NodeId> {
        let start = self.expect_keyword(Keyword::Order)?.span.start;
        self.expect_keyword(Keyword::By)?;
        let mut items = Vec::new();
        loop {
            let item_start = self.peek().span.start;
            let (expr, _) = self.parse_expr()?;
            if self.eat_keyword(Keyword::Asc).is_none() {
                self.eat_keyword(Keyword::Desc);
            }
            if self.eat_keyword(Keyword::Nulls).is_some() {
                // FIRST / LAST
                self.parse_identifier()?;
            }
            let span = Span::new(item_start, self.prev_end());
            items.push(
                self.tree
                    .add(NodeKind::OrderingExpression, span, vec![expr]),
            );
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::OrderBy, span, items))
    }

    fn parse_limit(&mut self) -> Result<NodeId> {
        let start = self.expect_keyword(Keyword::Limit)?.span.start;
        let (count, _) = self.parse_expr()?;
        let mut children = vec![count];
        if self.eat_keyword(Keyword::Offset).is_some() {
            children.push(self.parse_expr()?.0);
        }
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::Limit, span, children))
    }

    // --- Windows ---

    fn parse_window_clause(&mut self) -> Result<NodeId> {
        let start = self.expect_keyword(Keyword::Window)?.span.start;
        let mut definitions = Vec::new();
        loop {
            let def_start = self.peek().span.start;
            let name = self.parse_identifier()?;
            self.expect_keyword(Keyword::As)?;
            let spec = self.parse_window_specification()?;
            let span = Span::new(def_start, self.prev_end());
            definitions.push(
                self.tree
                    .add(NodeKind::WindowDefinition, span, vec![name, spec]),
            );
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::WindowClause, span, definitions))
    }

    /// Parses a window name or a parenthesized window specification.
    fn parse_window_specification(&mut self) -> Result<NodeId> {
        let start = self.peek().span.start;
        if self.at_identifier() {
            let name = self.parse_identifier()?;
            let span = self.tree.span(name);
            return Ok(self
                .tree
                .add(NodeKind::WindowSpecification, span, vec![name]));
        }

        self.expect(TokenKind::LeftParen, "\"(\"")?;
        let mut children = Vec::new();
        if self.at_identifier() {
            children.push(self.parse_identifier()?);
        }
        if let Some(token) = self.eat_keyword(Keyword::Partition) {
            self.expect_keyword(Keyword::By)?;
            let items = self.parse_expr_list()?;
            let span = Span::new(token.span.start, self.prev_end());
            children.push(self.tree.add(NodeKind::PartitionBy, span, items));
        }
        if self.at_keyword(Keyword::Order) {
            children.push(self.parse_order_by()?);
        }
        if self.at_keyword(Keyword::Rows) || self.at_keyword(Keyword::Range) {
            children.push(self.parse_window_frame()?);
        }
        self.expect(TokenKind::RightParen, "\")\"")?;
        let span = Span::new(start, self.prev_end());
        Ok(self
            .tree
            .add(NodeKind::WindowSpecification, span, children))
    }

    fn parse_window_frame(&mut self) -> Result<NodeId> {
        let start = self.advance().span.start;
        let mut children = Vec::new();
        if self.eat_keyword(Keyword::Between).is_some() {
            children.extend(self.parse_frame_bound()?);
            self.expect_keyword(Keyword::And)?;
            children.extend(self.parse_frame_bound()?);
        } else {
            children.extend(self.parse_frame_bound()?);
        }
        let span = Span::new(start, self.prev_end());
        Ok(self.tree.add(NodeKind::WindowFrame, span, children))
    }

    fn parse_frame_bound(&mut self) -> Result<Option<NodeId>> {
        if self.eat_keyword(Keyword::Unbounded).is_some() {
            self.eat_frame_direction()?;
            return Ok(None);
        }
        if self.eat_keyword(Keyword::Current).is_some() {
            // ROW
            self.parse_identifier()?;
            return Ok(None);
        }
        let (offset, _) = self.parse_binary(0)?;
        self.eat_frame_direction()?;
        Ok(Some(offset))
    }

    fn eat_frame_direction(&mut self) -> Result<()> {
        if self.eat_keyword(Keyword::Preceding).is_none()
            && self.eat_keyword(Keyword::Following).is_none()
        {
            return Err(self.error_here("keyword PRECEDING or FOLLOWING"));
        }
        Ok(())
    }

    // --- Expressions ---

    fn parse_expr_list(&mut self) -> Result<Vec<NodeId>> {
        let mut items = Vec::new();
        loop {
            items.push(self.parse_expr()?.0);
            if self.eat(TokenKind::Comma).is_none() {
                return Ok(items);
            }
        }
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_logical(Keyword::Or, NodeKind::OrExpr, Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        self.parse_logical(Keyword::And, NodeKind::AndExpr, Self::parse_not)
    }

    /// Parses an n-ary chain of `operand (keyword operand)*`.
    fn parse_logical(
        &mut self,
        keyword: Keyword,
        kind: NodeKind,
        operand: fn(&mut Self) -> Result<Expr>,
    ) -> Result<Expr> {
        let first = operand(self)?;
        if !self.at_keyword(keyword) {
            return Ok(first);
        }
        let mut children = vec![first.0];
        let mut span = first.1;
        while self.eat_keyword(keyword).is_some() {
            let (next, next_span) = operand(self)?;
            children.push(next);
            span = span.merge(next_span);
        }
        Ok((self.tree.add(kind, span, children), span))
    }

    fn parse_not(&mut self) -> Result<Expr> {
        if let Some(not) = self.eat_keyword(Keyword::Not) {
            let (operand, operand_span) = self.parse_not()?;
            let span = Span::new(not.span.start, operand_span.end);
            return Ok((self.tree.add(NodeKind::NotExpr, span, vec![operand]), span));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let lhs = self.parse_binary(0)?;
        let negated = self.at_keyword(Keyword::Not)
            && matches!(
                self.peek_at(1).kind,
                TokenKind::Keyword(Keyword::Like | Keyword::In | Keyword::Between)
            );
        if negated {
            self.advance();
        }

        let op = match self.peek().kind {
            TokenKind::Eq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::Keyword(Keyword::Like) if negated => BinaryOp::NotLike,
            TokenKind::Keyword(Keyword::Like) => BinaryOp::Like,
            TokenKind::Keyword(Keyword::In) => return self.parse_in(lhs),
            TokenKind::Keyword(Keyword::Between) => return self.parse_between(lhs),
            TokenKind::Keyword(Keyword::Is) => return self.parse_is(lhs),
            _ => return Ok(lhs),
        };
        self.advance();
        let rhs = self.parse_binary(0)?;
        let span = lhs.1.merge(rhs.1);
        Ok((
            self.tree
                .add(NodeKind::BinaryExpression(op), span, vec![lhs.0, rhs.0]),
            span,
        ))
    }

    fn parse_in(&mut self, lhs: Expr) -> Result<Expr> {
        self.expect_keyword(Keyword::In)?;
        let rhs = if self.at(TokenKind::LeftParen)
            && matches!(
                self.peek_at(1).kind,
                TokenKind::Keyword(Keyword::Select | Keyword::With)
            ) {
            self.parse_primary()?.0
        } else if self.at_keyword(Keyword::Unnest) {
            let start = self.advance().span.start;
            self.expect(TokenKind::LeftParen, "\"(\"")?;
            let (array, _) = self.parse_expr()?;
            self.expect(TokenKind::RightParen, "\")\"")?;
            let span = Span::new(start, self.prev_end());
            self.tree
                .add(NodeKind::UnnestExpression, span, vec![array])
        } else {
            let start = self.expect(TokenKind::LeftParen, "\"(\"")?.span.start;
            let items = self.parse_expr_list()?;
            self.expect(TokenKind::RightParen, "\")\"")?;
            let span = Span::new(start, self.prev_end());
            self.tree.add(NodeKind::InList, span, items)
        };
        let span = Span::new(lhs.1.start, self.prev_end());
        Ok((
            self.tree
                .add(NodeKind::InExpression, span, vec![lhs.0, rhs]),
            span,
        ))
    }

    fn parse_between(&mut self, lhs: Expr) -> Result<Expr> {
        self.expect_keyword(Keyword::Between)?;
        let (low, _) = self.parse_binary(0)?;
        self.expect_keyword(Keyword::And)?;
        let (high, high_span) = self.parse_binary(0)?;
        let span = Span::new(lhs.1.start, high_span.end);
        Ok((
            self.tree
                .add(NodeKind::BetweenExpression, span, vec![lhs.0, low, high]),
            span,
        ))
    }

    fn parse_is(&mut self, lhs: Expr) -> Result<Expr> {
        self.expect_keyword(Keyword::Is)?;
        self.eat_keyword(Keyword::Not);
        let token = self.peek();
        let kind = match token.kind {
            TokenKind::Keyword(Keyword::Null) => NodeKind::NullLiteral,
            TokenKind::Keyword(Keyword::True | Keyword::False) => NodeKind::BooleanLiteral,
            _ => return Err(self.error_here("keyword NULL, TRUE or FALSE")),
        };
        self.advance();
        let literal = self.tree.leaf(kind, token.span);
        let span = Span::new(lhs.1.start, token.span.end);
        Ok((
            self.tree
                .add(NodeKind::IsExpression, span, vec![lhs.0, literal]),
            span,
        ))
    }

    fn parse_binary(&mut self, level: usize) -> Result<Expr> {
        let Some(ops) = BINARY_LEVELS.get(level) else {
            return self.parse_unary();
        };
        let mut lhs = self.parse_binary(level + 1)?;
        loop {
            let kind = self.peek().kind;
            let Some(&(_, op)) = ops.iter().find(|(token, _)| *token == kind) else {
                return Ok(lhs);
            };
            self.advance();
            let rhs = self.parse_binary(level + 1)?;
            let span = lhs.1.merge(rhs.1);
            lhs = (
                self.tree
                    .add(NodeKind::BinaryExpression(op), span, vec![lhs.0, rhs.0]),
                span,
            );
        }
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if matches!(
            self.peek().kind,
            TokenKind::Minus | TokenKind::Plus | TokenKind::BitNot
        ) {
            let start = self.advance().span.start;
            let (operand, operand_span) = self.parse_unary()?;
            let span = Span::new(start, operand_span.end);
            return Ok((
                self.tree
                    .add(NodeKind::UnaryExpression, span, vec![operand]),
                span,
            ));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(TokenKind::LeftBracket).is_some() {
                let (index, _) = self.parse_expr()?;
                self.expect(TokenKind::RightBracket, "\"]\"")?;
                let span = Span::new(expr.1.start, self.prev_end());
                expr = (
                    self.tree
                        .add(NodeKind::ArrayElement, span, vec![expr.0, index]),
                    span,
                );
            } else if self.at(TokenKind::Dot) && is_path_continuation(self.peek_at(1).kind) {
                self.advance();
                let field = self.advance();
                let field = self.tree.leaf(NodeKind::Identifier, field.span);
                let span = Span::new(expr.1.start, self.prev_end());
                expr = (
                    self.tree
                        .add(NodeKind::DotIdentifier, span, vec![expr.0, field]),
                    span,
                );
            } else {
                return Ok(expr);
            }
        }
    }

    fn leaf_expr(&mut self, kind: NodeKind) -> Expr {
        let token = self.advance();
        (self.tree.leaf(kind, token.span), token.span)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.peek();
        let start = token.span.start;
        match token.kind {
            TokenKind::Integer => Ok(self.leaf_expr(NodeKind::IntLiteral)),
            TokenKind::Float => Ok(self.leaf_expr(NodeKind::FloatLiteral)),
            TokenKind::String => Ok(self.leaf_expr(NodeKind::StringLiteral)),
            TokenKind::Keyword(Keyword::True | Keyword::False) => {
                Ok(self.leaf_expr(NodeKind::BooleanLiteral))
            }
            TokenKind::Keyword(Keyword::Null) => Ok(self.leaf_expr(NodeKind::NullLiteral)),
            TokenKind::Question => Ok(self.leaf_expr(NodeKind::Parameter)),
            TokenKind::At => {
                self.advance();
                self.eat(TokenKind::At);
                if !is_path_continuation(self.peek().kind) {
                    return Err(self.error_here("identifier"));
                }
                self.advance();
                let span = Span::new(start, self.prev_end());
                Ok((self.tree.leaf(NodeKind::Parameter, span), span))
            }
            TokenKind::LeftParen
                if matches!(
                    self.peek_at(1).kind,
                    TokenKind::Keyword(Keyword::Select | Keyword::With)
                ) =>
            {
                self.advance();
                let query = self.parse_query()?;
                self.expect(TokenKind::RightParen, "\")\"")?;
                let span = Span::new(start, self.prev_end());
                Ok((
                    self.tree
                        .add(NodeKind::ExpressionSubquery, span, vec![query]),
                    span,
                ))
            }
            TokenKind::LeftParen => {
                self.advance();
                let (inner, _) = self.parse_expr()?;
                self.expect(TokenKind::RightParen, "\")\"")?;
                Ok((inner, Span::new(start, self.prev_end())))
            }
            TokenKind::LeftBracket => self.parse_array_literal(start),
            TokenKind::Keyword(Keyword::Array) => {
                self.advance();
                if self.eat(TokenKind::Lt).is_some() {
                    self.parse_type()?;
                    self.expect_type_close()?;
                }
                if self.at(TokenKind::LeftParen) {
                    let (subquery, _) = self.parse_primary()?;
                    let span = Span::new(start, self.prev_end());
                    return Ok((
                        self.tree
                            .add(NodeKind::ArrayConstructor, span, vec![subquery]),
                        span,
                    ));
                }
                self.parse_array_literal(start)
            }
            TokenKind::Keyword(Keyword::Struct) => {
                self.advance();
                if self.at(TokenKind::Lt) {
                    self.parse_type_fields(NodeKind::StructField)?;
                }
                self.parse_call(None, start)
            }
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Cast) => {
                self.advance();
                self.expect(TokenKind::LeftParen, "\"(\"")?;
                let (value, _) = self.parse_expr()?;
                self.expect_keyword(Keyword::As)?;
                let ty = self.parse_type()?;
                self.expect(TokenKind::RightParen, "\")\"")?;
                let span = Span::new(start, self.prev_end());
                Ok((
                    self.tree
                        .add(NodeKind::CastExpression, span, vec![value, ty]),
                    span,
                ))
            }
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance();
                self.expect(TokenKind::LeftParen, "\"(\"")?;
                let query = self.parse_query()?;
                self.expect(TokenKind::RightParen, "\")\"")?;
                let span = Span::new(start, self.prev_end());
                Ok((
                    self.tree
                        .add(NodeKind::ExpressionSubquery, span, vec![query]),
                    span,
                ))
            }
            TokenKind::Keyword(Keyword::Interval) => {
                self.advance();
                let (value, _) = self.parse_binary(0)?;
                // date part
                self.parse_identifier()?;
                let span = Span::new(start, self.prev_end());
                Ok((
                    self.tree
                        .add(NodeKind::UnaryExpression, span, vec![value]),
                    span,
                ))
            }
            TokenKind::Keyword(
                Keyword::If
                | Keyword::Left
                | Keyword::Right
                | Keyword::Grouping
                | Keyword::Extract,
            ) if self.peek_at(1).kind == TokenKind::LeftParen => {
                self.advance();
                self.parse_call(None, start)
            }
            TokenKind::Keyword(Keyword::Date | Keyword::Time | Keyword::Timestamp)
                if self.peek_at(1).kind == TokenKind::String =>
            {
                self.advance();
                self.advance();
                let span = Span::new(start, self.prev_end());
                Ok((self.tree.leaf(NodeKind::StringLiteral, span), span))
            }
            _ if self.at_identifier() => {
                let path = self.parse_path()?;
                if self.at(TokenKind::LeftParen) {
                    return self.parse_call(Some(path), start);
                }
                Ok((path, self.tree.span(path)))
            }
            _ => Err(self.error_here("expression")),
        }
    }

    fn parse_array_literal(&mut self, start: usize) -> Result<Expr> {
        self.expect(TokenKind::LeftBracket, "\"[\"")?;
        let items = if self.at(TokenKind::RightBracket) {
            Vec::new()
        } else {
            self.parse_expr_list()?
        };
        self.expect(TokenKind::RightBracket, "\"]\"")?;
        let span = Span::new(start, self.prev_end());
        Ok((
            self.tree.add(NodeKind::ArrayConstructor, span, items),
            span,
        ))
    }

    /// Parses an argument list and optional `OVER` clause after the name.
    fn parse_call(&mut self, name: Option<NodeId>, start: usize) -> Result<Expr> {
        self.expect(TokenKind::LeftParen, "\"(\"")?;
        let mut children: Vec<NodeId> = name.into_iter().collect();
        if !self.at(TokenKind::RightParen) {
            self.eat_keyword(Keyword::Distinct);
            if self.at(TokenKind::Star) && self.peek_at(1).kind == TokenKind::RightParen {
                let star = self.advance();
                children.push(self.tree.leaf(NodeKind::Star, star.span));
            } else {
                loop {
                    children.push(self.parse_expr()?.0);
                    if self.eat_keyword(Keyword::As).is_some() {
                        children.push(self.parse_type()?);
                    }
                    if self.eat(TokenKind::Comma).is_none()
                        && self.eat_keyword(Keyword::From).is_none()
                    {
                        break;
                    }
                }
            }
            if self.eat_keyword(Keyword::Ignore).is_some()
                || self.eat_keyword(Keyword::Respect).is_some()
            {
                self.expect_keyword(Keyword::Nulls)?;
            }
            if self.at_keyword(Keyword::Order) {
                children.push(self.parse_order_by()?);
            }
            if self.at_keyword(Keyword::Limit) {
                children.push(self.parse_limit()?);
            }
        }
        self.expect(TokenKind::RightParen, "\")\"")?;
        if self.eat_keyword(Keyword::Over).is_some() {
            children.push(self.parse_window_specification()?);
        }
        let span = Span::new(start, self.prev_end());
        Ok((self.tree.add(NodeKind::FunctionCall, span, children), span))
    }

    fn parse_case(&mut self) -> Result<Expr> {
        let start = self.expect_keyword(Keyword::Case)?.span.start;
        let mut children = Vec::new();
        if !self.at_keyword(Keyword::When) {
            children.push(self.parse_expr()?.0);
        }
        while self.eat_keyword(Keyword::When).is_some() {
            children.push(self.parse_expr()?.0);
            self.expect_keyword(Keyword::Then)?;
            children.push(self.parse_expr()?.0);
        }
        if self.eat_keyword(Keyword::Else).is_some() {
            children.push(self.parse_expr()?.0);
        }
        self.expect_keyword(Keyword::End)?;
        let span = Span::new(start, self.prev_end());
        Ok((self.tree.add(NodeKind::CaseExpression, span, children), span))
    }
}

impl Iterator for StatementParser<'_> {
    type Item = Result<ParseUnit>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_next()
    }
}

/// Bare or quoted identifiers, and keywords that are not reserved.
fn is_identifier_like(kind: TokenKind) -> bool {
    match kind {
        TokenKind::Identifier | TokenKind::QuotedIdentifier => true,
        TokenKind::Keyword(keyword) => !keyword.is_reserved(),
        _ => false,
    }
}

/// Tokens accepted after a `.` in a path.
fn is_path_continuation(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::Keyword(_)
    )
}

/// Parses every statement of `source`.
///
/// # Errors
///
/// Returns the first tokenizer or parser error.
pub fn parse_script(source: &str) -> Result<Vec<ParseUnit>> {
    StatementParser::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(sql: &str) -> ParseUnit {
        let mut units = parse_script(sql).expect("Failed to parse");
        assert_eq!(units.len(), 1, "expected one statement in {sql:?}");
        units.remove(0)
    }

    fn kinds(unit: &ParseUnit) -> Vec<NodeKind> {
        unit.walk().map(|n| n.kind()).collect()
    }

    fn texts_of<'s>(unit: &ParseUnit, sql: &'s str, kind: NodeKind) -> Vec<&'s str> {
        unit.walk()
            .filter(|n| n.kind() == kind)
            .map(|n| n.text(sql))
            .collect()
    }

    // --- Statement splitting ---

    #[test]
    fn test_multiple_statements() {
        let sql = "SELECT 1;\nSELECT 2;;  SELECT 3";
        let units = parse_script(sql).expect("Failed to parse");
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].span().slice(sql), "SELECT 1");
        assert_eq!(units[2].span().slice(sql), "SELECT 3");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_script("").expect("Failed to parse").is_empty());
        assert!(parse_script("-- only a comment\n").expect("Failed to parse").is_empty());
    }

    #[test]
    fn test_missing_semicolon_between_statements() {
        let err = parse_script("SELECT 3+5\nSELECT 4+6;").expect_err("should fail");
        assert_eq!(err.offset, 11);
        assert_eq!(
            err.message,
            "Syntax error: Expected \";\" but got keyword SELECT"
        );
    }

    #[test]
    fn test_parser_stops_after_error() {
        let mut parser = StatementParser::new("SELECT 1; SELECT FROM; SELECT 2;");
        assert!(parser.parse_next().expect("first").is_ok());
        assert!(parser.parse_next().expect("second").is_err());
        assert!(parser.parse_next().is_none());
    }

    #[test]
    fn test_lex_error_is_reported() {
        let err = parse_script("SELECT 'abc").expect_err("should fail");
        assert_eq!(err.offset, 7);
        assert_eq!(err.message, "Syntax error: Unclosed string literal");

        let mut parser = StatementParser::new("SELECT 1 $");
        assert!(parser.parse_next().expect("first").is_ok());
        let err = parser.parse_next().expect("second").expect_err("lex error");
        assert_eq!(err.offset, 9);
    }

    // --- Queries ---

    #[test]
    fn test_select_aliases() {
        let sql = "SELECT A B, c AS d FROM C D";
        let unit = parse_one(sql);
        let aliases: Vec<(bool, &str)> = unit
            .walk()
            .filter_map(|n| match n.kind() {
                NodeKind::Alias { explicit } => Some((explicit, n.text(sql))),
                _ => None,
            })
            .collect();
        assert_eq!(aliases, vec![(false, "B"), (true, "AS d"), (false, "D")]);
    }

    #[test]
    fn test_joins_are_left_deep() {
        let sql = "SELECT a FROM t JOIN x JOIN y LEFT OUTER JOIN z ON t.a = z.a, w";
        let unit = parse_one(sql);
        let joins: Vec<Option<JoinType>> = unit
            .walk()
            .filter_map(|n| match n.kind() {
                NodeKind::Join { join_type } => Some(join_type),
                _ => None,
            })
            .collect();
        assert_eq!(
            joins,
            vec![Some(JoinType::Comma), Some(JoinType::Left), None, None]
        );
        for join in unit.walk().filter(|n| matches!(n.kind(), NodeKind::Join { .. })) {
            assert_eq!(join.span().start, 14);
        }
    }

    #[test]
    fn test_and_or_are_flattened() {
        let sql = "SELECT 1 WHERE a AND b AND c OR d";
        let unit = parse_one(sql);
        let or = unit
            .walk()
            .find(|n| n.kind() == NodeKind::OrExpr)
            .expect("or node");
        assert_eq!(or.num_children(), 2);
        let and = or.child(0).expect("and node");
        assert_eq!(and.kind(), NodeKind::AndExpr);
        assert_eq!(and.num_children(), 3);
    }

    #[test]
    fn test_parenthesized_expression_span_excludes_parens() {
        let sql = "SELECT 1 WHERE a OR (b AND c)";
        let unit = parse_one(sql);
        assert_eq!(texts_of(&unit, sql, NodeKind::AndExpr), vec!["b AND c"]);
        assert_eq!(texts_of(&unit, sql, NodeKind::OrExpr), vec!["a OR (b AND c)"]);
    }

    #[test]
    fn test_window_clause() {
        let sql = "SELECT SUM(x) OVER w FROM t WINDOW MyWindow AS (PARTITION BY a ORDER BY b ROWS BETWEEN 1 PRECEDING AND CURRENT ROW)";
        let unit = parse_one(sql);
        let ks = kinds(&unit);
        assert!(ks.contains(&NodeKind::WindowClause));
        assert!(ks.contains(&NodeKind::PartitionBy));
        assert!(ks.contains(&NodeKind::WindowFrame));
        let def = unit
            .walk()
            .find(|n| n.kind() == NodeKind::WindowDefinition)
            .expect("window definition");
        assert_eq!(def.child(0).expect("name").text(sql), "MyWindow");
    }

    #[test]
    fn test_count_star_and_functions() {
        let sql = "SELECT COUNT(*), IF(a, 1, 2), CAST(x AS INT64), CASE WHEN a THEN b ELSE c END FROM t";
        let unit = parse_one(sql);
        assert_eq!(texts_of(&unit, sql, NodeKind::Star), vec!["*"]);
        assert_eq!(unit.walk().filter(|n| n.kind() == NodeKind::FunctionCall).count(), 2);
        assert!(kinds(&unit).contains(&NodeKind::CastExpression));
        assert!(kinds(&unit).contains(&NodeKind::CaseExpression));
    }

    #[test]
    fn test_with_and_set_operations() {
        let sql = "WITH q AS (SELECT 1) SELECT * FROM q UNION ALL SELECT 2 ORDER BY 1 LIMIT 5";
        let unit = parse_one(sql);
        let ks = kinds(&unit);
        assert!(ks.contains(&NodeKind::WithClauseEntry));
        assert!(ks.contains(&NodeKind::SetOperation));
        assert!(ks.contains(&NodeKind::OrderBy));
        assert!(ks.contains(&NodeKind::Limit));
    }

    #[test]
    fn test_non_reserved_keywords_as_identifiers() {
        let sql = "SELECT Date, Type, Table.column1";
        let unit = parse_one(sql);
        assert_eq!(
            texts_of(&unit, sql, NodeKind::Identifier),
            vec!["Date", "Type", "Table", "column1"]
        );
    }

    // --- DDL ---

    #[test]
    fn test_create_table() {
        let sql = "CREATE OR REPLACE TABLE my.Table1 (col_a INT64, b ARRAY<STRUCT<x STRING>>) AS SELECT 1";
        let unit = parse_one(sql);
        assert_eq!(unit.root().kind(), NodeKind::CreateTableStatement);
        let ks = kinds(&unit);
        assert!(ks.contains(&NodeKind::TableElementList));
        assert!(ks.contains(&NodeKind::ArrayType));
        assert!(ks.contains(&NodeKind::StructField));
        assert_eq!(
            texts_of(&unit, sql, NodeKind::SimpleType),
            vec!["INT64", "STRING"]
        );
    }

    #[test]
    fn test_create_function() {
        let sql = "CREATE TEMP FUNCTION AddOne(x INT64, t ANY TYPE) RETURNS INT64 AS (x + 1)";
        let unit = parse_one(sql);
        assert_eq!(unit.root().kind(), NodeKind::CreateFunctionStatement);
        let params = unit
            .walk()
            .find(|n| n.kind() == NodeKind::FunctionParameters)
            .expect("params");
        assert_eq!(params.num_children(), 2);
        assert!(kinds(&unit).contains(&NodeKind::TemplatedType));
        assert!(kinds(&unit).contains(&NodeKind::SqlFunctionBody));
    }

    #[test]
    fn test_create_table_function() {
        let sql = "CREATE TABLE FUNCTION Tvf(Input TABLE<a INT64>, n INT64) AS SELECT * FROM Input";
        let unit = parse_one(sql);
        assert_eq!(unit.root().kind(), NodeKind::CreateTableFunctionStatement);
        assert!(kinds(&unit).contains(&NodeKind::TvfSchema));
    }

    #[test]
    fn test_create_constant_and_view() {
        let unit = parse_one("CREATE PUBLIC CONSTANT MY_CONST = 5");
        assert_eq!(unit.root().kind(), NodeKind::CreateConstantStatement);
        let unit = parse_one("CREATE VIEW V AS SELECT 1");
        assert_eq!(unit.root().kind(), NodeKind::CreateViewStatement);
    }

    #[test]
    fn test_imports() {
        let unit = parse_one("IMPORT MODULE a.b.c AS m");
        assert_eq!(unit.root().kind(), NodeKind::ImportStatement);
        let unit = parse_one("IMPORT PROTO 'x/y.proto' INTO Y");
        assert!(kinds(&unit).contains(&NodeKind::IntoAlias));
        assert!(parse_script("IMPORT a.b;").is_err());
    }

    #[test]
    fn test_unit_tokens_exclude_semicolon() {
        let unit = parse_one("SELECT a;");
        assert_eq!(unit.tokens().len(), 2);
    }
}
