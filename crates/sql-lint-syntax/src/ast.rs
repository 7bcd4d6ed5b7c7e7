//! Arena syntax tree for one parsed statement.
//!
//! Nodes live in a flat `Vec` owned by the [`ParseUnit`] and refer to each
//! other by [`NodeId`]. Every node knows its parent, so rules can inspect
//! the surrounding structure without recursion.

use std::fmt::Write as _;

use crate::{Span, Token};

/// Index of a node inside its [`ParseUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Explicit join types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// `INNER JOIN`
    Inner,
    /// `CROSS JOIN`
    Cross,
    /// `LEFT [OUTER] JOIN`
    Left,
    /// `RIGHT [OUTER] JOIN`
    Right,
    /// `FULL [OUTER] JOIN`
    Full,
    /// `a, b`
    Comma,
}

/// Binary operators that are not `AND`/`OR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum BinaryOp {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Concat,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
}

/// The kind of a syntax tree node.
///
/// `AndExpr` and `OrExpr` are n-ary: `a AND b AND c` is one node with three
/// children. Parentheses do not produce nodes; a parenthesized expression
/// keeps the span of its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum NodeKind {
    // --- Statements ---
    QueryStatement,
    CreateTableStatement,
    CreateFunctionStatement,
    CreateTableFunctionStatement,
    CreateConstantStatement,
    CreateViewStatement,
    ImportStatement,

    // --- Queries ---
    Query,
    WithClause,
    WithClauseEntry,
    SetOperation,
    Select,
    SelectList,
    SelectColumn,
    Star,
    DotStar,
    /// `explicit` is true when the alias is introduced by `AS`.
    Alias {
        explicit: bool,
    },
    FromClause,
    TablePathExpression,
    TableSubquery,
    UnnestExpression,
    /// `join_type` is `None` for a bare `JOIN`.
    Join {
        join_type: Option<JoinType>,
    },
    OnClause,
    UsingClause,
    WhereClause,
    GroupBy,
    Having,
    OrderBy,
    OrderingExpression,
    Limit,

    // --- Windows ---
    WindowClause,
    WindowDefinition,
    WindowSpecification,
    PartitionBy,
    WindowFrame,

    // --- Expressions ---
    Identifier,
    PathExpression,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    BooleanLiteral,
    NullLiteral,
    Parameter,
    BinaryExpression(BinaryOp),
    AndExpr,
    OrExpr,
    NotExpr,
    UnaryExpression,
    BetweenExpression,
    InExpression,
    InList,
    IsExpression,
    FunctionCall,
    CaseExpression,
    CastExpression,
    ExpressionSubquery,
    ArrayConstructor,
    ArrayElement,
    DotIdentifier,

    // --- DDL and types ---
    TableElementList,
    ColumnDefinition,
    FunctionDeclaration,
    FunctionParameters,
    FunctionParameter,
    SimpleType,
    ArrayType,
    StructType,
    StructField,
    TvfSchema,
    TvfSchemaColumn,
    TemplatedType,
    SqlFunctionBody,
    IntoAlias,
}

/// Storage for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Node kind.
    pub kind: NodeKind,
    /// Byte range covered by the node.
    pub span: Span,
    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Children in source order.
    pub children: Vec<NodeId>,
}

/// One successfully parsed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUnit {
    nodes: Vec<NodeData>,
    root: NodeId,
    span: Span,
    tokens: Vec<Token>,
}

impl ParseUnit {
    /// Returns the root (statement) node.
    #[must_use]
    pub const fn root(&self) -> NodeRef<'_> {
        NodeRef {
            unit: self,
            id: self.root,
        }
    }

    /// Returns the statement's byte range, excluding the terminating `;`.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the statement's tokens, excluding the terminating `;`.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns a handle to the node with the given id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { unit: self, id })
    }

    /// Iterates all nodes in pre-order without recursion.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            unit: self,
            stack: vec![self.root],
        }
    }

    /// Renders the tree as an indented outline, one node per line.
    #[must_use]
    pub fn debug_tree(&self, source: &str) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let data = &self.nodes[id.0];
            let _ = write!(
                out,
                "{:indent$}{:?} [{}-{})",
                "",
                data.kind,
                data.span.start,
                data.span.end,
                indent = depth * 2
            );
            if data.children.is_empty() {
                let _ = write!(out, " {:?}", data.span.slice(source));
            }
            out.push('\n');
            for &child in data.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Pre-order iterator over the nodes of a [`ParseUnit`].
pub struct Walk<'a> {
    unit: &'a ParseUnit,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let data = self.unit.data(id);
        self.stack.extend(data.children.iter().rev());
        Some(NodeRef {
            unit: self.unit,
            id,
        })
    }
}

/// A borrowed handle to a node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    unit: &'a ParseUnit,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Returns the node id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.unit.data(self.id).kind
    }

    /// Returns the byte range covered by the node.
    #[must_use]
    pub fn span(&self) -> Span {
        self.unit.data(self.id).span
    }

    /// Returns the source text covered by the node.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span().slice(source)
    }

    /// Returns the parent node.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.unit.data(self.id).parent.map(|id| Self {
            unit: self.unit,
            id,
        })
    }

    /// Returns the number of children.
    #[must_use]
    pub fn num_children(&self) -> usize {
        self.unit.data(self.id).children.len()
    }

    /// Returns the `index`-th child.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<Self> {
        self.unit
            .data(self.id)
            .children
            .get(index)
            .map(|&id| Self {
                unit: self.unit,
                id,
            })
    }

    /// Iterates the children in source order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let unit = self.unit;
        unit.data(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef { unit, id })
    }

    /// Returns true if this node is the last child of its parent.
    #[must_use]
    pub fn is_last_child(&self) -> bool {
        self.parent().map_or(true, |parent| {
            parent.unit.data(parent.id).children.last() == Some(&self.id)
        })
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.unit, other.unit) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

/// Bottom-up tree construction used by the parser.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    /// Adds a node whose children have already been added.
    pub(crate) fn add(&mut self, kind: NodeKind, span: Span, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        for child in &children {
            self.nodes[child.0].parent = Some(id);
        }
        self.nodes.push(NodeData {
            kind,
            span,
            parent: None,
            children,
        });
        id
    }

    /// Adds a node without children.
    pub(crate) fn leaf(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.add(kind, span, Vec::new())
    }

    /// Returns the span of a node already in the arena.
    pub(crate) fn span(&self, id: NodeId) -> Span {
        self.nodes[id.0].span
    }

    pub(crate) fn finish(self, root: NodeId, span: Span, tokens: Vec<Token>) -> ParseUnit {
        ParseUnit {
            nodes: self.nodes,
            root,
            span,
            tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds `SELECT a AS b` by hand.
    fn sample() -> ParseUnit {
        let mut b = TreeBuilder::default();
        let a = b.leaf(NodeKind::Identifier, Span::new(7, 8));
        let path = b.add(NodeKind::PathExpression, Span::new(7, 8), vec![a]);
        let alias_ident = b.leaf(NodeKind::Identifier, Span::new(12, 13));
        let alias = b.add(
            NodeKind::Alias { explicit: true },
            Span::new(9, 13),
            vec![alias_ident],
        );
        let column = b.add(NodeKind::SelectColumn, Span::new(7, 13), vec![path, alias]);
        let list = b.add(NodeKind::SelectList, Span::new(7, 13), vec![column]);
        let select = b.add(NodeKind::Select, Span::new(0, 13), vec![list]);
        let query = b.add(NodeKind::Query, Span::new(0, 13), vec![select]);
        let stmt = b.add(NodeKind::QueryStatement, Span::new(0, 13), vec![query]);
        b.finish(stmt, Span::new(0, 13), Vec::new())
    }

    #[test]
    fn test_walk_is_preorder() {
        let unit = sample();
        let kinds: Vec<NodeKind> = unit.walk().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::QueryStatement,
                NodeKind::Query,
                NodeKind::Select,
                NodeKind::SelectList,
                NodeKind::SelectColumn,
                NodeKind::PathExpression,
                NodeKind::Identifier,
                NodeKind::Alias { explicit: true },
                NodeKind::Identifier,
            ]
        );
        assert_eq!(unit.walk().count(), unit.len());
    }

    #[test]
    fn test_parent_links() {
        let unit = sample();
        let idents: Vec<NodeRef<'_>> = unit
            .walk()
            .filter(|n| n.kind() == NodeKind::Identifier)
            .collect();
        let alias = idents[1].parent().expect("alias parent");
        assert_eq!(alias.kind(), NodeKind::Alias { explicit: true });
        let column = alias.parent().expect("column");
        assert_eq!(column.kind(), NodeKind::SelectColumn);
        assert!(idents[0].is_last_child());
        assert_eq!(column.num_children(), 2);
        assert_eq!(column.child(1), Some(alias));
        assert!(unit.root().parent().is_none());
    }

    #[test]
    fn test_debug_tree() {
        let unit = sample();
        let dump = unit.debug_tree("SELECT a AS b");
        assert!(dump.starts_with("QueryStatement [0-13)\n"));
        assert!(dump.contains("      Identifier [7-8) \"a\"\n"));
    }
}
