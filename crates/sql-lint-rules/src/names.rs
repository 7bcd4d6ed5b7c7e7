//! Naming conventions for declared names.
//!
//! # Rationale
//!
//! Tables, windows, functions and table-valued parameters are
//! `UpperCamelCase`; column aliases and scalar parameters are
//! `lower_snake_case`; constants are `CAPS_SNAKE_CASE`; simple data types are
//! all caps.
//!
//! What an identifier names is decided from its parent and grandparent
//! nodes. For dotted paths only the last component is checked.
//!
//! | Grandparent | Rule |
//! |-------------|------|
//! | `CREATE TABLE` name | `table-name` |
//! | `WINDOW` clause | `window-name` |
//! | function declaration | `function-name` |
//! | simple type | `data-type-name` |
//! | select column alias | `column-name` (`UpperCamelCase` also allowed) |
//! | function parameters | `parameter-name` |
//! | `CREATE CONSTANT` name | `constant-name` |

use sql_lint_core::{dispatch, Check, CheckError, DiagnosticReport, RuleKind, RunContext};
use sql_lint_syntax::{NodeKind, NodeRef};

use crate::case::{is_all_caps, is_caps_snake_case, is_lower_snake_case, is_upper_camel_case};

const KINDS: [RuleKind; 7] = [
    RuleKind::TableName,
    RuleKind::WindowName,
    RuleKind::FunctionName,
    RuleKind::DataTypeName,
    RuleKind::ColumnName,
    RuleKind::ParameterName,
    RuleKind::ConstantName,
];

/// Reports declared names that break their naming convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct Names;

impl Names {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Returns the rule and message for an identifier that breaks its
/// convention, or `None` if it conforms or is not a declared name.
fn violation(node: NodeRef<'_>, name: &str) -> Option<(RuleKind, &'static str)> {
    let parent = node.parent()?;
    let grandparent = parent.parent()?;
    if parent.kind() == NodeKind::PathExpression && !node.is_last_child() {
        return None;
    }
    let names_grandparent = grandparent.child(0) == Some(parent);

    match grandparent.kind() {
        NodeKind::CreateTableStatement if names_grandparent => (!is_upper_camel_case(name)).then_some((
            RuleKind::TableName,
            "Table names or table aliases should be UpperCamelCase.",
        )),
        NodeKind::WindowClause => {
            (!is_upper_camel_case(name)).then_some((RuleKind::WindowName, "Window names should be UpperCamelCase."))
        }
        NodeKind::FunctionDeclaration => (!is_upper_camel_case(name))
            .then_some((RuleKind::FunctionName, "Function names should be UpperCamelCase.")),
        NodeKind::SimpleType => {
            (!is_all_caps(name)).then_some((RuleKind::DataTypeName, "Simple SQL data types should be all caps."))
        }
        NodeKind::SelectColumn if matches!(parent.kind(), NodeKind::Alias { .. }) => {
            (!is_lower_snake_case(name) && !is_upper_camel_case(name))
                .then_some((RuleKind::ColumnName, "Column names should be lower_snake_case."))
        }
        NodeKind::FunctionParameters => {
            let is_table = parent.child(1).is_some_and(|ty| ty.kind() == NodeKind::TvfSchema);
            if is_table {
                (!is_upper_camel_case(name)).then_some((
                    RuleKind::ParameterName,
                    "Table or proto function parameters should be UpperCamelCase.",
                ))
            } else {
                (!is_lower_snake_case(name)).then_some((
                    RuleKind::ParameterName,
                    "Non-table function parameters should be lower_snake_case.",
                ))
            }
        }
        NodeKind::CreateConstantStatement if names_grandparent => (!is_caps_snake_case(name))
            .then_some((RuleKind::ConstantName, "Constant names should be CAPS_SNAKE_CASE.")),
        _ => None,
    }
}

impl Check for Names {
    fn name(&self) -> &'static str {
        "names"
    }

    fn description(&self) -> &'static str {
        "Declared names must follow their naming convention"
    }

    fn kinds(&self) -> &'static [RuleKind] {
        &KINDS
    }

    fn requires_ast(&self) -> bool {
        true
    }

    fn check(&self, ctx: &RunContext<'_>) -> Result<DiagnosticReport, CheckError> {
        Ok(dispatch::apply(ctx, |node, ctx| {
            let mut report = DiagnosticReport::new();
            if node.kind() != NodeKind::Identifier {
                return report;
            }
            let name = node.text(ctx.text());
            if let Some((kind, message)) = violation(node, name) {
                ctx.emit(&mut report, kind, node.span().start, message);
            }
            report
        }))
    }
}
