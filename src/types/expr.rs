use std::fmt;

use crate::parse::{Span, TokenKind};

/// Capabilities shared by every syntax tree node: printing back to canonical
/// source text and reporting the token and position it came from.
pub trait Node: fmt::Display {
    /// Literal text of the token that introduced this node.
    fn token_literal(&self) -> &str;

    /// Byte range in the rule source covered by this node.
    fn span(&self) -> Span;
}

/// Prefix (unary) operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Minus,
}

/// Infix (binary) operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    And,
    Or,
    Contains,
    NotContains,
}

impl PrefixOp {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PrefixOp::Minus => "-",
        }
    }
}

impl InfixOp {
    pub(crate) fn from_token(kind: TokenKind) -> Option<InfixOp> {
        Some(match kind {
            TokenKind::Plus => InfixOp::Add,
            TokenKind::Minus => InfixOp::Sub,
            TokenKind::Asterisk => InfixOp::Mul,
            TokenKind::Slash => InfixOp::Div,
            TokenKind::Percent => InfixOp::Rem,
            TokenKind::Eq => InfixOp::Eq,
            TokenKind::NotEq => InfixOp::NotEq,
            TokenKind::Lt => InfixOp::Lt,
            TokenKind::Lte => InfixOp::Lte,
            TokenKind::Gt => InfixOp::Gt,
            TokenKind::Gte => InfixOp::Gte,
            TokenKind::And => InfixOp::And,
            TokenKind::Or => InfixOp::Or,
            TokenKind::Contains => InfixOp::Contains,
            TokenKind::NotContains => InfixOp::NotContains,
            _ => return None,
        })
    }

    /// Canonical spelling; keyword operators print in lowercase.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Rem => "%",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
            InfixOp::Lt => "<",
            InfixOp::Lte => "<=",
            InfixOp::Gt => ">",
            InfixOp::Gte => ">=",
            InfixOp::And => "and",
            InfixOp::Or => "or",
            InfixOp::Contains => "contains",
            InfixOp::NotContains => "not_contains",
        }
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expression nodes. Composite variants own their children; a tree is built
/// once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier {
        name: String,
        span: Span,
    },
    /// `@name`, resolved against the bindings like an identifier.
    ListReference {
        name: String,
        span: Span,
    },
    /// `r"pattern"`. The pattern is compiled at evaluation time.
    Regex {
        pattern: String,
        span: Span,
    },
    String {
        value: String,
        span: Span,
    },
    Number {
        literal: String,
        value: f64,
        span: Span,
    },
    /// `literal` keeps the source spelling (`TRUE`, `False`); printing uses
    /// the lowercase canonical form.
    Boolean {
        literal: String,
        value: bool,
        span: Span,
    },
    Prefix {
        op: PrefixOp,
        right: Box<Expr>,
        span: Span,
    },
    Infix {
        op: InfixOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    /// Native function call. Arguments are handed to the function unevaluated.
    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
        span: Span,
    },
}

impl Node for Expr {
    fn token_literal(&self) -> &str {
        match self {
            Expr::Identifier { name, .. } | Expr::ListReference { name, .. } => name,
            Expr::Regex { pattern, .. } => pattern,
            Expr::String { value, .. } => value,
            Expr::Number { literal, .. } | Expr::Boolean { literal, .. } => literal,
            Expr::Prefix { op, .. } => op.as_str(),
            Expr::Infix { op, .. } => op.as_str(),
            Expr::Call { .. } => "(",
        }
    }

    fn span(&self) -> Span {
        match self {
            Expr::Identifier { span, .. }
            | Expr::ListReference { span, .. }
            | Expr::Regex { span, .. }
            | Expr::String { span, .. }
            | Expr::Number { span, .. }
            | Expr::Boolean { span, .. }
            | Expr::Prefix { span, .. }
            | Expr::Infix { span, .. }
            | Expr::Call { span, .. } => *span,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier { name, .. } => write!(f, "{name}"),
            Expr::ListReference { name, .. } => write!(f, "@{name}"),
            Expr::Regex { pattern, .. } => write!(f, "r\"{pattern}\""),
            Expr::String { value, .. } => write!(f, "\"{value}\""),
            Expr::Number { literal, .. } => write!(f, "{literal}"),
            Expr::Boolean { value, .. } => write!(f, "{value}"),
            Expr::Prefix { op, right, .. } => write!(f, "({op}{right})"),
            Expr::Infix {
                op, left, right, ..
            } => write!(f, "({left} {op} {right})"),
            Expr::Call {
                function,
                arguments,
                ..
            } => {
                write!(f, "{function}(")?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A statement wrapping a single expression. The expression is `None` when the
/// parser could not produce one; the accompanying diagnostics say why.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpressionStatement {
    pub expression: Option<Expr>,
    pub span: Span,
}

impl Node for ExpressionStatement {
    fn token_literal(&self) -> &str {
        self.expression.as_ref().map_or("", Node::token_literal)
    }

    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expression {
            Some(expr) => write!(f, "{expr}"),
            None => Ok(()),
        }
    }
}

/// Root of a parsed rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleNode {
    pub statement: ExpressionStatement,
}

impl RuleNode {
    /// The rule's body expression, if parsing produced one.
    #[must_use]
    pub fn expression(&self) -> Option<&Expr> {
        self.statement.expression.as_ref()
    }
}

impl Node for RuleNode {
    fn token_literal(&self) -> &str {
        self.statement.token_literal()
    }

    fn span(&self) -> Span {
        self.statement.span()
    }
}

impl fmt::Display for RuleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.statement)
    }
}
