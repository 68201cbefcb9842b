use tracing::{trace, warn};

use crate::types::{Expr, ExpressionStatement, InfixOp, Node, PrefixOp, RuleNode};

use super::error::ParseError;
use super::lexer::Lexer;
use super::token::{Token, TokenKind};

/// Binding power of operators, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Logical,
    Equals,
    LessGreater,
    Sum,
    Product,
    Divide,
    Prefix,
    Call,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::And | TokenKind::Or => Precedence::Logical,
        TokenKind::Eq | TokenKind::NotEq | TokenKind::Contains | TokenKind::NotContains => {
            Precedence::Equals
        }
        TokenKind::Lt | TokenKind::Lte | TokenKind::Gt | TokenKind::Gte => {
            Precedence::LessGreater
        }
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Percent => Precedence::Product,
        TokenKind::Slash => Precedence::Divide,
        TokenKind::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// The result of parsing a rule source: the syntax tree and every diagnostic
/// produced on the way, in order.
///
/// The tree is always present. When `errors` is non-empty it may be incomplete
/// and should not be evaluated.
#[derive(Debug, Clone)]
pub struct ParsedRule {
    pub rule: RuleNode,
    pub errors: Vec<String>,
}

impl ParsedRule {
    /// Convert into the tree, or a [`ParseError`] if any diagnostic was produced.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] carrying all diagnostics when there is at least one.
    pub fn into_result(self) -> Result<RuleNode, ParseError> {
        if self.errors.is_empty() {
            Ok(self.rule)
        } else {
            Err(ParseError::new(self.errors))
        }
    }
}

/// Deepest nesting a rule may reach. Bounds both parser recursion and the
/// height of the tree handed to the evaluator.
pub const MAX_NESTING_DEPTH: usize = 256;

/// A subexpression and the height of its tree.
type Nested = (Expr, usize);

/// Precedence-climbing parser over the token stream of one rule source.
///
/// Syntax errors never abort the parse; they are collected and returned with
/// the tree by [`parse_rule()`](Self::parse_rule). The one exception is a rule
/// nested deeper than [`MAX_NESTING_DEPTH`], which is abandoned with a single
/// diagnostic.
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    errors: Vec<String>,
    depth: usize,
    abandoned: bool,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
            depth: 0,
            abandoned: false,
        }
    }

    /// Parse the whole source.
    ///
    /// A rule is a single expression. If the source holds several top-level
    /// expressions only the last one is kept as the rule body.
    pub fn parse_rule(mut self) -> ParsedRule {
        let mut statement = ExpressionStatement::default();
        let mut statements = 0_usize;

        while !self.current.is(TokenKind::Eof) {
            statement = self.parse_expression_statement();
            statements += 1;
            self.next_token();
        }

        if statements > 1 {
            warn!(
                discarded = statements - 1,
                kept = %statement,
                "rule source holds several top-level expressions; keeping the last"
            );
        }

        ParsedRule {
            rule: RuleNode { statement },
            errors: self.errors,
        }
    }

    // -- Token cursor -------------------------------------------------------

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.is(kind) {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    // -- Diagnostics ---------------------------------------------------------

    fn error(&mut self, message: String) {
        if !self.abandoned {
            self.errors.push(message);
        }
    }

    fn peek_error(&mut self, expected: TokenKind) {
        let message = format!(
            "expected next token to be {expected}, got {} instead",
            self.peek.kind
        );
        self.error(message);
    }

    fn no_prefix_parse_fn_error(&mut self, kind: TokenKind) {
        self.error(format!("no prefix parse function for {kind} found"));
    }

    /// Record the nesting diagnostic and skip to end of input. Every frame
    /// still on the stack then unwinds through `None` without adding more.
    fn nested_too_deeply(&mut self) {
        self.error("expression nested too deeply".to_owned());
        if !self.abandoned {
            warn!(limit = MAX_NESTING_DEPTH, "abandoning rule nested too deeply");
        }
        self.abandoned = true;
        while !self.current.is(TokenKind::Eof) {
            self.next_token();
        }
    }

    fn nest(&mut self, expr: Expr, height: usize) -> Option<Nested> {
        if height > MAX_NESTING_DEPTH {
            self.nested_too_deeply();
            return None;
        }
        Some((expr, height))
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek.kind)
    }

    fn current_precedence(&self) -> Precedence {
        precedence_of(self.current.kind)
    }

    // -- Statements & expressions ------------------------------------------

    fn parse_expression_statement(&mut self) -> ExpressionStatement {
        let start = self.current.span;
        let expression = self
            .parse_expression(Precedence::Lowest)
            .map(|(expr, _)| expr);
        let span = expression.as_ref().map_or(start, Node::span);
        ExpressionStatement { expression, span }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Nested> {
        trace!(
            ?precedence,
            kind = %self.current.kind,
            depth = self.depth,
            "parse_expression"
        );

        if self.depth >= MAX_NESTING_DEPTH {
            self.nested_too_deeply();
            return None;
        }
        self.depth += 1;
        let parsed = self.parse_operator_chain(precedence);
        self.depth -= 1;
        parsed
    }

    fn parse_operator_chain(&mut self, precedence: Precedence) -> Option<Nested> {
        let mut left = self.parse_prefix()?;
        while !self.current.is(TokenKind::Eof) && precedence < self.peek_precedence() {
            self.next_token();
            left = self.parse_infix(left)?;
        }
        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Nested> {
        let span = self.current.span;
        let leaf = match self.current.kind {
            TokenKind::Ident => Expr::Identifier {
                name: self.current.literal.clone(),
                span,
            },
            TokenKind::ListName => Expr::ListReference {
                name: self.current.literal.clone(),
                span,
            },
            TokenKind::String => Expr::String {
                value: self.current.literal.clone(),
                span,
            },
            TokenKind::Regex => Expr::Regex {
                pattern: self.current.literal.clone(),
                span,
            },
            TokenKind::True | TokenKind::False => Expr::Boolean {
                literal: self.current.literal.clone(),
                value: self.current.is(TokenKind::True),
                span,
            },
            TokenKind::Number => self.parse_number_literal()?,
            TokenKind::Minus => return self.parse_prefix_expression(),
            TokenKind::LParen => return self.parse_grouped_expression(),
            kind => {
                self.no_prefix_parse_fn_error(kind);
                return None;
            }
        };
        Some((leaf, 1))
    }

    fn parse_infix(&mut self, left: Nested) -> Option<Nested> {
        if self.current.is(TokenKind::LParen) {
            return self.parse_call_expression(left);
        }

        let (left, left_height) = left;
        let op = InfixOp::from_token(self.current.kind)?;
        let precedence = self.current_precedence();
        self.next_token();
        let (right, right_height) = self.parse_expression(precedence)?;
        let span = left.span().to(right.span());
        let expr = Expr::Infix {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        };
        self.nest(expr, 1 + left_height.max(right_height))
    }

    fn parse_number_literal(&mut self) -> Option<Expr> {
        let literal = self.current.literal.clone();
        match literal.parse::<f64>() {
            Ok(value) => Some(Expr::Number {
                literal,
                value,
                span: self.current.span,
            }),
            Err(_) => {
                self.error(format!("could not parse {literal:?} as number"));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Nested> {
        let start = self.current.span;
        self.next_token();
        let (right, height) = self.parse_expression(Precedence::Prefix)?;
        let span = start.to(right.span());
        let expr = Expr::Prefix {
            op: PrefixOp::Minus,
            right: Box::new(right),
            span,
        };
        self.nest(expr, height + 1)
    }

    fn parse_grouped_expression(&mut self) -> Option<Nested> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        expr
    }

    fn parse_call_expression(&mut self, function: Nested) -> Option<Nested> {
        let (function, function_height) = function;
        let (arguments, arguments_height) = self.parse_call_arguments()?;
        let span = function.span().to(self.current.span);
        let expr = Expr::Call {
            function: Box::new(function),
            arguments,
            span,
        };
        self.nest(expr, 1 + function_height.max(arguments_height))
    }

    /// The arguments and the height of the tallest one.
    fn parse_call_arguments(&mut self) -> Option<(Vec<Expr>, usize)> {
        let mut arguments = Vec::new();
        let mut height = 0;
        if self.peek.is(TokenKind::RParen) {
            self.next_token();
            return Some((arguments, height));
        }

        let mut complete = true;
        self.next_token();
        loop {
            match self.parse_expression(Precedence::Lowest) {
                Some((arg, arg_height)) => {
                    height = height.max(arg_height);
                    arguments.push(arg);
                }
                None => complete = false,
            }
            if !self.peek.is(TokenKind::Comma) {
                break;
            }
            self.next_token();
            self.next_token();
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        complete.then_some((arguments, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Span;

    fn parse_ok(input: &str) -> RuleNode {
        let parsed = Parser::new(input).parse_rule();
        assert!(
            parsed.errors.is_empty(),
            "unexpected diagnostics for {input:?}: {:?}",
            parsed.errors
        );
        parsed.rule
    }

    fn parse_errors(input: &str) -> Vec<String> {
        Parser::new(input).parse_rule().errors
    }

    #[test]
    fn operator_precedence_printing() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "(a * (b / c))"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("a + b / c", "(a + (b / c))"),
            ("(a + b) / c", "((a + b) / c)"),
            ("add(1,3) == true", "(add(1, 3) == true)"),
            (
                "a == \"category name\" OR true",
                "((a == \"category name\") or true)",
            ),
            (
                "a == r\"category name\" OR true",
                "((a == r\"category name\") or true)",
            ),
            ("a % b * c", "((a % b) * c)"),
            ("x <= 1 and y >= 2", "((x <= 1) and (y >= 2))"),
            ("name contains \"US\"", "(name contains \"US\")"),
            ("name NOT_CONTAINS @blocked", "(name not_contains @blocked)"),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_ok(input).to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn logical_operators_are_left_associative() {
        let rule = parse_ok("a or b and c");
        assert_eq!(rule.to_string(), "((a or b) and c)");
    }

    #[test]
    fn identifier_node() {
        let rule = parse_ok("foobar");
        match rule.expression() {
            Some(Expr::Identifier { name, span }) => {
                assert_eq!(name, "foobar");
                assert_eq!(*span, Span::new(0, 6));
            }
            other => panic!("expected Identifier, got {other:?}"),
        }
    }

    #[test]
    fn number_literal_is_float() {
        let rule = parse_ok("20.5");
        match rule.expression() {
            Some(Expr::Number { value, literal, .. }) => {
                assert_eq!(*value, 20.5);
                assert_eq!(literal, "20.5");
            }
            other => panic!("expected Number, got {other:?}"),
        }
    }

    #[test]
    fn boolean_keywords_any_case() {
        for (input, expected) in [("true", true), ("FALSE", false), ("True", true)] {
            match parse_ok(input).expression() {
                Some(Expr::Boolean { value, .. }) => assert_eq!(*value, expected),
                other => panic!("expected Boolean for {input}, got {other:?}"),
            }
        }
    }

    #[test]
    fn call_expression_arguments() {
        let rule = parse_ok(r#"list("a.*", "d", 10)"#);
        match rule.expression() {
            Some(Expr::Call {
                function,
                arguments,
                span,
            }) => {
                assert_eq!(function.to_string(), "list");
                assert_eq!(arguments.len(), 3);
                assert_eq!(arguments[0].token_literal(), "a.*");
                assert_eq!(arguments[2].token_literal(), "10");
                assert_eq!(*span, Span::new(0, 20));
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn call_without_arguments() {
        let rule = parse_ok("now()");
        assert_eq!(rule.to_string(), "now()");
    }

    #[test]
    fn infix_span_covers_operands() {
        let rule = parse_ok("age > 18");
        assert_eq!(rule.expression().map(Node::span), Some(Span::new(0, 8)));
    }

    #[test]
    fn missing_prefix_function_is_reported() {
        let errors = parse_errors(") == 1");
        assert_eq!(errors[0], "no prefix parse function for ) found");
    }

    #[test]
    fn unclosed_group_is_reported() {
        let errors = parse_errors("(a + b");
        assert_eq!(
            errors,
            vec!["expected next token to be ), got EOF instead".to_owned()]
        );
    }

    #[test]
    fn unclosed_call_is_reported() {
        let errors = parse_errors("list(1, 2");
        assert_eq!(
            errors,
            vec!["expected next token to be ), got EOF instead".to_owned()]
        );
    }

    #[test]
    fn malformed_number_is_reported() {
        let errors = parse_errors("x == 1.2.3");
        assert_eq!(errors, vec![r#"could not parse "1.2.3" as number"#.to_owned()]);
    }

    #[test]
    fn lone_equals_produces_diagnostic() {
        let errors = parse_errors("a = 1");
        assert!(errors.contains(&"no prefix parse function for ILLEGAL found".to_owned()));
    }

    #[test]
    fn dangling_operator_is_reported() {
        let errors = parse_errors("a ==");
        assert_eq!(errors, vec!["no prefix parse function for EOF found".to_owned()]);
    }

    #[test]
    fn errors_accumulate() {
        let errors = parse_errors("(a == ) and ) ");
        assert!(errors.len() >= 2, "got {errors:?}");
    }

    #[test]
    fn last_statement_wins() {
        let rule = parse_ok("a == 1 b == 2");
        assert_eq!(rule.to_string(), "(b == 2)");
    }

    #[test]
    fn empty_source_has_no_body() {
        let parsed = Parser::new("   ").parse_rule();
        assert!(parsed.errors.is_empty());
        assert!(parsed.rule.expression().is_none());
    }

    #[test]
    fn nesting_within_limit_parses() {
        let source = format!("{}a{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(parse_ok(&source).to_string(), "a");
    }

    #[test]
    fn nesting_past_limit_is_abandoned() {
        let source = format!("{}a{}", "(".repeat(300), ")".repeat(300));
        let parsed = Parser::new(&source).parse_rule();
        assert_eq!(parsed.errors, vec!["expression nested too deeply".to_owned()]);
        assert!(parsed.rule.expression().is_none());
    }

    #[test]
    fn tall_operator_chain_is_abandoned() {
        let short = vec!["x"; 100].join(" + ");
        assert!(parse_errors(&short).is_empty());

        let tall = vec!["x"; MAX_NESTING_DEPTH + 10].join(" + ");
        assert_eq!(
            parse_errors(&tall),
            vec!["expression nested too deeply".to_owned()]
        );
    }

    #[test]
    fn boolean_keeps_source_spelling() {
        let rule = parse_ok("TRUE");
        let expr = rule.expression().unwrap();
        assert_eq!(expr.token_literal(), "TRUE");
        assert_eq!(expr.to_string(), "true");
    }

    #[test]
    fn into_result_carries_diagnostics() {
        let err = Parser::new("(").parse_rule().into_result().unwrap_err();
        assert!(!err.diagnostics().is_empty());

        assert!(Parser::new("a > 1").parse_rule().into_result().is_ok());
    }
}
