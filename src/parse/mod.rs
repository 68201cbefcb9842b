mod error;
mod lexer;
mod parser;
mod token;

pub use error::ParseError;
pub use lexer::Lexer;
pub use parser::{ParsedRule, Parser, MAX_NESTING_DEPTH};
pub use token::{Span, Token, TokenKind};

/// Parse a rule source into a syntax tree plus its diagnostics.
///
/// Never fails: a malformed source yields a possibly incomplete tree and a
/// non-empty [`ParsedRule::errors`]. Use [`ParsedRule::into_result()`] for the
/// strict form.
#[must_use]
pub fn parse(input: &str) -> ParsedRule {
    Parser::new(input).parse_rule()
}
