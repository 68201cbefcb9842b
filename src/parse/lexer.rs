use winnow::combinator::{alt, cut_err, preceded, repeat};
use winnow::error::{ErrMode, ModalResult};
use winnow::prelude::*;
use winnow::stream::Stream;
use winnow::token::{take_till, take_while};

use super::token::{Span, Token, TokenKind};

// -- Lexemes ----------------------------------------------------------------

fn whitespace(input: &mut &str) -> ModalResult<()> {
    take_while(0.., [' ', '\t', '\r', '\n'])
        .void()
        .parse_next(input)
}

fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

fn number<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    // Multiple dots are accepted here and rejected when the literal is parsed.
    (
        take_while(1.., |c: char| c.is_ascii_digit()),
        take_while(0.., |c: char| c.is_ascii_digit() || c == '.'),
    )
        .take()
        .parse_next(input)
}

/// Body of a quoted literal up to the closing `"`. A quote directly preceded by a
/// backslash does not terminate the literal; no escapes are rewritten.
fn quoted_body<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let body = repeat::<_, _, (), _, _>(
        0..,
        alt(("\\\"", take_till(1.., ['"', '\\']), "\\")),
    )
    .take()
    .parse_next(input)?;
    '"'.parse_next(input)?;
    Ok(body)
}

fn operator(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        alt((
            "==".value(TokenKind::Eq),
            "!=".value(TokenKind::NotEq),
            "<=".value(TokenKind::Lte),
            ">=".value(TokenKind::Gte),
        )),
        alt((
            '<'.value(TokenKind::Lt),
            '>'.value(TokenKind::Gt),
            '+'.value(TokenKind::Plus),
            '-'.value(TokenKind::Minus),
            '*'.value(TokenKind::Asterisk),
            '/'.value(TokenKind::Slash),
            '%'.value(TokenKind::Percent),
            '('.value(TokenKind::LParen),
            ')'.value(TokenKind::RParen),
            ','.value(TokenKind::Comma),
        )),
    ))
    .parse_next(input)
}

fn token<'i>(input: &mut &'i str) -> ModalResult<(TokenKind, &'i str)> {
    alt((
        operator.with_taken(),
        preceded("r\"", cut_err(quoted_body)).map(|s| (TokenKind::Regex, s)),
        preceded('"', cut_err(quoted_body)).map(|s| (TokenKind::String, s)),
        preceded('@', word).map(|s| (TokenKind::ListName, s)),
        number.map(|s| (TokenKind::Number, s)),
        word.map(|s| (TokenKind::lookup_ident(s), s)),
    ))
    .parse_next(input)
}

// -- Lexer ------------------------------------------------------------------

/// Lazy tokenizer over a rule source.
///
/// Each call to [`next_token()`](Self::next_token) scans exactly one token. Once the
/// input is exhausted every further call returns an [`TokenKind::Eof`] token.
///
/// Input that cannot start any token (a lone `=`, `!` or `@`, or any other
/// unexpected character) becomes a single-character [`TokenKind::Illegal`] token.
/// An unterminated string or regex literal becomes one `Illegal` token spanning
/// the rest of the input.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    rest: &'a str,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
        }
    }

    fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    pub fn next_token(&mut self) -> Token {
        // Cannot fail: zero or more whitespace characters.
        let _ = whitespace.parse_next(&mut self.rest);

        let start = self.offset();
        if self.rest.is_empty() {
            return Token::eof(start);
        }

        let checkpoint = self.rest.checkpoint();
        match token.parse_next(&mut self.rest) {
            Ok((kind, literal)) => Token::new(kind, literal, Span::new(start, self.offset())),
            Err(ErrMode::Cut(_)) => {
                self.rest.reset(&checkpoint);
                let literal = std::mem::take(&mut self.rest);
                Token::new(TokenKind::Illegal, literal, Span::new(start, self.source.len()))
            }
            Err(_) => {
                self.rest.reset(&checkpoint);
                let len = self.rest.chars().next().map_or(0, char::len_utf8);
                let (literal, rest) = self.rest.split_at(len);
                self.rest = rest;
                Token::new(TokenKind::Illegal, literal, Span::new(start, start + len))
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is(TokenKind::Eof)).then_some(token)
    }
}
