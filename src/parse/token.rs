use std::fmt;

/// Byte range of a token or node in the rule source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Kinds of tokens produced by the [`Lexer`](super::Lexer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Illegal,

    Ident,
    ListName,
    String,
    Number,
    Regex,
    True,
    False,

    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    LParen,
    RParen,
    Comma,

    And,
    Or,
    Contains,
    NotContains,
}

impl TokenKind {
    /// Resolve an identifier run to a keyword kind, falling back to [`TokenKind::Ident`].
    ///
    /// Keyword matching ignores ASCII case; every other identifier is case-sensitive.
    #[must_use]
    pub fn lookup_ident(ident: &str) -> TokenKind {
        const KEYWORDS: [(&str, TokenKind); 6] = [
            ("and", TokenKind::And),
            ("or", TokenKind::Or),
            ("contains", TokenKind::Contains),
            ("not_contains", TokenKind::NotContains),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
        ];
        KEYWORDS
            .iter()
            .find(|(kw, _)| kw.eq_ignore_ascii_case(ident))
            .map_or(TokenKind::Ident, |&(_, kind)| kind)
    }

    fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Ident => "IDENT",
            TokenKind::ListName => "LISTNAME",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Regex => "REGEX",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Lte => "<=",
            TokenKind::Gt => ">",
            TokenKind::Gte => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Contains => "CONTAINS",
            TokenKind::NotContains => "NOT_CONTAINS",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexeme. String and regex tokens hold the text between the quotes,
/// list names hold the name without the `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    pub(crate) fn eof(at: usize) -> Self {
        Self::new(TokenKind::Eof, "", Span::new(at, at))
    }

    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(TokenKind::lookup_ident("and"), TokenKind::And);
        assert_eq!(TokenKind::lookup_ident("AND"), TokenKind::And);
        assert_eq!(TokenKind::lookup_ident("Or"), TokenKind::Or);
        assert_eq!(TokenKind::lookup_ident("NOT_CONTAINS"), TokenKind::NotContains);
        assert_eq!(TokenKind::lookup_ident("True"), TokenKind::True);
        assert_eq!(TokenKind::lookup_ident("FALSE"), TokenKind::False);
    }

    #[test]
    fn plain_identifiers_stay_identifiers() {
        assert_eq!(TokenKind::lookup_ident("age"), TokenKind::Ident);
        assert_eq!(TokenKind::lookup_ident("android"), TokenKind::Ident);
        assert_eq!(TokenKind::lookup_ident("not"), TokenKind::Ident);
    }

    #[test]
    fn kind_display() {
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
        assert_eq!(TokenKind::RParen.to_string(), ")");
        assert_eq!(TokenKind::NotContains.to_string(), "NOT_CONTAINS");
    }

    #[test]
    fn span_union() {
        let a = Span::new(2, 5);
        let b = Span::new(8, 11);
        assert_eq!(a.to(b), Span::new(2, 11));
        assert_eq!(b.to(a), Span::new(2, 11));
    }
}
