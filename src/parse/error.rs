use thiserror::Error;

/// A rule source that produced one or more syntax diagnostics.
///
/// Returned by the strict constructors ([`CompiledRule::parse()`](crate::CompiledRule::parse),
/// [`Rule::new()`](crate::Rule::new)). The lenient [`compile()`](crate::compile) returns the
/// diagnostics alongside the rule instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error: {}", diagnostics.join("; "))]
pub struct ParseError {
    diagnostics: Vec<String>,
}

impl ParseError {
    pub(crate) fn new(diagnostics: Vec<String>) -> Self {
        Self { diagnostics }
    }

    /// The diagnostics in the order the parser produced them.
    #[must_use]
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }
}
