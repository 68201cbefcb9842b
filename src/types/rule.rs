use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use crate::parse::ParseError;

use super::bindings::Bindings;
use super::environment::Environment;
use super::evaluation_report::EvaluationReport;
use super::expr::RuleNode;
use super::function_registry::FunctionRegistry;
use super::host_value::HostValue;
use super::info::RuleInfo;
use super::value::Value;

/// A parsed rule, immutable once built. Thread-safe and designed to live
/// behind `Arc`.
///
/// Every evaluation builds its own [`Environment`] from the supplied
/// bindings, so concurrent evaluations of one rule never share state.
///
/// # Example
///
/// ```
/// use gatekeep::{Bindings, CompiledRule};
///
/// let rule = CompiledRule::parse(r#"country == "US" and age >= 18"#).unwrap();
/// let bindings = Bindings::new().set("country", "US").set("age", 21_i64);
/// assert!(rule.evaluate(&bindings));
/// ```
#[derive(Debug, Clone)]
pub struct CompiledRule {
    source: String,
    ast: RuleNode,
}

impl CompiledRule {
    pub(crate) fn new(source: &str, ast: RuleNode) -> Self {
        Self {
            source: source.to_owned(),
            ast,
        }
    }

    /// Parse a rule, rejecting it if the parser produced any diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] carrying every diagnostic, in order.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let (rule, diagnostics) = crate::compile::compile(source);
        if diagnostics.is_empty() {
            Ok(rule)
        } else {
            Err(ParseError::new(diagnostics))
        }
    }

    /// The source text this rule was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn ast(&self) -> &RuleNode {
        &self.ast
    }

    /// Evaluate against `bindings` using the standard function registry.
    ///
    /// Returns `true` only when the rule produces `Boolean(true)`. Error values,
    /// numbers, text and every other outcome collapse to `false`.
    #[must_use]
    pub fn evaluate(&self, bindings: &Bindings) -> bool {
        self.evaluate_with(bindings, FunctionRegistry::standard())
    }

    /// Like [`evaluate()`](Self::evaluate), resolving calls against `registry`.
    #[must_use]
    pub fn evaluate_with(&self, bindings: &Bindings, registry: &FunctionRegistry) -> bool {
        self.evaluate_value(bindings, registry)
            .as_bool()
            .unwrap_or(false)
    }

    /// The raw value the rule produces, error values included.
    #[must_use]
    pub fn evaluate_value(&self, bindings: &Bindings, registry: &FunctionRegistry) -> Value {
        let env = Environment::from_bindings(bindings);
        crate::evaluate::evaluate(&self.ast, &env, registry)
    }

    /// Evaluate and return a detailed [`EvaluationReport`] with the raw value,
    /// the boolean verdict and timing.
    pub fn evaluate_detailed(
        &self,
        bindings: &Bindings,
        registry: &FunctionRegistry,
    ) -> EvaluationReport {
        let start = Instant::now();
        let value = self.evaluate_value(bindings, registry);
        EvaluationReport::new(value, start.elapsed())
    }

    /// The identifiers, lists, literals and calls this rule refers to.
    #[must_use]
    pub fn info(&self) -> RuleInfo {
        RuleInfo::collect(self.ast.expression())
    }
}

/// Prints the canonical, fully parenthesized form.
impl fmt::Display for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ast)
    }
}

/// A compiled rule with caller metadata attached.
///
/// Metadata is plain data owned by the rule; mutating it needs `&mut self`, so
/// sharing a `Rule` across threads while changing its metadata is up to the
/// caller.
#[derive(Debug, Clone)]
pub struct Rule<M = HostValue> {
    compiled: CompiledRule,
    metadata: HashMap<String, M>,
}

impl<M> Rule<M> {
    /// Compile `expression`, failing on any parse diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the expression does not parse cleanly.
    pub fn new(expression: &str) -> Result<Self, ParseError> {
        Ok(Self {
            compiled: CompiledRule::parse(expression)?,
            metadata: HashMap::new(),
        })
    }

    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: impl Into<M>) -> Self {
        self.add_metadata(key, value);
        self
    }

    pub fn add_metadata(&mut self, key: &str, value: impl Into<M>) {
        self.metadata.insert(key.to_owned(), value.into());
    }

    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<&M> {
        self.metadata.get(key)
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        self.compiled.source()
    }

    #[must_use]
    pub fn compiled(&self) -> &CompiledRule {
        &self.compiled
    }

    #[must_use]
    pub fn eval(&self, bindings: &Bindings) -> bool {
        self.compiled.evaluate(bindings)
    }

    #[must_use]
    pub fn eval_with(&self, bindings: &Bindings, registry: &FunctionRegistry) -> bool {
        self.compiled.evaluate_with(bindings, registry)
    }
}
