use tracing::debug;

use crate::parse::{parse, ParsedRule};
use crate::CompiledRule;

/// Compile rule source into a reusable rule plus its syntax diagnostics.
///
/// Never fails. A non-empty diagnostics list means the rule is not safe to
/// evaluate; doing so anyway still cannot panic and returns `false`.
///
/// # Example
///
/// ```
/// let (rule, diagnostics) = gatekeep::compile("a > b and b > 0");
/// assert!(diagnostics.is_empty());
/// assert_eq!(rule.to_string(), "((a > b) and (b > 0))");
/// ```
#[must_use]
pub fn compile(source: &str) -> (CompiledRule, Vec<String>) {
    let ParsedRule { rule, errors } = parse(source);
    debug!(
        len = source.len(),
        diagnostics = errors.len(),
        "compiled rule"
    );
    (CompiledRule::new(source, rule), errors)
}
