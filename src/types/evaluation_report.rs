use std::fmt;
use std::time::Duration;

use super::value::Value;

/// Detailed evaluation report returned by
/// [`CompiledRule::evaluate_detailed()`](crate::CompiledRule::evaluate_detailed).
///
/// Carries the raw value the rule produced (including any error value), the
/// boolean verdict a caller of [`evaluate()`](crate::CompiledRule::evaluate)
/// would get, and the wall-clock duration of the evaluation.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    value: Value,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(value: Value, duration: Duration) -> Self {
        Self { value, duration }
    }

    /// The value the rule evaluated to.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// `true` only when the value is `Boolean(true)`.
    #[must_use]
    pub fn verdict(&self) -> bool {
        self.value.as_bool().unwrap_or(false)
    }

    /// The error message, if the rule evaluated to an error value.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.value {
            Value::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Wall-clock duration of the evaluation.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "verdict: {}", self.verdict())?;
        write!(f, ", value: {}", self.value)?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
