use thiserror::Error;

/// Errors raised while building a [`FunctionRegistry`](super::FunctionRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate function name '{name}'")]
    DuplicateFunction { name: String },

    #[error("invalid function name '{name}'; expected letters, digits or '_'")]
    InvalidName { name: String },
}

/// Failure reported by a native function. The evaluator turns it into an
/// error value carrying the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FunctionError {
    message: String,
}

impl FunctionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_function_message() {
        let err = RegistryError::DuplicateFunction {
            name: "list".into(),
        };
        assert_eq!(err.to_string(), "duplicate function name 'list'");
    }

    #[test]
    fn invalid_name_message() {
        let err = RegistryError::InvalidName {
            name: "my fn".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid function name 'my fn'; expected letters, digits or '_'"
        );
    }

    #[test]
    fn function_error_message() {
        let err = FunctionError::new("expected at least one argument");
        assert_eq!(err.to_string(), "expected at least one argument");
        assert_eq!(err.message(), "expected at least one argument");
    }
}
