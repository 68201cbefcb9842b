use thiserror::Error;

use crate::parse::ParseError;
use crate::RegistryError;

/// Unified error type covering rule parsing and registry construction.
///
/// Handy for setup code that compiles rules and builds a
/// [`FunctionRegistry`](crate::FunctionRegistry) in one `?`-chained function.
#[derive(Debug, Error)]
pub enum GatekeepError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompiledRule, FunctionRegistry};

    fn setup(source: &str, extra: &str) -> Result<(CompiledRule, FunctionRegistry), GatekeepError> {
        let registry = FunctionRegistry::builder()
            .with_builtins()
            .register(extra, |_| Ok(crate::Value::Boolean(true)))
            .build()?;
        let rule = CompiledRule::parse(source)?;
        Ok((rule, registry))
    }

    #[test]
    fn converts_parse_errors() {
        let err = setup("a ==", "always").unwrap_err();
        assert!(matches!(err, GatekeepError::Parse(_)));
        assert_eq!(
            err.to_string(),
            "parse error: no prefix parse function for EOF found"
        );
    }

    #[test]
    fn converts_registry_errors() {
        let err = setup("a == 1", "list").unwrap_err();
        assert!(matches!(err, GatekeepError::Registry(_)));
        assert_eq!(err.to_string(), "duplicate function name 'list'");
    }

    #[test]
    fn setup_succeeds() {
        let (rule, registry) = setup("always()", "always").unwrap();
        assert!(rule.evaluate_with(&crate::Bindings::new(), &registry));
    }
}
