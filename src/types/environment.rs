use std::collections::HashMap;

use super::bindings::Bindings;
use super::value::Value;

/// Name to runtime value mapping consulted by the evaluator.
///
/// Built fresh for every evaluation and dropped afterwards.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert every host binding. Unsupported shapes bind an error value, so
    /// this never fails.
    #[must_use]
    pub fn from_bindings(bindings: &Bindings) -> Self {
        let store = bindings
            .iter()
            .map(|(name, host)| (name.to_owned(), host.to_value(name)))
            .collect();
        Self { store }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }
}
