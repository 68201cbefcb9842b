use std::collections::HashMap;

use super::host_value::HostValue;

/// Named host values supplied for one evaluation.
///
/// Keys are the identifiers and list names used in the rule source (without the
/// `@` prefix for lists).
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<String, HostValue>,
}

impl Bindings {
    /// Create an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to a value, replacing any previous binding.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<HostValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `name` to a value (mutable reference version).
    pub fn insert(&mut self, name: &str, value: impl Into<HostValue>) {
        self.values.insert(name.to_owned(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HostValue> {
        self.values.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HostValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Bindings
where
    K: Into<String>,
    V: Into<HostValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, HostValue>> for Bindings {
    fn from(values: HashMap<String, HostValue>) -> Self {
        Self { values }
    }
}
