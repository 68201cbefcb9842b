use std::collections::HashMap;

use super::value::{RegexList, Value};

/// A value supplied by the host application for one binding.
///
/// Exactly five shapes are accepted. Anything else is carried as
/// [`HostValue::Unsupported`] and binds to an error value instead of failing
/// the whole evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// Compiled into a regex list; uncompilable entries are dropped.
    TextList(Vec<String>),
    Text(String),
    Bool(bool),
    Float(f64),
    /// Widened to a 64-bit float.
    Int(i64),
    /// A shape the rule language cannot represent, described by name.
    Unsupported(String),
}

impl HostValue {
    pub fn unsupported(shape: impl Into<String>) -> Self {
        HostValue::Unsupported(shape.into())
    }

    /// Convert to the runtime value bound under `name`.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn to_value(&self, name: &str) -> Value {
        match self {
            HostValue::TextList(items) => Value::RegexList(RegexList::new(items)),
            HostValue::Text(s) => Value::Text(s.clone()),
            HostValue::Bool(b) => Value::Boolean(*b),
            HostValue::Float(f) => Value::Number(*f),
            HostValue::Int(i) => Value::Number(*i as f64),
            HostValue::Unsupported(shape) => {
                tracing::warn!(binding = name, shape = %shape, "unsupported host value");
                Value::error(format!("invalid value for '{name}': unsupported {shape}"))
            }
        }
    }
}

impl From<bool> for HostValue {
    fn from(v: bool) -> Self {
        HostValue::Bool(v)
    }
}

impl From<f64> for HostValue {
    fn from(v: f64) -> Self {
        HostValue::Float(v)
    }
}

impl From<i64> for HostValue {
    fn from(v: i64) -> Self {
        HostValue::Int(v)
    }
}

impl From<i32> for HostValue {
    fn from(v: i32) -> Self {
        HostValue::Int(i64::from(v))
    }
}

impl From<u32> for HostValue {
    fn from(v: u32) -> Self {
        HostValue::Int(i64::from(v))
    }
}

impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        HostValue::Text(v.to_owned())
    }
}

impl From<String> for HostValue {
    fn from(v: String) -> Self {
        HostValue::Text(v)
    }
}

impl From<Vec<String>> for HostValue {
    fn from(v: Vec<String>) -> Self {
        HostValue::TextList(v)
    }
}

impl From<Vec<&str>> for HostValue {
    fn from(v: Vec<&str>) -> Self {
        HostValue::TextList(v.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for HostValue {
    fn from(v: &[&str]) -> Self {
        HostValue::TextList(v.iter().map(|s| (*s).to_owned()).collect())
    }
}

/// Nested maps cannot be bound; they become [`HostValue::Unsupported`].
impl From<HashMap<String, HostValue>> for HostValue {
    fn from(_: HashMap<String, HostValue>) -> Self {
        HostValue::unsupported("map")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_scalars() {
        assert_eq!(HostValue::from(true), HostValue::Bool(true));
        assert_eq!(HostValue::from(7.5_f64), HostValue::Float(7.5));
        assert_eq!(HostValue::from(8_i64), HostValue::Int(8));
        assert_eq!(HostValue::from(8_i32), HostValue::Int(8));
        assert_eq!(HostValue::from(8_u32), HostValue::Int(8));
        assert_eq!(HostValue::from("x"), HostValue::Text("x".into()));
        assert_eq!(HostValue::from("x".to_owned()), HostValue::Text("x".into()));
    }

    #[test]
    fn from_lists() {
        let expected = HostValue::TextList(vec!["a".into(), "b".into()]);
        assert_eq!(HostValue::from(vec!["a", "b"]), expected);
        assert_eq!(HostValue::from(&["a", "b"][..]), expected);
        assert_eq!(
            HostValue::from(vec!["a".to_owned(), "b".to_owned()]),
            expected
        );
    }

    #[test]
    fn nested_map_is_unsupported() {
        let nested: HashMap<String, HostValue> = HashMap::new();
        assert_eq!(HostValue::from(nested), HostValue::unsupported("map"));
    }

    #[test]
    fn int_widens_to_number() {
        assert_eq!(HostValue::Int(8).to_value("a"), Value::Number(8.0));
    }

    #[test]
    fn text_list_becomes_regex_list() {
        let value = HostValue::from(vec!["abd", "ad", "("]).to_value("list");
        match value {
            Value::RegexList(list) => assert_eq!(list.len(), 2),
            other => panic!("expected RegexList, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_becomes_error_value() {
        let value = HostValue::unsupported("map").to_value("profile");
        assert_eq!(
            value,
            Value::error("invalid value for 'profile': unsupported map")
        );
    }
}
