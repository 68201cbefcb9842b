use std::fmt;

use regex::Regex;

/// Type tag of a runtime [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Number,
    Boolean,
    Text,
    Regex,
    RegexList,
    Error,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Number => "Number",
            ValueType::Boolean => "Boolean",
            ValueType::Text => "Text",
            ValueType::Regex => "Regex",
            ValueType::RegexList => "RegexList",
            ValueType::Error => "Error",
        };
        f.write_str(name)
    }
}

/// An ordered list of compiled regular expressions.
#[derive(Debug, Clone, Default)]
pub struct RegexList {
    patterns: Vec<Regex>,
}

impl RegexList {
    /// Compile every pattern, dropping (and logging) the ones that do not compile.
    ///
    /// An empty result does not tell "no patterns" apart from "no valid patterns";
    /// use [`try_new()`](Self::try_new) when that matters.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .filter_map(|p| match Regex::new(p.as_ref()) {
                Ok(re) => Some(re),
                Err(err) => {
                    tracing::warn!(pattern = p.as_ref(), %err, "dropping uncompilable pattern");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Compile every pattern, failing on the first one that does not compile.
    ///
    /// # Errors
    ///
    /// Returns the [`regex::Error`] of the first invalid pattern.
    pub fn try_new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Source text of each compiled pattern, in order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    /// True if any pattern matches somewhere in `text`.
    #[must_use]
    pub fn any_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }

    /// True if any pattern fails to match `text`.
    ///
    /// This is not the negation of [`any_match()`](Self::any_match): a list with
    /// both a matching and a non-matching pattern answers `true` to both.
    #[must_use]
    pub fn any_miss(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| !re.is_match(text))
    }
}

impl PartialEq for RegexList {
    fn eq(&self, other: &Self) -> bool {
        self.patterns().eq(other.patterns())
    }
}

/// Runtime value produced by evaluating a syntax tree node.
///
/// Errors are ordinary values: evaluation never aborts, and the caller-facing
/// entry points turn anything that is not `Boolean(true)` into `false`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    Text(String),
    /// An uncompiled pattern from a `r"..."` literal.
    Regex(String),
    RegexList(RegexList),
    Error(String),
}

impl Value {
    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(message.into())
    }

    #[must_use]
    pub fn type_tag(&self) -> ValueType {
        match self {
            Value::Number(_) => ValueType::Number,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Text(_) => ValueType::Text,
            Value::Regex(_) => ValueType::Regex,
            Value::RegexList(_) => ValueType::RegexList,
            Value::Error(_) => ValueType::Error,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// The boolean payload, if this is a `Boolean`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<RegexList> for Value {
    fn from(list: RegexList) -> Self {
        Value::RegexList(list)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Text(v) | Value::Regex(v) => write!(f, "{v}"),
            Value::RegexList(list) => {
                let quoted: Vec<String> = list.patterns().map(|p| format!("{p:?}")).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
            Value::Error(message) => write!(f, "error: {message}"),
        }
    }
}
