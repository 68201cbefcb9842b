use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::parse::TokenKind;

use super::error::{FunctionError, RegistryError};
use super::expr::{Expr, Node};
use super::value::{RegexList, Value};

/// Signature of a native function.
///
/// Natives receive their argument expressions unevaluated and decide how to
/// read them; the built-in `list` reads each argument's literal text.
pub type NativeFn = fn(&[Expr]) -> Result<Value, FunctionError>;

const BUILTINS: &[(&str, NativeFn)] = &[("list", list)];

static STANDARD: LazyLock<FunctionRegistry> = LazyLock::new(|| FunctionRegistry {
    functions: BUILTINS
        .iter()
        .map(|&(name, f)| (name.to_owned(), f))
        .collect(),
});

/// `list(a, b, ...)`: a regex list compiled from the literal text of each
/// argument. Arguments that are not valid patterns are dropped.
fn list(args: &[Expr]) -> Result<Value, FunctionError> {
    let patterns = args.iter().map(|arg| arg.token_literal());
    Ok(Value::RegexList(RegexList::new(patterns)))
}

/// Read-only table of native functions, keyed by lowercase name.
///
/// Build one with [`FunctionRegistry::builder()`] at startup and share it by
/// reference, or use the process-wide [`FunctionRegistry::standard()`].
#[derive(Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, NativeFn>,
}

impl FunctionRegistry {
    #[must_use]
    pub fn builder() -> FunctionRegistryBuilder {
        FunctionRegistryBuilder::default()
    }

    /// The shared registry holding only the built-in functions.
    #[must_use]
    pub fn standard() -> &'static FunctionRegistry {
        &STANDARD
    }

    /// A registry with no functions at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Look up a function, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<NativeFn> {
        self.functions.get(&name.to_ascii_lowercase()).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

/// Builder for a [`FunctionRegistry`]. Names are validated in
/// [`build()`](Self::build).
#[derive(Default)]
pub struct FunctionRegistryBuilder {
    entries: Vec<(String, NativeFn)>,
}

impl FunctionRegistryBuilder {
    /// Add the built-in functions (`list`).
    #[must_use]
    pub fn with_builtins(mut self) -> Self {
        self.entries
            .extend(BUILTINS.iter().map(|&(name, f)| (name.to_owned(), f)));
        self
    }

    #[must_use]
    pub fn register(mut self, name: &str, function: NativeFn) -> Self {
        self.entries.push((name.to_owned(), function));
        self
    }

    /// Freeze the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] for a name the tokenizer would not
    /// read as an identifier (including keywords such as `and`), and
    /// [`RegistryError::DuplicateFunction`] when two names differ only in case.
    pub fn build(self) -> Result<FunctionRegistry, RegistryError> {
        let mut functions = HashMap::with_capacity(self.entries.len());
        for (name, function) in self.entries {
            if !is_callable_name(&name) {
                return Err(RegistryError::InvalidName { name });
            }
            let key = name.to_ascii_lowercase();
            if functions.insert(key, function).is_some() {
                return Err(RegistryError::DuplicateFunction { name });
            }
        }
        tracing::debug!(functions = functions.len(), "built function registry");
        Ok(FunctionRegistry { functions })
    }
}

impl fmt::Debug for FunctionRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.entries.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("FunctionRegistryBuilder")
            .field("entries", &names)
            .finish()
    }
}

fn is_callable_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && TokenKind::lookup_ident(name) == TokenKind::Ident
}
