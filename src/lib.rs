//! An embeddable boolean rule language.
//!
//! Rules are single expressions such as
//! `country == "US" and host not_contains @blocked_hosts`. They are compiled
//! once into an immutable [`CompiledRule`] and evaluated many times, from any
//! number of threads, against caller-supplied [`Bindings`].
//!
//! ```
//! use gatekeep::{compile, Bindings};
//!
//! let (rule, diagnostics) = compile(r#"a == "x" OR (b == 10 AND c >= 20.5)"#);
//! assert!(diagnostics.is_empty());
//!
//! let bindings = Bindings::new().set("a", "y").set("b", 10_i64).set("c", 20.5);
//! assert!(rule.evaluate(&bindings));
//! ```

mod compile;
mod error;
mod evaluate;
pub mod parse;
mod types;

pub use compile::compile;
pub use error::GatekeepError;
pub use parse::ParseError;
pub use types::{
    Bindings, CallInfo, CompiledRule, Environment, EvaluationReport, Expr, ExpressionStatement,
    FunctionError, FunctionRegistry, FunctionRegistryBuilder, HostValue, InfixOp, NativeFn, Node,
    PrefixOp, RegexList, RegistryError, Rule, RuleInfo, RuleNode, Value, ValueType,
};
