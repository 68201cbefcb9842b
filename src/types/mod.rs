mod bindings;
mod environment;
mod error;
mod evaluation_report;
mod expr;
mod function_registry;
mod host_value;
mod info;
mod rule;
mod value;

pub use bindings::Bindings;
pub use environment::Environment;
pub use error::{FunctionError, RegistryError};
pub use evaluation_report::EvaluationReport;
pub use expr::{Expr, ExpressionStatement, InfixOp, Node, PrefixOp, RuleNode};
pub use function_registry::{FunctionRegistry, FunctionRegistryBuilder, NativeFn};
pub use host_value::HostValue;
pub use info::{CallInfo, RuleInfo};
pub use rule::{CompiledRule, Rule};
pub use value::{RegexList, Value, ValueType};
