use std::borrow::Cow;

use regex::Regex;
use tracing::trace;

use crate::types::{
    Environment, Expr, FunctionRegistry, InfixOp, PrefixOp, RegexList, RuleNode, Value, ValueType,
};

pub(crate) fn evaluate(rule: &RuleNode, env: &Environment, registry: &FunctionRegistry) -> Value {
    let value = match rule.expression() {
        Some(expr) => eval_expr(expr, env, registry).into_owned(),
        None => Value::error("empty rule"),
    };
    if let Value::Error(message) = &value {
        trace!(rule = %rule, %message, "rule evaluated to an error");
    }
    value
}

fn eval_expr<'e>(
    expr: &Expr,
    env: &'e Environment,
    registry: &FunctionRegistry,
) -> Cow<'e, Value> {
    match expr {
        Expr::Number { value, .. } => Cow::Owned(Value::Number(*value)),
        Expr::String { value, .. } => Cow::Owned(Value::Text(value.clone())),
        Expr::Boolean { value, .. } => Cow::Owned(Value::Boolean(*value)),
        Expr::Regex { pattern, .. } => Cow::Owned(Value::Regex(pattern.clone())),
        Expr::Identifier { name, .. } => env.lookup(name).map_or_else(
            || Cow::Owned(Value::error(format!("identifier not found: {name}"))),
            Cow::Borrowed,
        ),
        Expr::ListReference { name, .. } => env.lookup(name).map_or_else(
            || Cow::Owned(Value::error(format!("missing list: {name}"))),
            Cow::Borrowed,
        ),
        Expr::Call {
            function,
            arguments,
            ..
        } => Cow::Owned(eval_call(function, arguments, registry)),
        Expr::Prefix { op, right, .. } => {
            let right = eval_expr(right, env, registry);
            Cow::Owned(eval_prefix(*op, &right))
        }
        Expr::Infix {
            op, left, right, ..
        } => {
            // Both sides are always evaluated; there is no short-circuit.
            let left = eval_expr(left, env, registry);
            let right = eval_expr(right, env, registry);
            Cow::Owned(eval_infix(*op, &left, &right))
        }
    }
}

fn eval_call(function: &Expr, arguments: &[Expr], registry: &FunctionRegistry) -> Value {
    let name = function.to_string();
    match registry.get(&name) {
        Some(native) => native(arguments).unwrap_or_else(|err| Value::error(err.message())),
        None => Value::error(format!("undefined function: {name}")),
    }
}

fn eval_prefix(op: PrefixOp, right: &Value) -> Value {
    match (op, right) {
        (PrefixOp::Minus, Value::Number(n)) => Value::Number(-n),
        (PrefixOp::Minus, other) => {
            Value::error(format!("unknown operator: {op}{}", other.type_tag()))
        }
    }
}

fn eval_infix(op: InfixOp, left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => eval_number_infix(op, *l, *r),
        (Value::Boolean(l), Value::Boolean(r)) => eval_logical_infix(op, *l, *r),
        (Value::Text(l), Value::Text(r)) => eval_text_infix(op, l, r),
        (Value::Text(l), Value::Regex(pattern)) => eval_regex_infix(op, l, pattern),
        (Value::Text(l), Value::RegexList(list)) => eval_regex_list_infix(op, l, list),
        _ => Value::error(format!(
            "invalid expression: {} {op} {}",
            left.type_tag(),
            right.type_tag()
        )),
    }
}

fn invalid_operator(op: InfixOp, left: ValueType, right: ValueType) -> Value {
    Value::error(format!("invalid operator: {op} for {left} and {right}"))
}

#[allow(clippy::float_cmp)]
fn eval_number_infix(op: InfixOp, l: f64, r: f64) -> Value {
    match op {
        InfixOp::Add => Value::Number(l + r),
        InfixOp::Sub => Value::Number(l - r),
        InfixOp::Mul => Value::Number(l * r),
        InfixOp::Div => Value::Number(l / r),
        InfixOp::Rem => Value::Number(l % r),
        InfixOp::Eq => Value::Boolean(l == r),
        InfixOp::NotEq => Value::Boolean(l != r),
        InfixOp::Lt => Value::Boolean(l < r),
        InfixOp::Lte => Value::Boolean(l <= r),
        InfixOp::Gt => Value::Boolean(l > r),
        InfixOp::Gte => Value::Boolean(l >= r),
        InfixOp::And | InfixOp::Or | InfixOp::Contains | InfixOp::NotContains => {
            invalid_operator(op, ValueType::Number, ValueType::Number)
        }
    }
}

fn eval_logical_infix(op: InfixOp, l: bool, r: bool) -> Value {
    match op {
        InfixOp::And => Value::Boolean(l && r),
        InfixOp::Or => Value::Boolean(l || r),
        InfixOp::Add
        | InfixOp::Sub
        | InfixOp::Mul
        | InfixOp::Div
        | InfixOp::Rem
        | InfixOp::Eq
        | InfixOp::NotEq
        | InfixOp::Lt
        | InfixOp::Lte
        | InfixOp::Gt
        | InfixOp::Gte
        | InfixOp::Contains
        | InfixOp::NotContains => invalid_operator(op, ValueType::Boolean, ValueType::Boolean),
    }
}

fn eval_text_infix(op: InfixOp, l: &str, r: &str) -> Value {
    match op {
        InfixOp::Contains => Value::Boolean(l.contains(r)),
        InfixOp::NotContains => Value::Boolean(!l.contains(r)),
        InfixOp::Eq => Value::Boolean(l == r),
        InfixOp::NotEq => Value::Boolean(l != r),
        InfixOp::Add
        | InfixOp::Sub
        | InfixOp::Mul
        | InfixOp::Div
        | InfixOp::Rem
        | InfixOp::Lt
        | InfixOp::Lte
        | InfixOp::Gt
        | InfixOp::Gte
        | InfixOp::And
        | InfixOp::Or => invalid_operator(op, ValueType::Text, ValueType::Text),
    }
}

/// The pattern is compiled on every evaluation.
fn eval_regex_infix(op: InfixOp, text: &str, pattern: &str) -> Value {
    let matched = || Regex::new(pattern).map(|re| re.is_match(text));
    let result = match op {
        InfixOp::Contains => matched(),
        InfixOp::NotContains => matched().map(|m| !m),
        _ => return invalid_operator(op, ValueType::Text, ValueType::Regex),
    };
    result.map_or_else(
        |_| Value::error(format!("invalid regex: {pattern:?}")),
        Value::Boolean,
    )
}

fn eval_regex_list_infix(op: InfixOp, text: &str, list: &RegexList) -> Value {
    match op {
        InfixOp::Contains => Value::Boolean(list.any_match(text)),
        // Not the negation of `contains`: true as soon as one pattern misses.
        InfixOp::NotContains => Value::Boolean(list.any_miss(text)),
        _ => invalid_operator(op, ValueType::Text, ValueType::RegexList),
    }
}
