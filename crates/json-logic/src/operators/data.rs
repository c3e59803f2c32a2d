//! Data-access operators: `var`, `missing`, `missing_some`.
//!
//! All three are raw: their argument arrives unnormalized because the
//! array-vs-scalar shape is meaningful (`{"var": "a"}` names one key,
//! `{"var": ["a", 0]}` adds a default).

use crate::error::Error;
use crate::eval_ctx::EvalCtx;
use crate::evaluate;
use crate::types::{Arity, OperatorDefinition};
use crate::vars;
use serde_json::Value;
use std::sync::Arc;

/// `var`: resolve a key against the data, with an optional default.
///
/// The default is evaluated lazily, only on a miss. A null key returns the
/// whole data value even when a default is present.
fn var_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let (key_rule, default_rule) = match &args[0] {
        Value::Array(list) => match list.as_slice() {
            [] => return Ok(ctx.data.clone()),
            [key] => (key, None),
            [key, default, ..] => (key, Some(default)),
        },
        single => (single, None),
    };
    let key = evaluate(key_rule, ctx)?;
    match vars::resolve(ctx.data, &key)? {
        Some(value) => Ok(value),
        None => match default_rule {
            Some(rule) => evaluate(rule, ctx),
            None => Ok(Value::Null),
        },
    }
}

/// `missing`: the sub-list of keys that do not resolve against the data.
///
/// A non-array argument is evaluated first; an array result becomes the
/// key list (so `{"missing": {"merge": ...}}` works). When the first
/// element of an array argument is itself an array, that inner array is
/// the key list, matching the conformance suite.
fn missing_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let keys: Vec<Value> = match &args[0] {
        Value::Array(list) => {
            let evaluated = list
                .iter()
                .map(|rule| evaluate(rule, ctx))
                .collect::<Result<Vec<Value>, Error>>()?;
            match evaluated.split_first() {
                Some((Value::Array(inner), _)) => inner.clone(),
                _ => evaluated,
            }
        }
        single => match evaluate(single, ctx)? {
            Value::Array(list) => list,
            other => vec![other],
        },
    };
    vars::resolve_missing(ctx.data, &keys).map(Value::Array)
}

/// `missing_some`: like `missing`, but the result collapses to an empty
/// array once at least the threshold number of keys resolve.
fn missing_some_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let pair = match &args[0] {
        Value::Array(list) if list.len() == 2 => list,
        _ => {
            return Err(Error::ArityError(
                "\"missing_some\" operator expects 2 operands.".to_string(),
            ))
        }
    };
    let threshold = match evaluate(&pair[0], ctx)? {
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
    .ok_or_else(|| {
        Error::InvalidRuleShape(
            "The missing_some threshold must be a non-negative integer.".to_string(),
        )
    })?;
    let keys = match evaluate(&pair[1], ctx)? {
        Value::Array(keys) => keys,
        other => {
            return Err(Error::InvalidRuleShape(format!(
                "The missing_some key list must be an array, got {}.",
                other
            )))
        }
    };
    vars::resolve_missing_some(ctx.data, threshold, &keys).map(Value::Array)
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "var",
            aliases: &[],
            arity: Arity::Any,
            eval_fn: var_eval,
            raw: true,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "missing",
            aliases: &[],
            arity: Arity::Any,
            eval_fn: missing_eval,
            raw: true,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "missing_some",
            aliases: &[],
            arity: Arity::Any,
            eval_fn: missing_some_eval,
            raw: true,
            impure: false,
        }),
    ]
}
