//! Logical operators: `and`, `or`, `!`, `!!`, and the `if`/`?:` chain.
//!
//! `and` and `or` return operand values, not boolean casts, and evaluate
//! lazily left to right: operands past the deciding one are never touched.

use crate::error::Error;
use crate::eval_ctx::EvalCtx;
use crate::evaluate;
use crate::types::{Arity, OperatorDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn and_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let mut acc = evaluate(&args[0], ctx)?;
    for arg in &args[1..] {
        if !util::truthy(&acc) {
            return Ok(acc);
        }
        acc = evaluate(arg, ctx)?;
    }
    Ok(acc)
}

fn or_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let mut acc = evaluate(&args[0], ctx)?;
    for arg in &args[1..] {
        if util::truthy(&acc) {
            return Ok(acc);
        }
        acc = evaluate(arg, ctx)?;
    }
    Ok(acc)
}

fn not_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let val = evaluate(&args[0], ctx)?;
    Ok(Value::Bool(!util::truthy(&val)))
}

fn not_not_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let val = evaluate(&args[0], ctx)?;
    Ok(Value::Bool(util::truthy(&val)))
}

/// The if/else-if chain: (cond1, then1, cond2, then2, ..., else?).
///
/// Conditions evaluate in order until one is truthy, whose paired branch
/// is the result. A trailing odd argument is the else; without one the
/// fallen-through chain yields null. Untaken branches are never evaluated.
fn if_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let mut i = 0;
    while i + 1 < args.len() {
        let condition = evaluate(&args[i], ctx)?;
        if util::truthy(&condition) {
            return evaluate(&args[i + 1], ctx);
        }
        i += 2;
    }
    match args.get(i) {
        Some(fallback) => evaluate(fallback, ctx),
        None => Ok(Value::Null),
    }
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "and",
            aliases: &[],
            arity: Arity::Range(1, None),
            eval_fn: and_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "or",
            aliases: &[],
            arity: Arity::Range(1, None),
            eval_fn: or_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "!",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: not_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "!!",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: not_not_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "if",
            aliases: &["?:"],
            arity: Arity::Any,
            eval_fn: if_eval,
            raw: false,
            impure: false,
        }),
    ]
}
