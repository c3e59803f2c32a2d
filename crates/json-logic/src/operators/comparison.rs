//! Comparison operators: loose and strict equality, ordered comparisons,
//! and the three-argument "between" forms (`a < b < c` reads as
//! `a<b && b<c`, with the upper bound evaluated only if the lower holds).

use crate::error::Error;
use crate::eval_ctx::EvalCtx;
use crate::evaluate;
use crate::types::{Arity, OperatorDefinition};
use crate::util;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

fn eq_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let left = evaluate(&args[0], ctx)?;
    let right = evaluate(&args[1], ctx)?;
    Ok(Value::Bool(util::equals_loose(&left, &right)))
}

fn ne_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let left = evaluate(&args[0], ctx)?;
    let right = evaluate(&args[1], ctx)?;
    Ok(Value::Bool(!util::equals_loose(&left, &right)))
}

fn strict_eq_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let left = evaluate(&args[0], ctx)?;
    let right = evaluate(&args[1], ctx)?;
    Ok(Value::Bool(util::equals_strict(&left, &right)))
}

fn strict_ne_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let left = evaluate(&args[0], ctx)?;
    let right = evaluate(&args[1], ctx)?;
    Ok(Value::Bool(!util::equals_strict(&left, &right)))
}

/// Shared two- or three-operand comparison chain.
fn compare_chain(
    args: &[Value],
    ctx: &EvalCtx<'_>,
    test: fn(Ordering) -> bool,
) -> Result<Value, Error> {
    let a = evaluate(&args[0], ctx)?;
    let b = evaluate(&args[1], ctx)?;
    if !test(util::compare_ordered(&a, &b)?) {
        return Ok(Value::Bool(false));
    }
    if let Some(upper) = args.get(2) {
        let c = evaluate(upper, ctx)?;
        return Ok(Value::Bool(test(util::compare_ordered(&b, &c)?)));
    }
    Ok(Value::Bool(true))
}

fn lt_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    compare_chain(args, ctx, Ordering::is_lt)
}

fn le_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    compare_chain(args, ctx, Ordering::is_le)
}

fn gt_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    compare_chain(args, ctx, Ordering::is_gt)
}

fn ge_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    compare_chain(args, ctx, Ordering::is_ge)
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "==",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: eq_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "!=",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: ne_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "===",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: strict_eq_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "!==",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: strict_ne_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "<",
            aliases: &[],
            arity: Arity::Range(2, Some(3)),
            eval_fn: lt_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "<=",
            aliases: &[],
            arity: Arity::Range(2, Some(3)),
            eval_fn: le_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: ">",
            aliases: &[],
            arity: Arity::Range(2, Some(3)),
            eval_fn: gt_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: ">=",
            aliases: &[],
            arity: Arity::Range(2, Some(3)),
            eval_fn: ge_eval,
            raw: false,
            impure: false,
        }),
    ]
}
