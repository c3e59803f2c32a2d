//! Arithmetic operators, all fail-fast through `util::to_number`: an
//! operand with no numeric reading aborts the whole evaluation.
//!
//! Non-finite results (division by zero, min of nothing) have no JSON
//! encoding and come back as null via `util::num_to_value`.

use crate::error::Error;
use crate::eval_ctx::EvalCtx;
use crate::evaluate;
use crate::types::{Arity, OperatorDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn add_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    args.iter()
        .try_fold(0.0f64, |acc, arg| {
            Ok(acc + util::to_number(&evaluate(arg, ctx)?)?)
        })
        .map(util::num_to_value)
}

fn subtract_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let first = util::to_number(&evaluate(&args[0], ctx)?)?;
    if args.len() == 1 {
        // Unary minus.
        return Ok(util::num_to_value(-first));
    }
    let second = util::to_number(&evaluate(&args[1], ctx)?)?;
    Ok(util::num_to_value(first - second))
}

fn multiply_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    args.iter()
        .try_fold(1.0f64, |acc, arg| {
            Ok(acc * util::to_number(&evaluate(arg, ctx)?)?)
        })
        .map(util::num_to_value)
}

fn divide_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let numerator = util::to_number(&evaluate(&args[0], ctx)?)?;
    let denominator = util::to_number(&evaluate(&args[1], ctx)?)?;
    Ok(util::num_to_value(numerator / denominator))
}

fn modulo_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let left = util::to_number(&evaluate(&args[0], ctx)?)?;
    let right = util::to_number(&evaluate(&args[1], ctx)?)?;
    Ok(util::num_to_value(left % right))
}

fn min_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    args.iter()
        .try_fold(f64::INFINITY, |acc, arg| {
            Ok(acc.min(util::to_number(&evaluate(arg, ctx)?)?))
        })
        .map(util::num_to_value)
}

fn max_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    args.iter()
        .try_fold(f64::NEG_INFINITY, |acc, arg| {
            Ok(acc.max(util::to_number(&evaluate(arg, ctx)?)?))
        })
        .map(util::num_to_value)
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "+",
            aliases: &[],
            // Zero operands is an empty sum; one operand is a numeric cast.
            arity: Arity::Any,
            eval_fn: add_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "-",
            aliases: &[],
            arity: Arity::Range(1, Some(2)),
            eval_fn: subtract_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "*",
            aliases: &[],
            arity: Arity::Range(1, None),
            eval_fn: multiply_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "/",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: divide_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "%",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: modulo_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "min",
            aliases: &[],
            arity: Arity::Range(1, None),
            eval_fn: min_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "max",
            aliases: &[],
            arity: Arity::Range(1, None),
            eval_fn: max_eval,
            raw: false,
            impure: false,
        }),
    ]
}
