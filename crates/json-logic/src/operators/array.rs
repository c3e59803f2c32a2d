//! Collection combinators: `merge`, `in`, and the operators that rebind
//! the data context per element (`map`, `filter`, `reduce`, `all`,
//! `some`, `none`).
//!
//! `all`/`some`/`none` also accept strings, scanned as arrays of
//! one-character strings. Any other input shape degrades to an empty
//! collection rather than erroring.

use crate::error::Error;
use crate::eval_ctx::EvalCtx;
use crate::evaluate;
use crate::types::{Arity, OperatorDefinition};
use crate::util;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Evaluates a combinator's collection operand. Non-arrays are empty.
fn eval_items(rule: &Value, ctx: &EvalCtx<'_>) -> Result<Vec<Value>, Error> {
    Ok(match evaluate(rule, ctx)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

/// Like `eval_items`, but strings scan as character collections.
fn eval_scan_items(rule: &Value, ctx: &EvalCtx<'_>) -> Result<Vec<Value>, Error> {
    Ok(match evaluate(rule, ctx)? {
        Value::Array(items) => items,
        Value::String(s) => s.chars().map(|c| Value::String(c.to_string())).collect(),
        _ => Vec::new(),
    })
}

fn merge_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let mut merged = Vec::new();
    for arg in args {
        match evaluate(arg, ctx)? {
            // One level only: nested arrays inside stay intact.
            Value::Array(items) => merged.extend(items),
            other => merged.push(other),
        }
    }
    Ok(Value::Array(merged))
}

/// `in`: substring containment for string haystacks, loose-equality
/// membership for array haystacks. A null haystack contains nothing.
fn in_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let needle = evaluate(&args[0], ctx)?;
    let haystack = evaluate(&args[1], ctx)?;
    match haystack {
        Value::Null => Ok(Value::Bool(false)),
        Value::String(s) => Ok(Value::Bool(s.contains(&util::str_val(&needle)))),
        Value::Array(items) => Ok(Value::Bool(
            items.iter().any(|item| util::equals_loose(item, &needle)),
        )),
        other => Err(Error::InvalidRuleShape(format!(
            "The second operand of \"in\" must be an array, string, or null, got {}.",
            other
        ))),
    }
}

fn map_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let items = eval_items(&args[0], ctx)?;
    items
        .iter()
        .map(|item| evaluate(&args[1], &ctx.rebind(item)))
        .collect::<Result<Vec<Value>, Error>>()
        .map(Value::Array)
}

fn filter_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let items = eval_items(&args[0], ctx)?;
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        let verdict = evaluate(&args[1], &ctx.rebind(&item))?;
        if util::truthy(&verdict) {
            kept.push(item);
        }
    }
    Ok(Value::Array(kept))
}

/// `reduce`: left fold, each step seeing `{"current": element,
/// "accumulator": running}` as its data. An empty collection returns the
/// evaluated initial value untouched.
fn reduce_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let items = eval_items(&args[0], ctx)?;
    let initial = evaluate(&args[2], ctx)?;
    items.into_iter().try_fold(initial, |accumulator, current| {
        let mut frame = Map::with_capacity(2);
        frame.insert("current".to_string(), current);
        frame.insert("accumulator".to_string(), accumulator);
        let frame = Value::Object(frame);
        evaluate(&args[1], &ctx.rebind(&frame))
    })
}

fn all_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let items = eval_scan_items(&args[0], ctx)?;
    // The empty collection is false, per the upstream convention.
    if items.is_empty() {
        return Ok(Value::Bool(false));
    }
    for item in &items {
        let verdict = evaluate(&args[1], &ctx.rebind(item))?;
        if !util::truthy(&verdict) {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn some_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let items = eval_scan_items(&args[0], ctx)?;
    for item in &items {
        let verdict = evaluate(&args[1], &ctx.rebind(item))?;
        if util::truthy(&verdict) {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

fn none_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let had_some = some_eval(args, ctx)?;
    Ok(Value::Bool(!util::truthy(&had_some)))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "merge",
            aliases: &[],
            arity: Arity::Any,
            eval_fn: merge_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "in",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: in_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "map",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: map_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "filter",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: filter_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "reduce",
            aliases: &[],
            arity: Arity::Fixed(3),
            eval_fn: reduce_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "all",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: all_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "some",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: some_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "none",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: none_eval,
            raw: false,
            impure: false,
        }),
    ]
}
