//! String operators: `cat` and `substr`.

use crate::error::Error;
use crate::eval_ctx::EvalCtx;
use crate::evaluate;
use crate::types::{Arity, OperatorDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn cat_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let mut out = String::new();
    for arg in args {
        out.push_str(&util::str_val(&evaluate(arg, ctx)?));
    }
    Ok(Value::String(out))
}

/// `substr(string, start, length?)` by character position. Negative start
/// counts from the end; negative length stops that many characters short
/// of the end.
fn substr_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let s = util::str_val(&evaluate(&args[0], ctx)?);
    let start = util::to_number(&evaluate(&args[1], ctx)?)? as i64;
    let length = match args.get(2) {
        Some(rule) => Some(util::to_number(&evaluate(rule, ctx)?)? as i64),
        None => None,
    };
    Ok(Value::String(util::substr_slice(&s, start, length)))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "cat",
            aliases: &[],
            arity: Arity::Any,
            eval_fn: cat_eval,
            raw: false,
            impure: false,
        }),
        Arc::new(OperatorDefinition {
            name: "substr",
            aliases: &[],
            arity: Arity::Range(2, Some(3)),
            eval_fn: substr_eval,
            raw: false,
            impure: false,
        }),
    ]
}
