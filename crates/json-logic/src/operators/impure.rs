//! The `log` operator: the one operator with an observable side effect.
//!
//! It evaluates its operand, emits it on the diagnostic sink, and passes
//! it through unchanged. The sink is a `tracing` event, so embedders (and
//! the CLI's `--verbose` flag) decide where the output lands; nothing is
//! ever written to stdout by the engine itself.

use crate::error::Error;
use crate::eval_ctx::EvalCtx;
use crate::evaluate;
use crate::types::{Arity, OperatorDefinition};
use serde_json::Value;
use std::sync::Arc;

fn log_eval(args: &[Value], ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let value = evaluate(&args[0], ctx)?;
    tracing::info!(target: "json_logic", "{}", value);
    Ok(value)
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![Arc::new(OperatorDefinition {
        name: "log",
        aliases: &[],
        arity: Arity::Fixed(1),
        eval_fn: log_eval,
        raw: false,
        impure: true,
    })]
}
