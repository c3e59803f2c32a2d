//! The evaluation entry points and the recursive dispatch core.

use crate::error::Error;
use crate::eval_ctx::EvalCtx;
use crate::operators::operators_map;
use crate::types::{assert_arity, OperatorMap};
use serde_json::Value;
use std::sync::OnceLock;

/// The shared default operator registry, built once on first use and
/// read-only thereafter.
pub fn default_operators() -> &'static OperatorMap {
    static OPERATORS: OnceLock<OperatorMap> = OnceLock::new();
    OPERATORS.get_or_init(operators_map)
}

/// Applies a JsonLogic rule to a data context.
///
/// This is the primary boundary: both arguments are plain JSON values and
/// the result is a new JSON value. Callers needing a custom registry or
/// depth limit build an [`EvalCtx`] and call [`evaluate`] directly.
pub fn apply(rule: &Value, data: &Value) -> Result<Value, Error> {
    evaluate(rule, &EvalCtx::new(data, default_operators()))
}

/// Applies a rule to data over JSON-encoded strings.
///
/// An absent `data` argument is treated as JSON null. Malformed input
/// surfaces as [`Error::InvalidJson`]; the result is the compact JSON
/// encoding of the evaluated value.
pub fn apply_str(logic: &str, data: Option<&str>) -> Result<String, Error> {
    let rule: Value = serde_json::from_str(logic)
        .map_err(|e| Error::InvalidJson(format!("Could not parse logic as JSON: {}", e)))?;
    let data: Value = match data {
        Some(s) => serde_json::from_str(s)
            .map_err(|e| Error::InvalidJson(format!("Could not parse data as JSON: {}", e)))?,
        None => Value::Null,
    };
    let result = apply(&rule, &data)?;
    Ok(result.to_string())
}

/// Evaluates a rule within an evaluation frame.
///
/// - Scalars, empty objects, and multi-key objects are literals and pass
///   through unchanged.
/// - Arrays evaluate element-wise against the same data.
/// - A single-key object is an operator application: the key is looked up
///   in the registry, the argument value is normalized to an operand list
///   (unless the operator is raw), and the operator's eval function
///   receives the unevaluated operands to recurse as its semantics demand.
pub fn evaluate(rule: &Value, ctx: &EvalCtx<'_>) -> Result<Value, Error> {
    let ctx = ctx.descend()?;
    match rule {
        Value::Array(items) => items
            .iter()
            .map(|item| evaluate(item, &ctx))
            .collect::<Result<Vec<Value>, Error>>()
            .map(Value::Array),
        Value::Object(map) if map.len() == 1 => {
            // Unwrap is fine: the map has exactly one entry.
            let (op_key, arg) = map.iter().next().unwrap();
            let def = ctx
                .operators
                .get(op_key)
                .ok_or_else(|| Error::UnknownOperator(op_key.clone()))?;
            let args: &[Value] = if def.raw {
                // Raw operators see their argument unnormalized; the
                // array-vs-scalar shape carries meaning for them.
                std::slice::from_ref(arg)
            } else {
                match arg {
                    Value::Array(list) => list,
                    single => std::slice::from_ref(single),
                }
            };
            assert_arity(def.name, &def.arity, args.len())?;
            (def.eval_fn)(args, &ctx)
        }
        literal => Ok(literal.clone()),
    }
}
