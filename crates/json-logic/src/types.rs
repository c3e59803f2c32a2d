use crate::error::Error;
use crate::eval_ctx::EvalCtx;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Operator arity, checked against the normalized argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    /// Skip the arity check.
    Any,
    /// Exactly `n` operands.
    Fixed(usize),
    /// Between `min` and `max` operands. `None` for max = unlimited.
    Range(usize, Option<usize>),
}

/// The type of an operator evaluation function.
///
/// `args` is the operator's argument list, already normalized unless the
/// operator is marked `raw` (in which case `args` has exactly one element:
/// the unnormalized argument value). Operands are unevaluated rules; the
/// implementation calls back into [`crate::evaluate`] for the ones it needs,
/// in the order its semantics require.
pub type EvalFn = for<'a> fn(&[Value], &EvalCtx<'a>) -> Result<Value, Error>;

/// An operator definition.
pub struct OperatorDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: Arity,
    pub eval_fn: EvalFn,
    /// Receives its argument value unnormalized; the array-vs-scalar shape
    /// is meaningful (`var`, `missing`, `missing_some`).
    pub raw: bool,
    /// Has an observable side effect (`log`).
    pub impure: bool,
}

/// Map of operator name/alias -> definition.
pub type OperatorMap = HashMap<String, Arc<OperatorDefinition>>;

/// Asserts that an operator received the correct number of operands.
pub fn assert_arity(operator: &str, arity: &Arity, num_args: usize) -> Result<(), Error> {
    match arity {
        Arity::Any => Ok(()),
        Arity::Fixed(n) => {
            if num_args != *n {
                Err(Error::ArityError(format!(
                    "\"{}\" operator expects {} operands.",
                    operator, n
                )))
            } else {
                Ok(())
            }
        }
        Arity::Range(min, max) => {
            if num_args < *min {
                Err(Error::ArityError(format!(
                    "\"{}\" operator expects at least {} operands.",
                    operator, min
                )))
            } else if let Some(max) = max {
                if num_args > *max {
                    return Err(Error::ArityError(format!(
                        "\"{}\" operator expects at most {} operands.",
                        operator, max
                    )));
                }
                Ok(())
            } else {
                Ok(())
            }
        }
    }
}

/// Builds an `OperatorMap` from a list of operator definitions.
pub fn operators_to_map(operators: Vec<Arc<OperatorDefinition>>) -> OperatorMap {
    let mut map = HashMap::new();
    for op in operators {
        map.insert(op.name.to_string(), Arc::clone(&op));
        for alias in op.aliases {
            map.insert(alias.to_string(), Arc::clone(&op));
        }
    }
    map
}
