//! Operator definitions, grouped by family.

pub mod arithmetic;
pub mod array;
pub mod comparison;
pub mod data;
pub mod impure;
pub mod logic;
pub mod string;

use crate::types::{operators_to_map, OperatorDefinition, OperatorMap};
use std::sync::Arc;

/// All operators combined.
pub fn all_operators() -> Vec<Arc<OperatorDefinition>> {
    let mut ops = Vec::new();
    ops.extend(logic::operators());
    ops.extend(comparison::operators());
    ops.extend(arithmetic::operators());
    ops.extend(data::operators());
    ops.extend(array::operators());
    ops.extend(string::operators());
    ops.extend(impure::operators());
    ops
}

/// Build the operator map from all operators.
pub fn operators_map() -> OperatorMap {
    operators_to_map(all_operators())
}
