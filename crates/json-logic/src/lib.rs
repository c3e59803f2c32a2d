//! JsonLogic rule engine.
//!
//! # Overview
//!
//! This crate evaluates JsonLogic rules: JSON values where a single-key
//! object like `{"==": [{"var": "a"}, 1]}` applies an operator, arrays
//! evaluate element-wise, and everything else is literal data. Evaluation
//! is a pure function of the rule and the data context; the only side
//! effect in the whole operator set is the diagnostic `log` operator.
//!
//! # Example
//!
//! ```
//! use json_logic::apply;
//! use serde_json::json;
//!
//! let rule = json!({"if": [
//!     {"<": [{"var": "temp"}, 0]}, "frozen",
//!     {"<": [{"var": "temp"}, 100]}, "liquid",
//!     "gas"
//! ]});
//! let result = apply(&rule, &json!({"temp": 55})).unwrap();
//!
//! assert_eq!(result, json!("liquid"));
//! ```
//!
//! Callers needing a custom depth limit (or registry) build an
//! [`EvalCtx`] and call [`evaluate`] directly:
//!
//! ```
//! use json_logic::{default_operators, evaluate, EvalCtx};
//! use serde_json::json;
//!
//! let data = json!(null);
//! let ctx = EvalCtx::new(&data, default_operators()).with_max_depth(8);
//! let result = evaluate(&json!({"+": [1, 2]}), &ctx).unwrap();
//!
//! assert_eq!(result, json!(3));
//! ```

pub mod apply;
pub mod error;
pub mod eval_ctx;
pub mod operators;
pub mod types;
pub mod util;
pub mod vars;

// Re-export the core public API
pub use apply::{apply, apply_str, default_operators, evaluate};
pub use error::Error;
pub use eval_ctx::{EvalCtx, DEFAULT_MAX_DEPTH};
pub use operators::{all_operators, operators_map};
pub use types::{Arity, OperatorDefinition, OperatorMap};
