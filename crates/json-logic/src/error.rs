use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A single-key object whose key is not a registered operator.
    #[error("Unknown operator: {0:?}")]
    UnknownOperator(String),

    #[error("{0}")]
    CoercionError(String),

    #[error("{0}")]
    ArityError(String),

    #[error("Recursion depth limit of {0} exceeded.")]
    DepthExceeded(usize),

    #[error("{0}")]
    InvalidRuleShape(String),

    /// Serialized-boundary input that is not valid JSON. Never produced
    /// by evaluation itself.
    #[error("{0}")]
    InvalidJson(String),
}
