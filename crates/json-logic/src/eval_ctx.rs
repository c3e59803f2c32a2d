use crate::error::Error;
use crate::types::OperatorMap;
use serde_json::Value;

/// Default recursion depth limit for nested rules.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// The evaluation frame passed to every operator eval function.
///
/// Frames are cheap copies borrowing the data context and the registry;
/// combinators derive per-element frames with [`EvalCtx::rebind`] and
/// discard them when the sub-evaluation returns.
#[derive(Clone, Copy)]
pub struct EvalCtx<'a> {
    /// The data context that `var` and friends resolve against.
    pub data: &'a Value,
    /// The operator map used for recursive evaluation.
    pub operators: &'a OperatorMap,
    depth: usize,
    max_depth: usize,
}

impl<'a> EvalCtx<'a> {
    pub fn new(data: &'a Value, operators: &'a OperatorMap) -> Self {
        EvalCtx {
            data,
            operators,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// One recursion level deeper, or `DepthExceeded` at the limit.
    pub(crate) fn descend(&self) -> Result<EvalCtx<'a>, Error> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthExceeded(self.max_depth));
        }
        Ok(EvalCtx {
            depth: self.depth + 1,
            ..*self
        })
    }

    /// The same frame with `data` rebound, for per-element combinator
    /// evaluation. Depth carries over: element sub-rules keep counting
    /// against the same limit.
    pub fn rebind<'b>(&self, data: &'b Value) -> EvalCtx<'b>
    where
        'a: 'b,
    {
        EvalCtx {
            data,
            operators: self.operators,
            depth: self.depth,
            max_depth: self.max_depth,
        }
    }
}
