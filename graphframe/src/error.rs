use graphframe_core::CoreError;

use crate::write_plan::PlanState;

/// An execution-collaborator failure (§7's `ExecutionError`): any failure
/// originating beyond compilation, surfaced with the offending statement
/// text and parameter *names* attached for diagnosis — never the bound
/// values, to avoid leaking secrets.
#[derive(Debug, thiserror::Error)]
#[error("execution failed for statement `{statement}`")]
pub struct ExecutionError {
    /// The compiled statement text that was submitted.
    pub statement: String,
    /// The names (not values) of the parameters that were bound.
    pub parameter_names: Vec<String>,
    /// The underlying driver failure.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// The facade's top-level error type: either a compile-time failure from
/// the core (§7's taxonomy), an execution failure from the collaborator, or
/// an attempt to commit an already-finalized write plan (P5).
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A validation failure raised while compiling a description.
    #[error(transparent)]
    Compile(#[from] CoreError),
    /// A failure returned by the execution collaborator.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    /// `commit` was called on a plan already in a terminal state.
    /// Per P5, `commit` is permitted at most once.
    #[error("write plan already finalized in state {state:?}; commit is permitted at most once")]
    PlanFinalized {
        /// The plan's terminal state at the time of the rejected call.
        state: PlanState,
    },
}
