use thiserror::Error;

/// Errors raised while preparing a dominance analysis.
///
/// Task problems ([`DominanceError::InvalidTask`], [`DominanceError::UnsupportedTask`])
/// are detected at setup, before the fixpoint starts. [`DominanceError::SymbolicSizeExceeded`]
/// is recoverable: callers typically fall back to an explicit representation.
#[derive(Debug, Error)]
pub enum DominanceError {
    /// The task description is malformed (an index out of range, a factor
    /// without states, ...).
    #[error("invalid task: {reason}")]
    InvalidTask { reason: String },
    /// The task is well-formed but not supported by the dominance analysis.
    #[error("unsupported task: {reason}")]
    UnsupportedTask { reason: String },
    /// A symbolic operation exceeded the configured BDD node budget.
    #[error("symbolic representation exceeded the budget of {limit} BDD nodes")]
    SymbolicSizeExceeded { limit: usize },
}
