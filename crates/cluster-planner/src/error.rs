//! Planner error types.

use thiserror::Error;

/// Result type alias for planning operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Errors that can occur while generating a deployment plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("no nodes configured to deploy to")]
    NoNodes,
}
