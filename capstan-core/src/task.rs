//! Task contract
//!
//! A task is one unit of work within a workflow stage. The host engine
//! invokes it, possibly repeatedly, under its own retry/backoff/timeout
//! policy; the task only reports how the workflow should continue.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::WorkflowContext;

/// How the workflow should continue after a task invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// The task completed; the engine moves on to the next task.
    Succeeded,
    /// The task failed, but sibling operations in the same batch should
    /// still be attempted.
    FailedContinue,
    /// The task failed and the workflow must halt.
    Terminal,
}

/// The outcome of one task invocation
///
/// The engine merges `outputs` back into the execution's context so
/// downstream stages can read them.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    pub status: ExecutionStatus,
    pub outputs: Map<String, Value>,
}

impl TaskResult {
    /// Creates a result with the given status and no outputs
    pub fn new(status: ExecutionStatus) -> Self {
        Self {
            status,
            outputs: Map::new(),
        }
    }

    /// Creates a result carrying output values for downstream stages
    pub fn with_outputs(status: ExecutionStatus, outputs: Map<String, Value>) -> Self {
        Self { status, outputs }
    }
}

/// Errors that abort a task invocation outright
///
/// These are distinct from failure *outcomes*: a backend that answers with a
/// non-success status still produces a `TaskResult`, while the errors below
/// mean the task could not run at all and the engine should not retry.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The backing integration is disabled or was never configured.
    #[error("pipeline store is not enabled, no way to save pipeline; set store.enabled: true")]
    StoreDisabled,

    /// A context key the task requires was not provided.
    #[error("required context key `{0}` is missing")]
    MissingContext(String),

    /// A context value was present but unusable.
    #[error("invalid context value for `{key}`: {reason}")]
    InvalidContext { key: String, reason: String },

    /// A backend call failed at the transport level.
    #[error("pipeline store call failed")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TaskError {
    /// Wraps a transport-level backend failure
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(err))
    }
}

/// A single workflow task
#[async_trait]
pub trait Task: Send + Sync {
    /// Executes the task against the given workflow context
    async fn execute(&self, context: &mut WorkflowContext) -> Result<TaskResult, TaskError>;
}

/// A task the engine may re-invoke until it succeeds or times out
///
/// The task itself performs no retry loop; it declares the pacing and the
/// engine drives re-invocations, serialized per execution.
pub trait RetryableTask: Task {
    /// How long the engine should wait between re-invocations
    fn backoff_period(&self) -> Duration;

    /// Total time after which the engine must give up and fail the stage
    fn timeout(&self) -> Duration;
}
