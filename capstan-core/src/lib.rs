//! Capstan Core
//!
//! Core types and abstractions for Capstan workflow tasks.
//!
//! This crate contains:
//! - The workflow context view a task receives per execution
//! - The pipeline document wrapper with typed field access
//! - The task contract: `Task`, `RetryableTask`, `TaskResult`, `TaskError`

pub mod context;
pub mod document;
pub mod task;

pub use context::WorkflowContext;
pub use document::PipelineDocument;
pub use task::{ExecutionStatus, RetryableTask, Task, TaskError, TaskResult};
