//! Capstan Task
//!
//! The pipeline-definition persistence task and its collaborators.
//!
//! Architecture:
//! - Configuration: timeout settings loaded from environment or defaults
//! - Mutators: pluggable document transformations applied before submission
//! - Resolver: lookup of the previously persisted version of a document
//! - Service accounts: trigger ownership reconciliation
//! - Tasks: the save-pipeline executor wiring it all together
//!
//! The host workflow engine constructs [`SavePipelineTask`] once and invokes
//! it per execution under its own retry/backoff/timeout policy.

pub mod config;
pub mod mutator;
pub mod outcome;
pub mod resolver;
pub mod service_account;
pub mod tasks;

pub use config::TaskConfig;
pub use mutator::PipelineModelMutator;
pub use tasks::SavePipelineTask;
