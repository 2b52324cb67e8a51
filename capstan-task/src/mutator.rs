//! Pipeline model mutators
//!
//! A mutator is a pluggable transformation applied to a candidate document
//! just before submission. Multiple mutators may be registered; the order of
//! registration is the order of application.

use std::sync::Arc;

use capstan_core::PipelineDocument;
use tracing::debug;

/// A pluggable document transformation
///
/// Implementations inspect a candidate document and optionally rewrite it in
/// place. The registry is read-only after construction, so implementations
/// must be safe to share across concurrent task invocations.
pub trait PipelineModelMutator: Send + Sync {
    /// Whether this mutator applies to the given document
    fn supports(&self, pipeline: &PipelineDocument) -> bool;

    /// Rewrites the document in place
    fn mutate(&self, pipeline: &mut PipelineDocument);
}

/// Applies every supporting mutator to the document, in registration order
pub fn apply_mutators(mutators: &[Arc<dyn PipelineModelMutator>], pipeline: &mut PipelineDocument) {
    for mutator in mutators {
        if mutator.supports(pipeline) {
            debug!("applying pipeline model mutator");
            mutator.mutate(pipeline);
        }
    }
}
