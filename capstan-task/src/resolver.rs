//! Existing-pipeline resolution
//!
//! Looks up the previously persisted version of a candidate document so
//! backend-owned state (the ordering `index`) can be carried forward on
//! update.

use capstan_core::PipelineDocument;
use capstan_store::{PipelineStore, Result};
use tracing::debug;

/// Fetches the persisted counterpart of a candidate document, if any
///
/// A candidate without an `id` (or without an `application`) is a create,
/// not an update, so there is nothing to resolve and no backend call is
/// made. "Not found" is a normal answer, never an error; only transport
/// failures propagate.
pub async fn fetch_existing_pipeline(
    store: &dyn PipelineStore,
    candidate: &PipelineDocument,
) -> Result<Option<PipelineDocument>> {
    let Some(id) = candidate.id().filter(|id| !id.is_empty()) else {
        return Ok(None);
    };
    let Some(application) = candidate.application() else {
        return Ok(None);
    };

    debug!("resolving existing pipeline {} in {}", id, application);

    let existing = store
        .get_pipelines(application)
        .await?
        .into_iter()
        .find(|pipeline| pipeline.id() == Some(id));

    Ok(existing)
}
