//! Save-pipeline task
//!
//! One task invocation takes the candidate pipeline from the workflow
//! context, reconciles stateful fields against the persisted version,
//! applies registered mutators, submits the document to the store, and
//! reports how the workflow should continue.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use capstan_core::{
    ExecutionStatus, PipelineDocument, RetryableTask, Task, TaskError, TaskResult, WorkflowContext,
};
use capstan_store::PipelineStore;
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::config::TaskConfig;
use crate::mutator::{PipelineModelMutator, apply_mutators};
use crate::outcome::classify;
use crate::resolver::fetch_existing_pipeline;
use crate::service_account::update_service_account;

/// Fixed delay between host-engine-driven re-invocations
const BACKOFF_PERIOD: Duration = Duration::from_millis(1000);

/// The pipeline-definition persistence task
///
/// Both collaborators are injected at construction. An absent store means
/// the backend integration is disabled and every invocation fails with
/// [`TaskError::StoreDisabled`]. The mutator registry is read-only, so one
/// task instance is safe to share across concurrent executions.
pub struct SavePipelineTask {
    store: Option<Arc<dyn PipelineStore>>,
    mutators: Vec<Arc<dyn PipelineModelMutator>>,
    config: TaskConfig,
}

impl SavePipelineTask {
    /// Creates a new save-pipeline task
    ///
    /// # Arguments
    /// * `store` - The persistence backend, or `None` when disabled
    /// * `mutators` - Document transformations, applied in order
    /// * `config` - Timeout configuration
    pub fn new(
        store: Option<Arc<dyn PipelineStore>>,
        mutators: Vec<Arc<dyn PipelineModelMutator>>,
        config: TaskConfig,
    ) -> Self {
        Self {
            store,
            mutators,
            config,
        }
    }

    /// Extracts the candidate document from the context
    ///
    /// The `pipeline` key holds either the document inline or a
    /// base64-encoded JSON string placed there by an upstream stage.
    fn extract_pipeline(context: &WorkflowContext) -> Result<PipelineDocument, TaskError> {
        match context.get("pipeline") {
            Some(Value::Object(fields)) => Ok(PipelineDocument::new(fields.clone())),
            Some(Value::String(_)) => Ok(PipelineDocument::new(
                context.decode_base64_map("pipeline")?,
            )),
            Some(other) => Err(TaskError::InvalidContext {
                key: "pipeline".to_string(),
                reason: format!("expected an object or encoded string, got {other}"),
            }),
            None => Err(TaskError::MissingContext("pipeline".to_string())),
        }
    }
}

#[async_trait]
impl Task for SavePipelineTask {
    async fn execute(&self, context: &mut WorkflowContext) -> Result<TaskResult, TaskError> {
        debug!("starting save pipeline task");

        let store = self.store.as_deref().ok_or(TaskError::StoreDisabled)?;

        let mut pipeline = Self::extract_pipeline(context)?;

        // The ordering index belongs to the store; carry it forward from the
        // persisted version when the caller did not supply one.
        if pipeline.index().is_none() {
            let existing = fetch_existing_pipeline(store, &pipeline)
                .await
                .map_err(TaskError::store)?;
            if let Some(index) = existing.as_ref().and_then(PipelineDocument::index) {
                pipeline.set_index(index.clone());
            }
        }

        if let Some(service_account) = context.get_str("pipeline.serviceAccount") {
            update_service_account(&mut pipeline, service_account);
        }

        let saving_multiple = context.get_bool_or("isSavingMultiplePipelines", false);
        let stale_check = context.get_bool_or("staleCheck", false);

        if let Some(id) = context.get("pipeline.id").filter(|id| !id.is_null()) {
            let candidate_has_id = pipeline.get("id").is_some_and(|id| !id.is_null());
            if !candidate_has_id && !saving_multiple {
                pipeline.insert("id", id.clone());

                // The store must re-key trigger identifiers derived from the
                // adopted pipeline id.
                pipeline.insert("regenerateCronTriggerIds", json!(true));
            }
        }

        apply_mutators(&self.mutators, &mut pipeline);

        let response = store
            .save_pipeline(&pipeline, stale_check)
            .await
            .map_err(TaskError::store)?;

        let mut outputs = Map::new();
        outputs.insert("notification.type".to_string(), json!("savepipeline"));
        outputs.insert(
            "application".to_string(),
            pipeline.get("application").cloned().unwrap_or(Value::Null),
        );
        outputs.insert(
            "pipeline.name".to_string(),
            pipeline.get("name").cloned().unwrap_or(Value::Null),
        );

        match serde_json::from_str::<Map<String, Value>>(&response.body) {
            Ok(saved) => {
                outputs.insert(
                    "pipeline.id".to_string(),
                    saved.get("id").cloned().unwrap_or(Value::Null),
                );
            }
            Err(e) => {
                // The write likely succeeded server-side; falling back to the
                // candidate's own id keeps downstream stages working.
                warn!("unable to deserialize saved pipeline: {}", e);
                if let Some(id) = pipeline.get("id") {
                    outputs.insert("pipeline.id".to_string(), id.clone());
                }
            }
        }

        let status = classify(response.status, saving_multiple);

        info!(
            "application {} save pipeline {} finished with status {:?}",
            pipeline.application().unwrap_or("<unknown>"),
            pipeline.name().unwrap_or("<unnamed>"),
            status,
        );

        Ok(TaskResult::with_outputs(status, outputs))
    }
}

impl RetryableTask for SavePipelineTask {
    fn backoff_period(&self) -> Duration {
        BACKOFF_PERIOD
    }

    fn timeout(&self) -> Duration {
        self.config.timeout
    }
}
