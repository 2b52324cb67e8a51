//! Capstan Store Client
//!
//! Client for the pipeline persistence backend.
//!
//! The backend owns durable pipeline definitions per application. Tasks talk
//! to it through the [`PipelineStore`] trait so their logic stays independent
//! of the wire; [`HttpPipelineStore`] is the production implementation.
//!
//! # Example
//!
//! ```no_run
//! use capstan_store::{HttpPipelineStore, PipelineStore};
//! use capstan_core::PipelineDocument;
//! use serde_json::Map;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), capstan_store::StoreError> {
//!     let store = HttpPipelineStore::new("http://localhost:8080");
//!
//!     let pipeline = PipelineDocument::new(Map::new());
//!     let response = store.save_pipeline(&pipeline, false).await?;
//!
//!     println!("save answered with status {}", response.status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod http;

pub use error::{Result, StoreError};
pub use http::HttpPipelineStore;

use async_trait::async_trait;
use capstan_core::PipelineDocument;

/// The raw answer to a save submission
///
/// Non-success statuses are not errors at this layer: the caller decides how
/// a failed save propagates (a batch save tolerates individual failures, a
/// single save does not), so the status code and body pass through verbatim.
#[derive(Debug, Clone)]
pub struct SaveResponse {
    /// HTTP status code from the backend
    pub status: u16,
    /// Raw response body; usually the persisted document as JSON
    pub body: String,
}

/// Store trait for pipeline persistence operations
#[async_trait]
pub trait PipelineStore: Send + Sync {
    /// Creates or updates a pipeline definition
    ///
    /// Submits the document as-is. With `stale_check` set, the backend
    /// rejects writes based on an out-of-date version of the document.
    ///
    /// Only transport-level failures are errors; a backend rejection comes
    /// back as a [`SaveResponse`] with its non-success status.
    async fn save_pipeline(
        &self,
        pipeline: &PipelineDocument,
        stale_check: bool,
    ) -> Result<SaveResponse>;

    /// Lists all pipeline definitions persisted for an application
    async fn get_pipelines(&self, application: &str) -> Result<Vec<PipelineDocument>>;
}
