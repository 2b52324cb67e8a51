//! HTTP implementation of the pipeline store

use capstan_core::PipelineDocument;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::{PipelineStore, SaveResponse};

/// HTTP client for the pipeline persistence backend
#[derive(Debug, Clone)]
pub struct HttpPipelineStore {
    /// Base URL of the store (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl HttpPipelineStore {
    /// Creates a new store client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the store API (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Creates a new store client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc. The
    /// transport-level deadline for in-flight calls belongs to this client;
    /// the task layer never cancels a call mid-flight.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the store API
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the store
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl PipelineStore for HttpPipelineStore {
    async fn save_pipeline(
        &self,
        pipeline: &PipelineDocument,
        stale_check: bool,
    ) -> Result<SaveResponse> {
        let url = format!("{}/pipelines", self.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("staleCheck", stale_check)])
            .json(pipeline.as_map())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("save_pipeline answered with status {}", status);

        Ok(SaveResponse { status, body })
    }

    async fn get_pipelines(&self, application: &str) -> Result<Vec<PipelineDocument>> {
        let url = format!("{}/pipelines/{}", self.base_url, application);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::api_error(status.as_u16(), message));
        }

        let documents = response
            .json::<Vec<Map<String, Value>>>()
            .await
            .map_err(|e| StoreError::ParseError(format!("pipeline list: {e}")))?;

        Ok(documents.into_iter().map(PipelineDocument::new).collect())
    }
}
