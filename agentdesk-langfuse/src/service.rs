//! Prompt service wrapper.
//!
//! Each operation forwards to the backend, logs a failure, and hands the
//! same error back to the caller.

use std::sync::Arc;

use agentdesk_core::PromptServiceError;
use async_trait::async_trait;

use crate::types::{
    CreatePromptParams, IngestionBatch, IngestionResponse, Prompt, PromptList, TraceRef,
    UpdatePromptParams,
};

/// Raw operations of the hosted prompt service.
#[async_trait]
pub trait PromptBackend: Send + Sync {
    async fn create_prompt(&self, params: &CreatePromptParams) -> Result<Prompt, PromptServiceError>;

    /// Fetch a prompt by name; `None` selects the version labelled production.
    async fn get_prompt(&self, name: &str, version: Option<u32>) -> Result<Prompt, PromptServiceError>;

    async fn update_prompt_labels(
        &self,
        name: &str,
        version: u32,
        labels: &[String],
    ) -> Result<Prompt, PromptServiceError>;

    async fn delete_prompt(&self, name: &str) -> Result<(), PromptServiceError>;

    async fn list_prompts(&self) -> Result<PromptList, PromptServiceError>;

    async fn ingest(&self, batch: &IngestionBatch) -> Result<IngestionResponse, PromptServiceError>;
}

/// Pass-through wrapper over a [`PromptBackend`].
#[derive(Clone)]
pub struct PromptService {
    backend: Arc<dyn PromptBackend>,
}

impl PromptService {
    pub fn new(backend: Arc<dyn PromptBackend>) -> Self {
        Self { backend }
    }

    /// Create a new prompt.
    pub async fn create_prompt(&self, params: CreatePromptParams) -> Result<Prompt, PromptServiceError> {
        self.backend
            .create_prompt(&params)
            .await
            .inspect_err(|e| tracing::error!(error = %e, name = %params.name, "Error creating prompt"))
    }

    /// Get a prompt by its name.
    pub async fn get_prompt(&self, name: &str) -> Result<Prompt, PromptServiceError> {
        self.backend
            .get_prompt(name, None)
            .await
            .inspect_err(|e| tracing::error!(error = %e, prompt = name, "Error fetching prompt"))
    }

    /// Update an existing prompt version's labels.
    pub async fn update_prompt(&self, params: UpdatePromptParams) -> Result<Prompt, PromptServiceError> {
        self.backend
            .update_prompt_labels(&params.prompt_id, params.version, &params.labels)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, name = %params.prompt_id, version = params.version, "Error updating prompt")
            })
    }

    /// Delete a prompt by its name.
    pub async fn delete_prompt(&self, name: &str) -> Result<bool, PromptServiceError> {
        self.backend
            .delete_prompt(name)
            .await
            .inspect_err(|e| tracing::error!(error = %e, prompt = name, "Error deleting prompt"))?;
        Ok(true)
    }

    /// List all prompts.
    pub async fn list_prompts(&self) -> Result<PromptList, PromptServiceError> {
        self.backend
            .list_prompts()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error listing prompts"))
    }

    /// Get a specific version of a prompt.
    pub async fn get_prompt_version(&self, name: &str, version: u32) -> Result<Prompt, PromptServiceError> {
        self.backend
            .get_prompt(name, Some(version))
            .await
            .inspect_err(|e| tracing::error!(error = %e, prompt = name, version, "Error fetching prompt version"))
    }

    /// Create a trace for prompt usage.
    ///
    /// Per-event rejections inside the multi-status reply count as failure.
    pub async fn create_prompt_trace(
        &self,
        prompt_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
    ) -> Result<TraceRef, PromptServiceError> {
        let (batch, trace) = IngestionBatch::prompt_usage(prompt_name, input, output);

        let result = match self.backend.ingest(&batch).await {
            Ok(response) => match response.errors.first() {
                None => Ok(trace),
                Some(rejected) => Err(PromptServiceError::RequestFailed {
                    status: rejected.status,
                    message: rejected
                        .message
                        .clone()
                        .unwrap_or_else(|| format!("event {} rejected", rejected.id)),
                }),
            },
            Err(e) => Err(e),
        };

        result.inspect_err(|e| tracing::error!(error = %e, prompt_name, "Error creating prompt trace"))
    }
}

impl std::fmt::Debug for PromptService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptService").finish_non_exhaustive()
    }
}
