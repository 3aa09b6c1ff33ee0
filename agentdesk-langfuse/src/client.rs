//! Langfuse HTTP client

use agentdesk_core::PromptServiceError;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::config::LangfuseConfig;
use crate::service::PromptBackend;
use crate::types::{
    CreatePromptBody, CreatePromptParams, IngestionBatch, IngestionResponse, Prompt, PromptList,
    ServiceErrorBody, UpdateLabelsBody,
};

/// Client for the Langfuse public REST API.
///
/// Authenticates with HTTP basic auth: public key as user, secret key as
/// password.
#[derive(Clone)]
pub struct LangfuseClient {
    client: Client,
    base_url: Url,
    public_key: String,
    secret_key: String,
}

impl LangfuseClient {
    pub fn new(config: &LangfuseConfig) -> Result<Self, PromptServiceError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| PromptServiceError::NotConfigured {
            reason: format!("invalid base URL {}: {}", config.base_url, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PromptServiceError::NotConfigured {
                reason: format!("base URL {} cannot carry a path", config.base_url),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PromptServiceError::NotConfigured {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url,
            public_key: config.public_key.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    /// Build `{base}/api/public/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "public"]).extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .basic_auth(&self.public_key, Some(&self.secret_key))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, PromptServiceError> {
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|e| PromptServiceError::InvalidResponse {
                reason: format!("Failed to parse response: {}", e),
            })
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, PromptServiceError> {
        let response = request.send().await.map_err(|e| PromptServiceError::Transport {
            reason: format!("HTTP request failed: {}", e),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        let message = match serde_json::from_str::<ServiceErrorBody>(&error_text) {
            Ok(ServiceErrorBody { message: Some(message), .. }) => message,
            Ok(ServiceErrorBody { error: Some(error), .. }) => match error {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            },
            _ => error_text,
        };

        Err(PromptServiceError::RequestFailed {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PromptBackend for LangfuseClient {
    async fn create_prompt(&self, params: &CreatePromptParams) -> Result<Prompt, PromptServiceError> {
        let body = CreatePromptBody {
            name: &params.name,
            prompt: &params.prompt,
            config: &params.config,
            labels: &params.labels,
            prompt_type: "text",
        };
        let url = self.endpoint(&["v2", "prompts"]);
        self.send_json(self.request(Method::POST, url).json(&body)).await
    }

    async fn get_prompt(&self, name: &str, version: Option<u32>) -> Result<Prompt, PromptServiceError> {
        let mut url = self.endpoint(&["v2", "prompts", name]);
        if let Some(version) = version {
            url.query_pairs_mut().append_pair("version", &version.to_string());
        }
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn update_prompt_labels(
        &self,
        name: &str,
        version: u32,
        labels: &[String],
    ) -> Result<Prompt, PromptServiceError> {
        let version = version.to_string();
        let url = self.endpoint(&["v2", "prompts", name, "versions", &version]);
        let body = UpdateLabelsBody { new_labels: labels };
        self.send_json(self.request(Method::PATCH, url).json(&body)).await
    }

    async fn delete_prompt(&self, name: &str) -> Result<(), PromptServiceError> {
        let url = self.endpoint(&["v2", "prompts", name]);
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn list_prompts(&self) -> Result<PromptList, PromptServiceError> {
        let url = self.endpoint(&["v2", "prompts"]);
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn ingest(&self, batch: &IngestionBatch) -> Result<IngestionResponse, PromptServiceError> {
        let url = self.endpoint(&["ingestion"]);
        self.send_json(self.request(Method::POST, url).json(batch)).await
    }
}

impl std::fmt::Debug for LangfuseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LangfuseClient")
            .field("base_url", &self.base_url.as_str())
            .field("public_key", &self.public_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
