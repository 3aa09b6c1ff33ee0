//! Langfuse request and response types.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name given to traces created for prompt usage.
pub const PROMPT_TRACE_NAME: &str = "Prompt Usage";
/// Name given to the generation recorded inside a prompt-usage trace.
pub const PROMPT_GENERATION_NAME: &str = "Prompt Execution";
/// Model label recorded on prompt-usage generations.
pub const PROMPT_GENERATION_MODEL: &str = "custom-prompt";

// ============================================================================
// PROMPTS
// ============================================================================

/// Model configuration stored alongside a prompt.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub schema: Option<serde_json::Value>,
}

/// Parameters for creating a prompt (or a new version of an existing one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreatePromptParams {
    pub name: String,
    pub prompt: String,
    #[serde(default)]
    pub config: PromptConfig,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Parameters for updating a prompt version.
///
/// The hosted service keeps prompt versions immutable apart from their
/// labels; new prompt text is a new version via [`CreatePromptParams`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromptParams {
    /// Prompt name.
    pub prompt_id: String,
    pub version: u32,
    pub labels: Vec<String>,
}

/// Wire body for `POST /api/public/v2/prompts`.
#[derive(Debug, Serialize)]
pub(crate) struct CreatePromptBody<'a> {
    pub name: &'a str,
    pub prompt: &'a str,
    pub config: &'a PromptConfig,
    pub labels: &'a [String],
    #[serde(rename = "type")]
    pub prompt_type: &'static str,
}

/// Wire body for `PATCH /api/public/v2/prompts/{name}/versions/{version}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateLabelsBody<'a> {
    pub new_labels: &'a [String],
}

/// A prompt version as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Prompt {
    pub name: String,
    pub version: i64,
    /// Text prompts carry a string; chat prompts carry a message list.
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub prompt: serde_json::Value,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub config: serde_json::Value,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub prompt_type: Option<String>,
}

/// Summary row in a prompt listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PromptMeta {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<i64>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<String>,
}

/// Response of `GET /api/public/v2/prompts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PromptList {
    pub data: Vec<PromptMeta>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub meta: serde_json::Value,
}

// ============================================================================
// TRACES
// ============================================================================

/// One event in an ingestion batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionEvent {
    pub id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub body: serde_json::Value,
}

/// Body of `POST /api/public/ingestion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionBatch {
    pub batch: Vec<IngestionEvent>,
}

impl IngestionBatch {
    /// Trace of one prompt execution: a `Prompt Usage` trace tagged with the
    /// prompt name, holding a single `Prompt Execution` generation.
    pub fn prompt_usage(
        prompt_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
    ) -> (Self, TraceRef) {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let trace_id = Uuid::new_v4().to_string();
        let generation_id = Uuid::new_v4().to_string();

        let trace = IngestionEvent {
            id: Uuid::new_v4().to_string(),
            timestamp: now.clone(),
            event_type: "trace-create".to_string(),
            body: serde_json::json!({
                "id": trace_id,
                "name": PROMPT_TRACE_NAME,
                "timestamp": now,
                "metadata": { "promptName": prompt_name },
            }),
        };

        let generation = IngestionEvent {
            id: Uuid::new_v4().to_string(),
            timestamp: now.clone(),
            event_type: "generation-create".to_string(),
            body: serde_json::json!({
                "id": generation_id,
                "traceId": trace_id,
                "name": PROMPT_GENERATION_NAME,
                "model": PROMPT_GENERATION_MODEL,
                "startTime": now,
                "input": input,
                "output": output,
                "metadata": { "timestamp": now },
            }),
        };

        let trace_ref = TraceRef {
            trace_id,
            generation_id,
            prompt_name: prompt_name.to_string(),
        };

        (
            Self {
                batch: vec![trace, generation],
            },
            trace_ref,
        )
    }
}

/// Per-event success in an ingestion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionSuccess {
    pub id: String,
    pub status: u16,
}

/// Per-event failure in an ingestion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionError {
    pub id: String,
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Response of `POST /api/public/ingestion` (HTTP 207 multi-status).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IngestionResponse {
    #[serde(default)]
    pub successes: Vec<IngestionSuccess>,
    #[serde(default)]
    pub errors: Vec<IngestionError>,
}

/// Identifiers of a created trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TraceRef {
    pub trace_id: String,
    pub generation_id: String,
    pub prompt_name: String,
}

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ServiceErrorBody {
    pub message: Option<String>,
    pub error: Option<serde_json::Value>,
}
