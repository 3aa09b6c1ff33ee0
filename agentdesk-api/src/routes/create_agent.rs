//! Create-Agent Stub Route
//!
//! Accepts a model configuration from the "create agent" form, validates
//! that the three required fields are present, and acknowledges with a
//! masked key. Nothing is persisted.

use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};

use crate::{
    error::{ApiError, ApiResult},
    extractors::ApiJson,
    types::{CreateAgentDetails, CreateAgentRequest, CreateAgentResponse},
};

/// Number of leading key characters echoed back.
const API_KEY_VISIBLE_CHARS: usize = 4;

/// Mask an API key: the first four characters followed by `****`.
///
/// Counts characters, not bytes, so multi-byte keys never split a code point.
pub fn mask_api_key(api_key: &str) -> String {
    let visible: String = api_key.chars().take(API_KEY_VISIBLE_CHARS).collect();
    format!("{}****", visible)
}

/// A present, non-empty field value.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// POST /api/create-agent - Validate a model configuration (not persisted)
#[utoipa::path(
    post,
    path = "/api/create-agent",
    tag = "Agents",
    request_body = CreateAgentRequest,
    responses(
        (status = 201, description = "Configuration accepted", body = CreateAgentResponse),
        (status = 400, description = "Missing required fields or malformed body", body = ApiError),
    ),
)]
pub async fn create_agent_stub(
    ApiJson(req): ApiJson<CreateAgentRequest>,
) -> ApiResult<impl IntoResponse> {
    let provider = required(req.model_provider);
    let model = required(req.model_name);
    let key = required(req.api_key);

    let (model_provider, model_name, api_key) = match (provider, model, key) {
        (Some(p), Some(m), Some(k)) => (p, m, k),
        (p, m, k) => {
            let missing: Vec<&str> = [
                (p.is_none(), "modelProvider"),
                (m.is_none(), "modelName"),
                (k.is_none(), "apiKey"),
            ]
            .into_iter()
            .filter_map(|(absent, field)| absent.then_some(field))
            .collect();
            return Err(ApiError::missing_fields(&missing));
        }
    };

    tracing::info!(
        model_provider = %model_provider,
        model_name = %model_name,
        has_instructions = req.agent_instructions.is_some(),
        "Agent configuration received"
    );

    let response = CreateAgentResponse {
        message: "Agent created successfully".to_string(),
        details: CreateAgentDetails {
            model_provider,
            model_name,
            api_key_partial: mask_api_key(&api_key),
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Create the create-agent stub router.
pub fn create_router() -> Router {
    Router::new().route("/", post(create_agent_stub))
}
