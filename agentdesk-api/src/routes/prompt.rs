//! Prompt REST API Routes
//!
//! Pass-through to the hosted prompt service. Upstream failures surface as
//! 502 (404 for an unknown prompt) carrying the upstream message.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use agentdesk_langfuse::{
    CreatePromptParams, Prompt, PromptList, PromptService, TraceRef, UpdatePromptParams,
};

use crate::{
    error::{ApiError, ApiResult},
    extractors::ApiJson,
    types::{CreatePromptTraceRequest, SuccessResponse, UpdatePromptLabelsRequest},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared state for prompt routes.
#[derive(Clone, Debug)]
pub struct PromptState {
    pub prompts: PromptService,
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/prompts - List prompts
#[utoipa::path(
    get,
    path = "/api/prompts",
    tag = "Prompts",
    responses(
        (status = 200, description = "Prompt listing from the hosted service", body = PromptList),
        (status = 502, description = "Prompt service failed", body = ApiError),
    ),
)]
pub async fn list_prompts(State(state): State<Arc<PromptState>>) -> ApiResult<impl IntoResponse> {
    let list = state.prompts.list_prompts().await?;
    Ok(Json(list))
}

/// POST /api/prompts - Create a prompt, or a new version of an existing one
#[utoipa::path(
    post,
    path = "/api/prompts",
    tag = "Prompts",
    request_body = CreatePromptParams,
    responses(
        (status = 201, description = "Prompt created", body = Prompt),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 502, description = "Prompt service failed", body = ApiError),
    ),
)]
pub async fn create_prompt(
    State(state): State<Arc<PromptState>>,
    ApiJson(params): ApiJson<CreatePromptParams>,
) -> ApiResult<impl IntoResponse> {
    if params.name.trim().is_empty() {
        return Err(ApiError::missing_fields(&["name"]));
    }
    let prompt = state.prompts.create_prompt(params).await?;
    Ok((StatusCode::CREATED, Json(prompt)))
}

/// GET /api/prompts/{name} - Get the production version of a prompt
#[utoipa::path(
    get,
    path = "/api/prompts/{name}",
    tag = "Prompts",
    params(
        ("name" = String, Path, description = "Prompt name")
    ),
    responses(
        (status = 200, description = "Prompt", body = Prompt),
        (status = 404, description = "Prompt not found", body = ApiError),
        (status = 502, description = "Prompt service failed", body = ApiError),
    ),
)]
pub async fn get_prompt(
    State(state): State<Arc<PromptState>>,
    Path(name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let prompt = state.prompts.get_prompt(&name).await?;
    Ok(Json(prompt))
}

/// DELETE /api/prompts/{name} - Delete a prompt and all its versions
#[utoipa::path(
    delete,
    path = "/api/prompts/{name}",
    tag = "Prompts",
    params(
        ("name" = String, Path, description = "Prompt name")
    ),
    responses(
        (status = 200, description = "Prompt deleted", body = SuccessResponse),
        (status = 502, description = "Prompt service failed", body = ApiError),
    ),
)]
pub async fn delete_prompt(
    State(state): State<Arc<PromptState>>,
    Path(name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let success = state.prompts.delete_prompt(&name).await?;
    Ok(Json(SuccessResponse { success }))
}

/// GET /api/prompts/{name}/versions/{version} - Get a specific prompt version
#[utoipa::path(
    get,
    path = "/api/prompts/{name}/versions/{version}",
    tag = "Prompts",
    params(
        ("name" = String, Path, description = "Prompt name"),
        ("version" = u32, Path, description = "Prompt version")
    ),
    responses(
        (status = 200, description = "Prompt version", body = Prompt),
        (status = 400, description = "Invalid version", body = ApiError),
        (status = 404, description = "Prompt not found", body = ApiError),
        (status = 502, description = "Prompt service failed", body = ApiError),
    ),
)]
pub async fn get_prompt_version(
    State(state): State<Arc<PromptState>>,
    Path((name, version)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let version = parse_version(&version)?;
    let prompt = state.prompts.get_prompt_version(&name, version).await?;
    Ok(Json(prompt))
}

/// PATCH /api/prompts/{name}/versions/{version} - Relabel a prompt version
#[utoipa::path(
    patch,
    path = "/api/prompts/{name}/versions/{version}",
    tag = "Prompts",
    params(
        ("name" = String, Path, description = "Prompt name"),
        ("version" = u32, Path, description = "Prompt version")
    ),
    request_body = UpdatePromptLabelsRequest,
    responses(
        (status = 200, description = "Prompt version updated", body = Prompt),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 502, description = "Prompt service failed", body = ApiError),
    ),
)]
pub async fn update_prompt(
    State(state): State<Arc<PromptState>>,
    Path((name, version)): Path<(String, String)>,
    ApiJson(req): ApiJson<UpdatePromptLabelsRequest>,
) -> ApiResult<impl IntoResponse> {
    let version = parse_version(&version)?;
    let prompt = state
        .prompts
        .update_prompt(UpdatePromptParams {
            prompt_id: name,
            version,
            labels: req.labels,
        })
        .await?;
    Ok(Json(prompt))
}

/// POST /api/prompts/{name}/traces - Record one execution of a prompt
#[utoipa::path(
    post,
    path = "/api/prompts/{name}/traces",
    tag = "Prompts",
    params(
        ("name" = String, Path, description = "Prompt name")
    ),
    request_body = CreatePromptTraceRequest,
    responses(
        (status = 201, description = "Trace recorded", body = TraceRef),
        (status = 400, description = "Malformed body", body = ApiError),
        (status = 502, description = "Prompt service failed", body = ApiError),
    ),
)]
pub async fn create_prompt_trace(
    State(state): State<Arc<PromptState>>,
    Path(name): Path<String>,
    ApiJson(req): ApiJson<CreatePromptTraceRequest>,
) -> ApiResult<impl IntoResponse> {
    let trace = state
        .prompts
        .create_prompt_trace(&name, req.input, req.output)
        .await?;
    Ok((StatusCode::CREATED, Json(trace)))
}

/// Prompt versions start at 1.
fn parse_version(raw: &str) -> ApiResult<u32> {
    match raw.parse::<u32>() {
        Ok(version) if version > 0 => Ok(version),
        _ => Err(ApiError::validation_failed(format!(
            "Invalid prompt version '{}': expected a positive integer",
            raw
        ))),
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the prompt routes router.
pub fn create_router(prompts: PromptService) -> Router {
    let state = Arc::new(PromptState { prompts });

    Router::new()
        .route("/", get(list_prompts).post(create_prompt))
        .route("/:name", get(get_prompt).delete(delete_prompt))
        .route(
            "/:name/versions/:version",
            get(get_prompt_version).patch(update_prompt),
        )
        .route("/:name/traces", post(create_prompt_trace))
        .with_state(state)
}
