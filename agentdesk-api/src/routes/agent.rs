//! Agent REST API Routes
//!
//! Handlers for the dashboard's agent CRUD calls. Every mutation is a
//! read-modify-write of the whole store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

use agentdesk_core::{Agent, AgentRecord, CreateThoughtDto, ThoughtEntry};
use agentdesk_storage::AgentStore;

use crate::{
    error::{ApiError, ApiResult},
    extractors::ApiJson,
    types::{ListAgentsResponse, SuccessResponse},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared state for agent routes.
#[derive(Clone)]
pub struct AgentState {
    pub store: Arc<dyn AgentStore>,
}

impl AgentState {
    pub fn new(store: Arc<dyn AgentStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/agents - List all agents
#[utoipa::path(
    get,
    path = "/api/agents",
    tag = "Agents",
    responses(
        (status = 200, description = "All stored agents", body = ListAgentsResponse),
    ),
)]
pub async fn list_agents(State(state): State<Arc<AgentState>>) -> ApiResult<impl IntoResponse> {
    let agents = state.store.list().await?;
    Ok(Json(ListAgentsResponse { agents }))
}

/// POST /api/agents - Append an agent
///
/// Any JSON body is accepted. It is stored and echoed back exactly as
/// given, unknown or oddly typed fields included. Ids are not checked for
/// collisions.
#[utoipa::path(
    post,
    path = "/api/agents",
    tag = "Agents",
    request_body = Agent,
    responses(
        (status = 200, description = "Agent stored", body = Agent),
        (status = 400, description = "Malformed body", body = ApiError),
        (status = 500, description = "Store could not be written", body = ApiError),
    ),
)]
pub async fn create_agent(
    State(state): State<Arc<AgentState>>,
    ApiJson(agent): ApiJson<AgentRecord>,
) -> ApiResult<impl IntoResponse> {
    let agent = state.store.insert(agent).await?;
    tracing::info!(agent_id = ?agent.id(), "Agent created");
    Ok(Json(agent))
}

/// PUT /api/agents/{id} - Replace an agent
///
/// The body replaces the stored record verbatim, like a create.
#[utoipa::path(
    put,
    path = "/api/agents/{id}",
    tag = "Agents",
    params(
        ("id" = String, Path, description = "Agent ID")
    ),
    request_body = Agent,
    responses(
        (status = 200, description = "Agent replaced", body = Agent),
        (status = 400, description = "Malformed body", body = ApiError),
        (status = 404, description = "Agent not found", body = ApiError),
    ),
)]
pub async fn update_agent(
    State(state): State<Arc<AgentState>>,
    Path(id): Path<String>,
    ApiJson(agent): ApiJson<AgentRecord>,
) -> ApiResult<impl IntoResponse> {
    let agent = state.store.replace(&id, agent).await?;
    tracing::info!(agent_id = %id, "Agent updated");
    Ok(Json(agent))
}

/// DELETE /api/agents/{id} - Remove an agent
#[utoipa::path(
    delete,
    path = "/api/agents/{id}",
    tag = "Agents",
    params(
        ("id" = String, Path, description = "Agent ID")
    ),
    responses(
        (status = 200, description = "Agent removed", body = SuccessResponse),
        (status = 404, description = "Agent not found", body = ApiError),
    ),
)]
pub async fn delete_agent(
    State(state): State<Arc<AgentState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.store.remove(&id).await?;
    tracing::info!(agent_id = %id, "Agent deleted");
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/agents/{id}/thoughts - Attach a thought to an agent
#[utoipa::path(
    post,
    path = "/api/agents/{id}/thoughts",
    tag = "Agents",
    params(
        ("id" = String, Path, description = "Agent ID")
    ),
    request_body = CreateThoughtDto,
    responses(
        (status = 201, description = "Thought added; returns the updated agent", body = Agent),
        (status = 400, description = "Empty or malformed thought", body = ApiError),
        (status = 404, description = "Agent not found", body = ApiError),
    ),
)]
pub async fn add_thought(
    State(state): State<Arc<AgentState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<CreateThoughtDto>,
) -> ApiResult<impl IntoResponse> {
    if req.content.trim().is_empty() {
        return Err(ApiError::validation_failed("Thought content must not be empty"));
    }

    let thought = req.into_thought(id.clone());
    let agent = state
        .store
        .append_thought(&id, ThoughtEntry::Record(thought))
        .await?;

    tracing::info!(agent_id = %id, thoughts = agent.thought_count(), "Thought added");
    Ok((StatusCode::CREATED, Json(agent)))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the agent routes router.
pub fn create_router(store: Arc<dyn AgentStore>) -> Router {
    let state = Arc::new(AgentState::new(store));

    Router::new()
        .route("/", get(list_agents).post(create_agent))
        .route("/:id", put(update_agent).delete(delete_agent))
        .route("/:id/thoughts", post(add_thought))
        .with_state(state)
}
