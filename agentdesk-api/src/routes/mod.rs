//! REST API Routes Module
//!
//! Route handlers organized by resource:
//! - Agent CRUD and thoughts under /api/agents
//! - The create-agent form stub at /api/create-agent
//! - Prompt pass-through under /api/prompts
//! - Health check endpoints under /health
//! - CORS support for the browser dashboard

pub mod agent;
pub mod create_agent;
pub mod health;
pub mod prompt;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::openapi::ApiDoc;
use crate::state::AppState;
use crate::telemetry::observability_middleware;

// Re-export route creation functions for convenience
pub use agent::create_router as agent_router;
pub use create_agent::create_router as create_agent_router;
pub use health::create_router as health_router;
pub use prompt::create_router as prompt_router;

// ============================================================================
// OPENAPI ENDPOINTS
// ============================================================================

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ============================================================================
// PRODUCTION VALIDATION
// ============================================================================

/// Validate API configuration for production use.
fn validate_api_config_for_production(config: &ApiConfig) -> ApiResult<()> {
    if config.cors_origins.is_empty() {
        return Err(ApiError::invalid_input(
            "CORS origins not configured for production. Set AGENTDESK_CORS_ORIGINS.",
        ));
    }
    Ok(())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// In production mode, only allows configured origins.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS: Production mode");
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        if config.cors_allow_credentials {
            cors.allow_origin(origins).allow_credentials(true)
        } else {
            cors.allow_origin(origins)
        }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete API router.
///
/// - Agent routes at /api/agents/*
/// - Create-agent stub at /api/create-agent
/// - Prompt routes at /api/prompts/*
/// - Health checks at /health/*
/// - OpenAPI spec at /openapi.json
/// - Swagger UI at /swagger-ui (when the swagger-ui feature is enabled)
///
/// Execution order: CORS -> Observability -> Handler.
pub fn create_api_router(state: AppState, api_config: &ApiConfig) -> ApiResult<Router> {
    if api_config.is_production() {
        validate_api_config_for_production(api_config)?;
    }

    let api_routes = Router::new()
        .nest("/agents", agent::create_router(state.store.clone()))
        .nest("/create-agent", create_agent::create_router())
        .nest("/prompts", prompt::create_router(state.prompts.clone()));

    #[allow(unused_mut)]
    let mut router = Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::create_router(state.store.clone(), state.start_time))
        .route("/openapi.json", get(openapi_json));

    #[cfg(feature = "swagger-ui")]
    {
        use utoipa_swagger_ui::SwaggerUi;
        router = router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let cors = build_cors_layer(api_config);

    Ok(router.layer(from_fn(observability_middleware)).layer(cors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdesk_langfuse::PromptService;
    use agentdesk_test_utils::{mocks::MockPromptBackend, InMemoryAgentStore};
    use std::sync::Arc;

    #[test]
    fn test_production_requires_origins() {
        assert!(validate_api_config_for_production(&ApiConfig::default()).is_err());

        let config = ApiConfig {
            cors_origins: vec!["https://agentdesk.app".to_string()],
            ..ApiConfig::default()
        };
        assert!(validate_api_config_for_production(&config).is_ok());
    }

    #[test]
    fn test_production_router_requires_origins() {
        let state = AppState::new(
            Arc::new(InMemoryAgentStore::new()),
            PromptService::new(Arc::new(MockPromptBackend::new())),
        );
        let production = ApiConfig {
            production: true,
            ..ApiConfig::default()
        };
        assert!(create_api_router(state.clone(), &production).is_err());
        assert!(create_api_router(state.clone(), &ApiConfig::default()).is_ok());

        let configured = ApiConfig {
            cors_origins: vec!["https://agentdesk.app".to_string()],
            ..production
        };
        assert!(create_api_router(state, &configured).is_ok());
    }

    #[test]
    fn test_openapi_document_lists_agent_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/agents"));
        assert!(doc.paths.paths.contains_key("/api/agents/{id}"));
        assert!(doc.paths.paths.contains_key("/api/create-agent"));
        assert!(doc.paths.paths.contains_key("/api/prompts/{name}/versions/{version}"));
    }
}
