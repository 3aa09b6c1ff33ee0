//! AgentDesk API Server Entry Point
//!
//! Bootstraps configuration, opens the agent store, connects the prompt
//! client, and starts the Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use agentdesk_api::telemetry::{init_tracing, TelemetryConfig};
use agentdesk_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState, StoreConfig};
use agentdesk_langfuse::{LangfuseClient, LangfuseConfig, PromptService};
use agentdesk_storage::JsonFileStore;

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_tracing(&telemetry_config)?;

    let store_config = StoreConfig::from_env();
    tracing::info!(data_file = %store_config.data_file.display(), "Using agent store");
    let store = Arc::new(JsonFileStore::new(store_config.data_file));

    let langfuse_config = LangfuseConfig::from_env();
    if !langfuse_config.has_credentials() {
        tracing::warn!("Langfuse keys are not set; prompt routes will fail upstream");
    }
    let client = LangfuseClient::new(&langfuse_config)?;
    let prompts = PromptService::new(Arc::new(client));

    let api_config = ApiConfig::from_env();
    let app = create_api_router(AppState::new(store, prompts), &api_config)?;

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting AgentDesk API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("AGENTDESK_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("AGENTDESK_API_PORT").ok())
        .unwrap_or_else(|| "3000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
