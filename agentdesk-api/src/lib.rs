//! AgentDesk API - REST API Layer
//!
//! Axum HTTP surface for the agent dashboard: agent CRUD over the JSON
//! file store, the create-agent form stub, and a pass-through to the
//! hosted prompt service.

pub mod config;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, StoreConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use extractors::ApiJson;
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;
pub use types::*;
