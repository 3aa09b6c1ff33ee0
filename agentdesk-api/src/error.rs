//! Error Types for AgentDesk API
//!
//! This module defines error handling for the API layer, including:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! Errors serialize as `{ "code": ..., "error": ... }`; the dashboard reads
//! the `error` field.

use agentdesk_core::{
    AgentDeskError, ConfigError, PromptServiceError, StorageError, ValidationError,
};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request validation failed
    ValidationFailed,

    /// Request contains invalid input data
    InvalidInput,

    /// Required field is missing from request
    MissingField,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// Requested agent does not exist
    AgentNotFound,

    /// Requested prompt does not exist upstream
    PromptNotFound,

    // ========================================================================
    // Upstream Errors (502, 503)
    // ========================================================================
    /// The hosted prompt service rejected or failed the request
    UpstreamFailed,

    /// The hosted prompt service is not configured
    ServiceUnavailable,

    // ========================================================================
    // Server Errors (500)
    // ========================================================================
    /// Internal server error
    InternalError,

    /// Reading or writing the agent store failed
    StorageError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed | ErrorCode::InvalidInput | ErrorCode::MissingField => {
                StatusCode::BAD_REQUEST
            }

            ErrorCode::AgentNotFound | ErrorCode::PromptNotFound => StatusCode::NOT_FOUND,

            ErrorCode::UpstreamFailed => StatusCode::BAD_GATEWAY,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            ErrorCode::InternalError | ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Request validation failed",
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::MissingField => "Missing required fields",
            ErrorCode::AgentNotFound => "Agent not found",
            ErrorCode::PromptNotFound => "Prompt not found",
            ErrorCode::UpstreamFailed => "Prompt service request failed",
            ErrorCode::ServiceUnavailable => "Prompt service is not configured",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Failed to access agent store",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    #[serde(rename = "error")]
    pub message: String,

    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// Create a ValidationFailed error.
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create a MissingField error naming the missing fields.
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::from_code(ErrorCode::MissingField)
            .with_details(serde_json::json!({ "fields": fields }))
    }

    /// Create an AgentNotFound error.
    ///
    /// The message is fixed; the id travels in `details`.
    pub fn agent_not_found(agent_id: impl fmt::Display) -> Self {
        Self::from_code(ErrorCode::AgentNotFound)
            .with_details(serde_json::json!({ "id": agent_id.to_string() }))
    }

    /// Create an UpstreamFailed error.
    pub fn upstream_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamFailed, message)
    }

    /// Create a StorageError.
    pub fn storage_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM DOMAIN ERRORS
// ============================================================================

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { id } => ApiError::agent_not_found(id),
            other => {
                // Log the full error; the response stays generic.
                tracing::error!(error = %other, "Agent store error");
                ApiError::storage_error("Failed to save agents")
            }
        }
    }
}

impl From<PromptServiceError> for ApiError {
    fn from(err: PromptServiceError) -> Self {
        match err {
            PromptServiceError::NotConfigured { reason } => {
                ApiError::from_code(ErrorCode::ServiceUnavailable)
                    .with_details(serde_json::json!({ "reason": reason }))
            }
            PromptServiceError::RequestFailed { status: 404, message } => {
                ApiError::new(ErrorCode::PromptNotFound, message)
                    .with_details(serde_json::json!({ "upstreamStatus": 404 }))
            }
            PromptServiceError::RequestFailed { status, message } => {
                ApiError::upstream_failed(message)
                    .with_details(serde_json::json!({ "upstreamStatus": status }))
            }
            PromptServiceError::Transport { reason } | PromptServiceError::InvalidResponse { reason } => {
                ApiError::upstream_failed(reason)
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::RequiredFieldMissing { field } => ApiError::missing_fields(&[&field]),
            ValidationError::InvalidValue { field, reason } => {
                ApiError::validation_failed(format!("Invalid value for {}: {}", field, reason))
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!(error = %err, "Configuration error");
        ApiError::internal_error(err.to_string())
    }
}

impl From<AgentDeskError> for ApiError {
    fn from(err: AgentDeskError) -> Self {
        match err {
            AgentDeskError::Storage(e) => e.into(),
            AgentDeskError::PromptService(e) => e.into(),
            AgentDeskError::Validation(e) => e.into(),
            AgentDeskError::Config(e) => e.into(),
        }
    }
}

/// Malformed, mistyped, or non-JSON request bodies are all a 400.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::invalid_input(format!("Invalid JSON: {}", rejection.body_text()))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON serialization error: {:?}", err);
        ApiError::invalid_input(format!("Invalid JSON: {}", err))
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
