//! Error types for AgentDesk operations

use std::path::PathBuf;
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Agent not found: {id}")]
    NotFound { id: String },

    #[error("I/O error on {path:?}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Hosted prompt-service errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptServiceError {
    #[error("Prompt service is not configured: {reason}")]
    NotConfigured { reason: String },

    #[error("Request to prompt service failed: {reason}")]
    Transport { reason: String },

    #[error("Prompt service returned status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid response from prompt service: {reason}")]
    InvalidResponse { reason: String },
}

/// Validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all AgentDesk errors.
#[derive(Debug, Clone, Error)]
pub enum AgentDeskError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Prompt service error: {0}")]
    PromptService(#[from] PromptServiceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for AgentDesk operations.
pub type AgentDeskResult<T> = Result<T, AgentDeskError>;

// =============================================================================
// TESTS
// =============================================================================
