//! API Configuration Module
//!
//! CORS and agent-store settings. Configuration is loaded from environment
//! variables with defaults suited to local development.

use std::path::PathBuf;

/// Default location of the agent store, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "src/data/agents.json";

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration for CORS.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    /// Example: "https://agentdesk.app,https://admin.agentdesk.app"
    pub cors_origins: Vec<String>,

    /// Whether to allow credentials in CORS requests.
    pub cors_allow_credentials: bool,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    /// Production deployments must configure explicit origins.
    pub production: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            cors_allow_credentials: false,
            cors_max_age_secs: 86400,
            production: false,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `AGENTDESK_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `AGENTDESK_CORS_ALLOW_CREDENTIALS`: "true" or "false" (default: false)
    /// - `AGENTDESK_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `AGENTDESK_ENVIRONMENT`: "production" or "prod" enables strict CORS
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("AGENTDESK_CORS_ORIGINS")
            .ok()
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        let cors_allow_credentials = std::env::var("AGENTDESK_CORS_ALLOW_CREDENTIALS")
            .ok()
            .map(|s| s.to_lowercase() == "true")
            .unwrap_or(defaults.cors_allow_credentials);

        let cors_max_age_secs = std::env::var("AGENTDESK_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        let production = std::env::var("AGENTDESK_ENVIRONMENT")
            .map(|e| is_production_name(&e))
            .unwrap_or(defaults.production);

        Self {
            cors_origins,
            cors_allow_credentials,
            cors_max_age_secs,
            production,
        }
    }

    /// Check if running in production mode (strict CORS).
    pub fn is_production(&self) -> bool {
        self.production
    }
}

fn is_production_name(environment: &str) -> bool {
    matches!(environment.trim().to_lowercase().as_str(), "production" | "prod")
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

// ============================================================================
// STORE CONFIGURATION
// ============================================================================

/// Location of the agent store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl StoreConfig {
    /// Create StoreConfig from environment variables.
    ///
    /// Environment variables:
    /// - `AGENTDESK_DATA_FILE`: Path of the JSON store (default: src/data/agents.json)
    pub fn from_env() -> Self {
        std::env::var("AGENTDESK_DATA_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|s| Self {
                data_file: PathBuf::from(s),
            })
            .unwrap_or_default()
    }
}
