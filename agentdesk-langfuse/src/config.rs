//! Langfuse connection settings, loaded from the environment.

use std::time::Duration;

/// Default hosted endpoint.
pub const DEFAULT_BASE_URL: &str = "https://cloud.langfuse.com";

/// Default outbound request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Credentials and endpoint for the hosted prompt service.
#[derive(Clone)]
pub struct LangfuseConfig {
    pub public_key: String,
    pub secret_key: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for LangfuseConfig {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            secret_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl LangfuseConfig {
    /// Create LangfuseConfig from environment variables.
    ///
    /// Environment variables (each also read with a `NEXT_PUBLIC_` prefix):
    /// - `LANGFUSE_PUBLIC_KEY`: Project public key (default: empty)
    /// - `LANGFUSE_SECRET_KEY`: Project secret key (default: empty)
    /// - `LANGFUSE_BASE_URL`: Service endpoint (default: https://cloud.langfuse.com)
    /// - `LANGFUSE_TIMEOUT_MS`: Request timeout (default: 30000)
    ///
    /// Missing keys are not an error here; calls fail upstream instead.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            public_key: env_var("LANGFUSE_PUBLIC_KEY").unwrap_or_default(),
            secret_key: env_var("LANGFUSE_SECRET_KEY").unwrap_or_default(),
            base_url: env_var("LANGFUSE_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout_ms: env_var("LANGFUSE_TIMEOUT_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_ms),
        }
    }

    /// Whether both keys are present.
    pub fn has_credentials(&self) -> bool {
        !self.public_key.is_empty() && !self.secret_key.is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .or_else(|_| std::env::var(format!("NEXT_PUBLIC_{}", name)))
        .ok()
}

impl std::fmt::Debug for LangfuseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LangfuseConfig")
            .field("public_key", &self.public_key)
            .field("secret_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LangfuseConfig::default();
        assert_eq!(config.base_url, "https://cloud.langfuse.com");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = LangfuseConfig {
            public_key: "pk-lf-123".to_string(),
            secret_key: "sk-lf-very-secret".to_string(),
            ..LangfuseConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("pk-lf-123"));
        assert!(!debug.contains("very-secret"));
        assert!(config.has_credentials());
    }
}
