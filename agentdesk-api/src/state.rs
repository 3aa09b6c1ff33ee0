//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use agentdesk_langfuse::PromptService;
use agentdesk_storage::AgentStore;

/// Application-wide state handed to the router builder.
///
/// Each route module builds its own narrower state from these parts.
#[derive(Clone)]
pub struct AppState {
    /// Agent persistence backend.
    pub store: Arc<dyn AgentStore>,
    /// Pass-through to the hosted prompt service.
    pub prompts: PromptService,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn AgentStore>, prompts: PromptService) -> Self {
        Self {
            store,
            prompts,
            start_time: Instant::now(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("prompts", &self.prompts)
            .field("start_time", &self.start_time)
            .finish_non_exhaustive()
    }
}
