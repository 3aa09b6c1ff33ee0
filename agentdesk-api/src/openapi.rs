//! OpenAPI Specification for AgentDesk API
//!
//! Generated by utoipa from the route annotations and schema derives.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{agent, create_agent, health, prompt};
use crate::types::*;

use agentdesk_core::{Agent, CreateThoughtDto, Thought, ThoughtEntry};
use agentdesk_langfuse::{
    CreatePromptParams, Prompt, PromptConfig, PromptList, PromptMeta, TraceRef,
};

/// OpenAPI document for AgentDesk API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AgentDesk API",
        version = "0.1.0",
        description = "Agent authoring dashboard backend: agent records, thoughts, and hosted prompt management",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Agents", description = "Agent records and their thoughts"),
        (name = "Prompts", description = "Hosted prompt management and usage traces"),
        (name = "Health", description = "Liveness and readiness checks")
    ),
    paths(
        // === Agent Routes ===
        agent::list_agents,
        agent::create_agent,
        agent::update_agent,
        agent::delete_agent,
        agent::add_thought,
        create_agent::create_agent_stub,

        // === Prompt Routes ===
        prompt::list_prompts,
        prompt::create_prompt,
        prompt::get_prompt,
        prompt::delete_prompt,
        prompt::get_prompt_version,
        prompt::update_prompt,
        prompt::create_prompt_trace,

        // === Health Routes ===
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        // Errors
        ApiError,
        ErrorCode,

        // Agents
        Agent,
        Thought,
        ThoughtEntry,
        CreateThoughtDto,
        ListAgentsResponse,
        SuccessResponse,
        CreateAgentRequest,
        CreateAgentResponse,
        CreateAgentDetails,

        // Prompts
        CreatePromptParams,
        PromptConfig,
        Prompt,
        PromptList,
        PromptMeta,
        TraceRef,
        UpdatePromptLabelsRequest,
        CreatePromptTraceRequest,

        // Health
        health::HealthResponse,
        health::HealthStatus,
        health::HealthDetails,
        health::ComponentHealth,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_serializes() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("AgentDesk API"));
        assert!(json.contains("ThoughtEntry"));
    }
}
