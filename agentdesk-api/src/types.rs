//! Request and response types for the AgentDesk API.

use agentdesk_core::AgentRecord;
#[cfg(feature = "openapi")]
use agentdesk_core::Agent;
use serde::{Deserialize, Serialize};

// ============================================================================
// AGENT TYPES
// ============================================================================

/// Response of `GET /api/agents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListAgentsResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Agent>))]
    pub agents: Vec<AgentRecord>,
}

/// Response of `DELETE /api/agents/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SuccessResponse {
    pub success: bool,
}

// ============================================================================
// CREATE-AGENT STUB TYPES
// ============================================================================

/// Body of `POST /api/create-agent`.
///
/// Every field is optional at the wire level; presence is checked by the
/// handler so a missing field yields the stub's own 400 message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAgentRequest {
    pub model_provider: Option<String>,
    pub model_name: Option<String>,
    pub api_key: Option<String>,
    pub agent_instructions: Option<String>,
}

/// Response of `POST /api/create-agent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAgentResponse {
    pub message: String,
    pub details: CreateAgentDetails,
}

/// Echo of the accepted configuration. The key is masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentDetails {
    pub model_provider: String,
    pub model_name: String,
    pub api_key_partial: String,
}

// ============================================================================
// PROMPT TYPES
// ============================================================================

/// Body of `PATCH /api/prompts/{name}/versions/{version}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdatePromptLabelsRequest {
    pub labels: Vec<String>,
}

/// Body of `POST /api/prompts/{name}/traces`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreatePromptTraceRequest {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub input: serde_json::Value,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub output: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_agent_request_tolerates_missing_fields() {
        let req: CreateAgentRequest = serde_json::from_value(json!({ "modelName": "gpt-4o" })).unwrap();
        assert_eq!(req.model_name.as_deref(), Some("gpt-4o"));
        assert!(req.model_provider.is_none());
        assert!(req.api_key.is_none());
    }

    #[test]
    fn test_create_agent_details_wire_names() {
        let details = CreateAgentDetails {
            model_provider: "openai".to_string(),
            model_name: "gpt-4o".to_string(),
            api_key_partial: "sk-1****".to_string(),
        };
        let value = serde_json::to_value(details).unwrap();
        assert_eq!(value["apiKeyPartial"], "sk-1****");
        assert_eq!(value["modelProvider"], "openai");
    }

    #[test]
    fn test_trace_request_defaults_to_null() {
        let req: CreatePromptTraceRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.input.is_null());
        assert!(req.output.is_null());
    }
}
