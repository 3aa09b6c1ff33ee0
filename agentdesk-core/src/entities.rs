//! Core entity structures
//!
//! Wire format is camelCase throughout. The store itself persists raw
//! [`AgentRecord`]s; [`Agent`] is the documented shape of a well-formed one.

use serde::{Deserialize, Serialize};

use crate::identity::{new_agent_id, new_thought_id, now_rfc3339, AgentId};
use crate::record::AgentRecord;

/// Agent - a named prompt configuration with attached thoughts.
///
/// Every field defaults when absent. This is the typed view used for
/// building agents and documenting the API; stored records are not
/// required to conform to it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub description: String,
    pub prompt: String,
    pub thoughts: Vec<ThoughtEntry>,
    pub created_at: String,
    /// Applications using this agent. Carried through untouched.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub applications: Vec<serde_json::Value>,
}

impl Agent {
    /// Append a thought and return the new thought count.
    pub fn push_thought(&mut self, entry: ThoughtEntry) -> usize {
        self.thoughts.push(entry);
        self.thoughts.len()
    }

    /// Text of every thought, regardless of representation.
    pub fn thought_contents(&self) -> impl Iterator<Item = &str> {
        self.thoughts.iter().map(ThoughtEntry::content)
    }
}

/// Thought - structured note attached to an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    #[serde(default)]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub agent_id: AgentId,
}

impl Thought {
    /// Create a thought for `agent_id` with a fresh id and timestamp.
    pub fn new(agent_id: impl Into<AgentId>, content: impl Into<String>) -> Self {
        Self {
            id: new_thought_id(),
            content: content.into(),
            created_at: now_rfc3339(),
            agent_id: agent_id.into(),
        }
    }
}

/// A thought as persisted: either a bare string or a structured record.
///
/// Older agent records store thoughts as plain strings; newer ones store
/// [`Thought`] records. Both shapes are accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum ThoughtEntry {
    Text(String),
    Record(Thought),
}

impl ThoughtEntry {
    /// The thought's text.
    pub fn content(&self) -> &str {
        match self {
            ThoughtEntry::Text(text) => text,
            ThoughtEntry::Record(thought) => &thought.content,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, ThoughtEntry::Record(_))
    }
}

impl From<String> for ThoughtEntry {
    fn from(text: String) -> Self {
        ThoughtEntry::Text(text)
    }
}

impl From<&str> for ThoughtEntry {
    fn from(text: &str) -> Self {
        ThoughtEntry::Text(text.to_string())
    }
}

impl From<Thought> for ThoughtEntry {
    fn from(thought: Thought) -> Self {
        ThoughtEntry::Record(thought)
    }
}

/// Application - groups agents. Defined for the dashboard's type layer;
/// no route reads or writes it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub description: String,
    pub agents: Vec<Agent>,
    pub created_at: String,
}

/// On-disk layout of the agent store: `{ "agents": [...] }`.
///
/// Records are kept as raw JSON. Other top-level keys are carried through.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentStoreFile {
    pub agents: Vec<AgentRecord>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AgentStoreFile {
    pub fn new(agents: Vec<AgentRecord>) -> Self {
        Self {
            agents,
            extra: serde_json::Map::new(),
        }
    }
}

// ============================================================================
// CREATION DTOS
// ============================================================================

/// Payload for creating a new agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentDto {
    pub name: String,
    pub description: String,
    pub prompt: String,
    /// Optional IDs of applications to associate with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_ids: Option<Vec<String>>,
}

impl CreateAgentDto {
    /// Build the agent record the dashboard would post: fresh timestamp id,
    /// no thoughts, current creation time.
    pub fn into_agent(self) -> Agent {
        Agent {
            id: new_agent_id(),
            name: self.name,
            description: self.description,
            prompt: self.prompt,
            thoughts: Vec::new(),
            created_at: now_rfc3339(),
            applications: Vec::new(),
        }
    }
}

/// Payload for adding a thought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateThoughtDto {
    pub content: String,
    /// Owning agent. Routes take it from the path; a body value is ignored.
    #[serde(default)]
    pub agent_id: Option<AgentId>,
}

impl CreateThoughtDto {
    pub fn into_thought(self, agent_id: impl Into<AgentId>) -> Thought {
        Thought::new(agent_id, self.content)
    }
}

/// Payload for creating an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationDto {
    pub name: String,
    pub description: String,
    pub agent_ids: Vec<AgentId>,
}
