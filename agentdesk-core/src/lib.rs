//! AgentDesk Core - Entity Types
//!
//! Pure data structures with no I/O. All other crates depend on this.
//! Typed agents, raw stored agent records, thoughts, and the vestigial
//! application record live here along with the error taxonomy shared by
//! the storage, prompt-service, and API layers.

pub mod entities;
pub mod error;
pub mod identity;
pub mod record;

pub use entities::{
    Agent, AgentStoreFile, Application, CreateAgentDto, CreateApplicationDto, CreateThoughtDto,
    Thought, ThoughtEntry,
};
pub use error::{
    AgentDeskError, AgentDeskResult, ConfigError, PromptServiceError, StorageError,
    ValidationError,
};
pub use identity::{new_agent_id, new_thought_id, now_rfc3339, AgentId, Timestamp};
pub use record::AgentRecord;
