//! AgentDesk Storage - Agent Store Trait and Backends
//!
//! Defines the storage abstraction for agent records. Two backends ship:
//! - [`JsonFileStore`]: the single JSON file the service runs against
//! - [`InMemoryAgentStore`]: a mock with the same contract, for tests
//!
//! Records are raw JSON and are written back exactly as received. They are
//! matched on their `id` field; the first match wins and duplicates are
//! never detected.

pub mod file_store;
pub mod memory;

pub use file_store::JsonFileStore;
pub use memory::InMemoryAgentStore;

use agentdesk_core::{AgentDeskResult, AgentRecord, StorageError, ThoughtEntry};
use async_trait::async_trait;

/// Async store for agent records.
///
/// Implementations keep insertion order and apply no validation. Mutations
/// on an unknown id return [`StorageError::NotFound`] and leave the store
/// unchanged.
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// List all agents in stored order.
    async fn list(&self) -> AgentDeskResult<Vec<AgentRecord>>;

    /// Append a record as given and return it.
    async fn insert(&self, agent: AgentRecord) -> AgentDeskResult<AgentRecord>;

    /// Replace the record stored under `id` with `agent`.
    ///
    /// The replacement is written as given, even if its own id differs.
    async fn replace(&self, id: &str, agent: AgentRecord) -> AgentDeskResult<AgentRecord>;

    /// Remove the record stored under `id` and return it.
    async fn remove(&self, id: &str) -> AgentDeskResult<AgentRecord>;

    /// Append a thought to the agent stored under `id` and return the
    /// updated record.
    async fn append_thought(&self, id: &str, entry: ThoughtEntry) -> AgentDeskResult<AgentRecord>;

    /// Get the agent stored under `id`, if any.
    async fn get(&self, id: &str) -> AgentDeskResult<Option<AgentRecord>> {
        Ok(self.list().await?.into_iter().find(|agent| agent.matches_id(id)))
    }

    /// Verify the backing storage can be read and return the record count.
    ///
    /// Unlike [`AgentStore::list`], failures are reported instead of read
    /// as an empty store.
    async fn check(&self) -> AgentDeskResult<usize> {
        Ok(self.list().await?.len())
    }
}

/// Index of the first record with the given id.
pub(crate) fn position_of(agents: &[AgentRecord], id: &str) -> Option<usize> {
    agents.iter().position(|agent| agent.matches_id(id))
}

pub(crate) fn not_found(id: &str) -> StorageError {
    StorageError::NotFound { id: id.to_string() }
}

/// Apply `replace` semantics to an in-memory list.
pub(crate) fn replace_in(
    agents: &mut [AgentRecord],
    id: &str,
    agent: AgentRecord,
) -> AgentDeskResult<AgentRecord> {
    let index = position_of(agents, id).ok_or_else(|| not_found(id))?;
    agents[index] = agent.clone();
    Ok(agent)
}

/// Apply `remove` semantics to an in-memory list.
pub(crate) fn remove_from(agents: &mut Vec<AgentRecord>, id: &str) -> AgentDeskResult<AgentRecord> {
    let index = position_of(agents, id).ok_or_else(|| not_found(id))?;
    Ok(agents.remove(index))
}

/// Apply `append_thought` semantics to an in-memory list.
///
/// The list is untouched when the matching record cannot take a thought.
pub(crate) fn append_thought_in(
    agents: &mut [AgentRecord],
    id: &str,
    entry: ThoughtEntry,
) -> AgentDeskResult<AgentRecord> {
    let index = position_of(agents, id).ok_or_else(|| not_found(id))?;
    let mut updated = agents[index].clone();
    updated.push_thought(entry)?;
    agents[index] = updated.clone();
    Ok(updated)
}
