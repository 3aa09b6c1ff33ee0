//! In-memory agent store for tests.

use std::sync::{Arc, RwLock};

use agentdesk_core::{AgentDeskResult, AgentRecord, StorageError, ThoughtEntry};
use async_trait::async_trait;

use crate::{append_thought_in, remove_from, replace_in, AgentStore};

/// In-memory store with the same contract as [`crate::JsonFileStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryAgentStore {
    agents: Arc<RwLock<Vec<AgentRecord>>>,
}

impl InMemoryAgentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `agents`.
    pub fn with_agents(agents: Vec<AgentRecord>) -> Self {
        Self {
            agents: Arc::new(RwLock::new(agents)),
        }
    }

    /// Number of stored agents.
    pub fn len(&self) -> usize {
        self.agents.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all stored data.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.agents.write().map_err(|_| StorageError::LockPoisoned)?.clear();
        Ok(())
    }
}

#[async_trait]
impl AgentStore for InMemoryAgentStore {
    async fn list(&self) -> AgentDeskResult<Vec<AgentRecord>> {
        let agents = self.agents.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(agents.clone())
    }

    async fn insert(&self, agent: AgentRecord) -> AgentDeskResult<AgentRecord> {
        let mut agents = self.agents.write().map_err(|_| StorageError::LockPoisoned)?;
        agents.push(agent.clone());
        Ok(agent)
    }

    async fn replace(&self, id: &str, agent: AgentRecord) -> AgentDeskResult<AgentRecord> {
        let mut agents = self.agents.write().map_err(|_| StorageError::LockPoisoned)?;
        replace_in(&mut agents, id, agent)
    }

    async fn remove(&self, id: &str) -> AgentDeskResult<AgentRecord> {
        let mut agents = self.agents.write().map_err(|_| StorageError::LockPoisoned)?;
        remove_from(&mut agents, id)
    }

    async fn append_thought(&self, id: &str, entry: ThoughtEntry) -> AgentDeskResult<AgentRecord> {
        let mut agents = self.agents.write().map_err(|_| StorageError::LockPoisoned)?;
        append_thought_in(&mut agents, id, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn agent(id: &str) -> AgentRecord {
        AgentRecord::new(json!({ "id": id }))
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let store = InMemoryAgentStore::new();
        assert!(store.is_empty());

        store.insert(agent("a")).await.unwrap();
        store.insert(agent("b")).await.unwrap();
        assert_eq!(store.len(), 2);

        let renamed = AgentRecord::new(json!({ "id": "a", "name": "Alpha" }));
        store.replace("a", renamed).await.unwrap();
        assert_eq!(store.get("a").await.unwrap().unwrap().name(), Some("Alpha"));
        assert_eq!(store.check().await.unwrap(), 2);

        store.remove("b").await.unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.remove("b").await.is_err());

        store.clear().unwrap();
        assert!(store.is_empty());
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn agent(id: &str) -> AgentRecord {
        AgentRecord::new(serde_json::json!({ "id": id }))
    }

    proptest! {
        /// Removing an existing id drops exactly that record; the rest keep
        /// their order.
        #[test]
        fn prop_remove_drops_exactly_one(
            ids in prop::collection::hash_set("[a-z0-9]{1,8}", 1..12),
            pick in any::<prop::sample::Index>(),
        ) {
            let ids: Vec<String> = ids.into_iter().collect();
            let target = ids[pick.index(ids.len())].clone();
            let store = InMemoryAgentStore::with_agents(ids.iter().map(|id| agent(id)).collect());

            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let remaining = rt.block_on(async {
                store.remove(&target).await.unwrap();
                store.list().await.unwrap()
            });

            let expected: Vec<&String> = ids.iter().filter(|id| **id != target).collect();
            let actual: Vec<String> = remaining.iter().filter_map(AgentRecord::id).collect();
            prop_assert_eq!(actual.iter().collect::<Vec<_>>(), expected);
        }

        /// Mutations on an unknown id never change the store.
        #[test]
        fn prop_unknown_id_is_noop(
            ids in prop::collection::vec("[a-z]{1,6}", 0..8),
            unknown in "[0-9]{1,6}",
        ) {
            let store = InMemoryAgentStore::with_agents(ids.iter().map(|id| agent(id)).collect());
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();

            let before = rt.block_on(store.list()).unwrap();
            prop_assert!(rt.block_on(store.replace(&unknown, agent("x"))).is_err());
            prop_assert!(rt.block_on(store.remove(&unknown)).is_err());
            prop_assert!(rt.block_on(store.append_thought(&unknown, "t".into())).is_err());
            prop_assert_eq!(rt.block_on(store.list()).unwrap(), before);
        }
    }
}
