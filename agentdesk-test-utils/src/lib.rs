//! AgentDesk Test Utilities
//!
//! Shared test infrastructure for the AgentDesk workspace:
//! - Proptest generators for agents and thoughts
//! - Fixtures for temp-dir backed stores and sample records
//! - A scripted prompt backend for exercising prompt routes offline
//! - Custom assertions for store results

// Re-export storage backends from their source crate
pub use agentdesk_storage::{AgentStore, InMemoryAgentStore, JsonFileStore};

// Re-export core types for convenience
pub use agentdesk_core::{
    Agent, AgentDeskError, AgentDeskResult, AgentRecord, AgentStoreFile, PromptServiceError,
    StorageError, Thought, ThoughtEntry,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for AgentDesk entities.

    use super::*;
    use proptest::prelude::*;

    /// Generate an agent id in the dashboard's millisecond-timestamp style.
    pub fn arb_agent_id() -> impl Strategy<Value = String> {
        (1_600_000_000_000u64..1_900_000_000_000u64).prop_map(|ms| ms.to_string())
    }

    /// Generate free text, including unicode and quoting characters.
    pub fn arb_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?'\"\\\\/éü漢-]{0,40}"
    }

    /// Generate a structured thought record.
    pub fn arb_thought() -> impl Strategy<Value = Thought> {
        ("[0-9a-f]{8}", arb_text(), arb_agent_id()).prop_map(|(id, content, agent_id)| Thought {
            id,
            content,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            agent_id,
        })
    }

    /// Generate a thought in either persisted shape.
    pub fn arb_thought_entry() -> impl Strategy<Value = ThoughtEntry> {
        prop_oneof![
            arb_text().prop_map(ThoughtEntry::Text),
            arb_thought().prop_map(ThoughtEntry::Record),
        ]
    }

    /// Generate an agent with a handful of mixed-shape thoughts.
    pub fn arb_agent() -> impl Strategy<Value = Agent> {
        (
            arb_agent_id(),
            arb_text(),
            arb_text(),
            arb_text(),
            prop::collection::vec(arb_thought_entry(), 0..4),
        )
            .prop_map(|(id, name, description, prompt, thoughts)| Agent {
                created_at: "2024-01-01T00:00:00.000Z".to_string(),
                id,
                name,
                description,
                prompt,
                thoughts,
                applications: vec![],
            })
    }

    /// Generate a list of well-formed agent records with distinct ids.
    pub fn arb_agents(max: usize) -> impl Strategy<Value = Vec<AgentRecord>> {
        prop::collection::vec(arb_agent(), 0..max).prop_map(|agents| {
            agents
                .into_iter()
                .enumerate()
                .map(|(i, mut agent)| {
                    agent.id = format!("{}-{}", agent.id, i);
                    AgentRecord::from(agent)
                })
                .collect()
        })
    }

    /// Generate an arbitrary JSON leaf: null, bool, number, or string.
    pub fn arb_json_leaf() -> impl Strategy<Value = serde_json::Value> {
        prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::from),
            any::<i64>().prop_map(serde_json::Value::from),
            arb_text().prop_map(serde_json::Value::from),
        ]
    }

    /// Generate a record that ignores the agent schema: known keys with
    /// values of any type plus unknown keys.
    pub fn arb_loose_record() -> impl Strategy<Value = AgentRecord> {
        let keys = prop_oneof![
            Just("id".to_string()),
            Just("name".to_string()),
            Just("description".to_string()),
            Just("thoughts".to_string()),
            Just("createdAt".to_string()),
            "[a-z]{1,8}",
        ];
        prop::collection::btree_map(keys, arb_json_leaf(), 0..6).prop_map(|fields| {
            AgentRecord::new(serde_json::Value::Object(fields.into_iter().collect()))
        })
    }

    /// Generate an API key of arbitrary length and alphabet.
    pub fn arb_api_key() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_\\-ß€]{1,64}"
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common testing scenarios.

    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Create a sample agent record with one thought of each shape.
    pub fn sample_agent(id: &str) -> AgentRecord {
        AgentRecord::from(Agent {
            id: id.to_string(),
            name: format!("Agent {}", id),
            description: "Answers support questions".to_string(),
            prompt: "You are a helpful support agent.".to_string(),
            thoughts: vec![
                ThoughtEntry::Text("Prefers short answers".to_string()),
                ThoughtEntry::Record(Thought {
                    id: "thought-1".to_string(),
                    content: "Escalate billing issues".to_string(),
                    created_at: "2024-01-01T00:00:00.000Z".to_string(),
                    agent_id: id.to_string(),
                }),
            ],
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            applications: vec![],
        })
    }

    /// A JSON file store rooted in a fresh temp directory.
    ///
    /// The backing file does not exist until the first mutation. Keep the
    /// returned [`TempDir`] alive for the duration of the test.
    pub struct TempFileStore {
        pub dir: TempDir,
        pub store: Arc<JsonFileStore>,
    }

    impl TempFileStore {
        pub fn path(&self) -> PathBuf {
            self.store.path().to_path_buf()
        }

        /// Current raw file contents, or `None` if never written.
        pub fn raw(&self) -> Option<String> {
            std::fs::read_to_string(self.store.path()).ok()
        }
    }

    /// Create an empty temp-dir backed store. Panics on I/O failure.
    pub fn temp_file_store() -> TempFileStore {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = Arc::new(JsonFileStore::new(dir.path().join("data").join("agents.json")));
        TempFileStore { dir, store }
    }

    /// Create a temp-dir backed store whose file already holds `agents`.
    pub fn seeded_file_store(agents: &[AgentRecord]) -> TempFileStore {
        let fixture = temp_file_store();
        write_raw(&fixture, &store_json(agents));
        fixture
    }

    /// Overwrite the store's backing file with arbitrary content.
    pub fn write_raw(fixture: &TempFileStore, content: &str) {
        let path = fixture.path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create data dir");
        }
        std::fs::write(path, content).expect("failed to write store file");
    }

    /// Serialize `agents` in the on-disk layout.
    pub fn store_json(agents: &[AgentRecord]) -> String {
        serde_json::to_string_pretty(&AgentStoreFile::new(agents.to_vec()))
            .expect("failed to serialize agents")
    }
}

// ============================================================================
// MOCK PROMPT BACKEND
// ============================================================================

pub mod mocks {
    //! Scripted [`PromptBackend`] for route tests.

    use std::sync::Mutex;

    use agentdesk_langfuse::{
        CreatePromptParams, IngestionBatch, IngestionResponse, Prompt, PromptBackend, PromptList,
        PromptMeta,
    };
    use async_trait::async_trait;

    use super::PromptServiceError;

    /// Prompt backend that answers from memory and records each call.
    ///
    /// When `fail_with` is set every call returns that error.
    #[derive(Debug, Default)]
    pub struct MockPromptBackend {
        pub calls: Mutex<Vec<String>>,
        pub fail_with: Option<PromptServiceError>,
        pub ingestion: IngestionResponse,
        pub batches: Mutex<Vec<IngestionBatch>>,
    }

    impl MockPromptBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing(err: PromptServiceError) -> Self {
            Self {
                fail_with: Some(err),
                ..Self::default()
            }
        }

        pub fn with_ingestion(ingestion: IngestionResponse) -> Self {
            Self {
                ingestion,
                ..Self::default()
            }
        }

        /// Calls recorded so far, in order.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        fn record(&self, call: String) -> Result<(), PromptServiceError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }

        /// The prompt every successful lookup returns.
        pub fn prompt(name: &str, version: i64, labels: Vec<String>) -> Prompt {
            Prompt {
                name: name.to_string(),
                version,
                prompt: serde_json::json!("Hello {{name}}"),
                config: serde_json::json!({}),
                labels,
                tags: vec![],
                prompt_type: Some("text".to_string()),
            }
        }
    }

    #[async_trait]
    impl PromptBackend for MockPromptBackend {
        async fn create_prompt(&self, params: &CreatePromptParams) -> Result<Prompt, PromptServiceError> {
            self.record(format!("create:{}", params.name))?;
            Ok(Self::prompt(&params.name, 1, params.labels.clone()))
        }

        async fn get_prompt(&self, name: &str, version: Option<u32>) -> Result<Prompt, PromptServiceError> {
            self.record(match version {
                Some(v) => format!("get:{}:{}", name, v),
                None => format!("get:{}", name),
            })?;
            Ok(Self::prompt(name, version.map(i64::from).unwrap_or(1), vec![]))
        }

        async fn update_prompt_labels(
            &self,
            name: &str,
            version: u32,
            labels: &[String],
        ) -> Result<Prompt, PromptServiceError> {
            self.record(format!("update:{}:{}:{}", name, version, labels.join(",")))?;
            Ok(Self::prompt(name, i64::from(version), labels.to_vec()))
        }

        async fn delete_prompt(&self, name: &str) -> Result<(), PromptServiceError> {
            self.record(format!("delete:{}", name))
        }

        async fn list_prompts(&self) -> Result<PromptList, PromptServiceError> {
            self.record("list".to_string())?;
            Ok(PromptList {
                data: vec![PromptMeta {
                    name: "greeter".to_string(),
                    versions: vec![1],
                    labels: vec!["production".to_string()],
                    tags: vec![],
                    last_updated_at: None,
                }],
                meta: serde_json::json!({ "page": 1, "totalItems": 1 }),
            })
        }

        async fn ingest(&self, batch: &IngestionBatch) -> Result<IngestionResponse, PromptServiceError> {
            self.record(format!("ingest:{}", batch.batch.len()))?;
            if let Ok(mut batches) = self.batches.lock() {
                batches.push(batch.clone());
            }
            Ok(self.ingestion.clone())
        }
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for store results.

    use super::*;

    /// Assert that a store result is a NotFound error for `id`.
    #[track_caller]
    pub fn assert_not_found<T: std::fmt::Debug>(result: &AgentDeskResult<T>, id: &str) {
        match result {
            Err(AgentDeskError::Storage(StorageError::NotFound { id: missing })) => {
                assert_eq!(missing, id, "Wrong id in NotFound error");
            }
            other => panic!("Expected NotFound error for {}, got: {:?}", id, other),
        }
    }

    /// Assert that two record lists hold the same ids in the same order.
    #[track_caller]
    pub fn assert_same_ids(actual: &[AgentRecord], expected: &[AgentRecord]) {
        let actual: Vec<Option<String>> = actual.iter().map(AgentRecord::id).collect();
        let expected: Vec<Option<String>> = expected.iter().map(AgentRecord::id).collect();
        assert_eq!(actual, expected);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sample_agent_has_both_thought_shapes() {
        let agent = fixtures::sample_agent("1");
        let thoughts = agent.thoughts();
        assert!(!thoughts[0].is_record());
        assert!(thoughts[1].is_record());
        assert!(agent.to_agent().is_ok());
    }

    #[tokio::test]
    async fn test_seeded_store_lists_fixture() {
        let agents = vec![fixtures::sample_agent("1"), fixtures::sample_agent("2")];
        let fixture = fixtures::seeded_file_store(&agents);
        let listed = fixture.store.list().await.unwrap();
        assert_eq!(listed, agents);
    }

    #[tokio::test]
    async fn test_temp_store_starts_without_file() {
        let fixture = fixtures::temp_file_store();
        assert!(fixture.raw().is_none());
        assert!(fixture.store.list().await.unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_arb_agents_have_distinct_ids(agents in generators::arb_agents(8)) {
            let mut ids: Vec<String> = agents.iter().filter_map(AgentRecord::id).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), agents.len());
        }

        /// Records of any shape come back from the file store unchanged.
        #[test]
        fn prop_file_store_preserves_loose_records(
            records in prop::collection::vec(generators::arb_loose_record(), 0..6),
        ) {
            let fixture = fixtures::seeded_file_store(&records);
            let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let extra = fixtures::sample_agent("new");

            let listed = rt.block_on(async {
                fixture.store.insert(extra.clone()).await.unwrap();
                fixture.store.list().await.unwrap()
            });

            prop_assert_eq!(listed.len(), records.len() + 1);
            prop_assert_eq!(&listed[..records.len()], records.as_slice());
            prop_assert_eq!(&listed[records.len()], &extra);
        }
    }
}
