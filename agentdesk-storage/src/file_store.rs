//! JSON file backend.
//!
//! Every operation reads the whole file, mutates the agent list in memory,
//! and writes the whole file back. Records are raw JSON, so a record of any
//! shape survives the rewrite untouched. A missing, empty, or unparsable
//! file reads as an empty store; the next mutation overwrites it.
//!
//! Mutations within one process are serialized by an async mutex and land
//! through a temp file plus rename. Separate processes sharing the file
//! still race: the last write wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use agentdesk_core::{AgentDeskResult, AgentRecord, AgentStoreFile, StorageError, ThoughtEntry};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{append_thought_in, remove_from, replace_in, AgentStore};

/// Agent store backed by a single `{ "agents": [...] }` JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing file, reporting every failure.
    ///
    /// An absent or blank file is an empty store. Content that is not JSON,
    /// or whose `agents` is not an array, is a serialization error.
    /// Individual records are never inspected.
    async fn load(&self) -> Result<AgentStoreFile, StorageError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Agent store file absent, using empty store");
                return Ok(AgentStoreFile::default());
            }
            Err(err) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    reason: err.to_string(),
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(AgentStoreFile::default());
        }

        serde_json::from_str::<AgentStoreFile>(&contents).map_err(|e| StorageError::Serialization {
            reason: e.to_string(),
        })
    }

    /// Read the backing file, substituting an empty store on any failure.
    async fn read_file(&self) -> AgentStoreFile {
        self.load().await.unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "Agent store file unreadable, using empty store");
            AgentStoreFile::default()
        })
    }

    /// Write the whole store, pretty-printed, via a sibling temp file.
    async fn write_file(&self, file: &AgentStoreFile) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(parent, e))?;
        }

        let contents = serde_json::to_string_pretty(file).map_err(|e| StorageError::Serialization {
            reason: e.to_string(),
        })?;

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, contents)
            .await
            .map_err(|e| self.io_error(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| self.io_error(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), agents = file.agents.len(), "Agent store written");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "agents.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_failure(&self, err: StorageError) -> StorageError {
        tracing::error!(path = %self.path.display(), error = %err, "Agent store read failure");
        err
    }

    fn io_error(&self, path: &Path, err: std::io::Error) -> StorageError {
        tracing::error!(path = %path.display(), error = %err, "Agent store I/O failure");
        StorageError::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    /// Run a read-modify-write cycle under the write lock.
    ///
    /// Unparsable content is replaced; a file that cannot be read at all
    /// aborts the mutation so it is never overwritten blind.
    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Vec<AgentRecord>) -> AgentDeskResult<T> + Send,
    ) -> AgentDeskResult<T> {
        let _guard = self.write_lock.lock().await;
        let mut file = match self.load().await {
            Ok(file) => file,
            Err(StorageError::Serialization { reason }) => {
                tracing::warn!(path = %self.path.display(), error = %reason, "Agent store file is not valid JSON, replacing it");
                AgentStoreFile::default()
            }
            Err(err) => return Err(self.io_failure(err).into()),
        };
        let result = op(&mut file.agents)?;
        self.write_file(&file).await?;
        Ok(result)
    }
}

#[async_trait]
impl AgentStore for JsonFileStore {
    async fn list(&self) -> AgentDeskResult<Vec<AgentRecord>> {
        Ok(self.read_file().await.agents)
    }

    async fn insert(&self, agent: AgentRecord) -> AgentDeskResult<AgentRecord> {
        self.mutate(move |agents| {
            agents.push(agent.clone());
            Ok(agent)
        })
        .await
    }

    async fn replace(&self, id: &str, agent: AgentRecord) -> AgentDeskResult<AgentRecord> {
        self.mutate(move |agents| replace_in(agents, id, agent)).await
    }

    async fn remove(&self, id: &str) -> AgentDeskResult<AgentRecord> {
        self.mutate(move |agents| remove_from(agents, id)).await
    }

    async fn append_thought(&self, id: &str, entry: ThoughtEntry) -> AgentDeskResult<AgentRecord> {
        self.mutate(move |agents| append_thought_in(agents, id, entry)).await
    }

    async fn check(&self) -> AgentDeskResult<usize> {
        Ok(self.load().await?.agents.len())
    }
}
