//! Stored agent records.
//!
//! The store keeps each agent exactly as the caller sent it. [`AgentRecord`]
//! wraps the raw JSON value so that fields the typed [`Agent`] does not know
//! about, fields of an unexpected type, and missing fields all survive a
//! read-modify-write cycle unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::{Agent, Thought, ThoughtEntry};
use crate::error::ValidationError;

/// One agent as persisted and served: any JSON value, usually an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentRecord(Value);

impl AgentRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// A top-level field, if the record is an object that has it.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The record's id. Numeric ids are rendered in decimal.
    pub fn id(&self) -> Option<String> {
        match self.field("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Whether this record is stored under `id`.
    pub fn matches_id(&self, id: &str) -> bool {
        match self.field("id") {
            Some(Value::String(own)) => own == id,
            Some(Value::Number(own)) => own.to_string() == id,
            _ => false,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }

    /// Number of entries in the `thoughts` array (0 when absent).
    pub fn thought_count(&self) -> usize {
        self.field("thoughts")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Thoughts in either known shape. Entries matching neither are skipped.
    pub fn thoughts(&self) -> Vec<ThoughtEntry> {
        self.field("thoughts")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| ThoughtEntry::deserialize(entry).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Append a thought, creating the `thoughts` array when it is absent or
    /// null. Returns the new thought count.
    pub fn push_thought(&mut self, entry: ThoughtEntry) -> Result<usize, ValidationError> {
        let Value::Object(fields) = &mut self.0 else {
            return Err(ValidationError::InvalidValue {
                field: "agent".to_string(),
                reason: "stored record is not a JSON object".to_string(),
            });
        };

        let slot = fields.entry("thoughts").or_insert(Value::Null);
        if slot.is_null() {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(thoughts) => {
                thoughts.push(thought_value(entry));
                Ok(thoughts.len())
            }
            _ => Err(ValidationError::InvalidValue {
                field: "thoughts".to_string(),
                reason: "stored thoughts are not an array".to_string(),
            }),
        }
    }

    /// Typed view of the record. Fails when a field has an unexpected type.
    pub fn to_agent(&self) -> Result<Agent, serde_json::Error> {
        Agent::deserialize(&self.0)
    }
}

impl From<Value> for AgentRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Agent> for AgentRecord {
    fn from(agent: Agent) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(agent.id));
        fields.insert("name".to_string(), Value::String(agent.name));
        fields.insert("description".to_string(), Value::String(agent.description));
        fields.insert("prompt".to_string(), Value::String(agent.prompt));
        fields.insert(
            "thoughts".to_string(),
            Value::Array(agent.thoughts.into_iter().map(thought_value).collect()),
        );
        fields.insert("createdAt".to_string(), Value::String(agent.created_at));
        if !agent.applications.is_empty() {
            fields.insert("applications".to_string(), Value::Array(agent.applications));
        }
        Self(Value::Object(fields))
    }
}

fn thought_value(entry: ThoughtEntry) -> Value {
    match entry {
        ThoughtEntry::Text(text) => Value::String(text),
        ThoughtEntry::Record(Thought {
            id,
            content,
            created_at,
            agent_id,
        }) => {
            let mut fields = Map::new();
            fields.insert("id".to_string(), Value::String(id));
            fields.insert("content".to_string(), Value::String(content));
            fields.insert("createdAt".to_string(), Value::String(created_at));
            fields.insert("agentId".to_string(), Value::String(agent_id));
            Value::Object(fields)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_off_schema_record_round_trips() -> Result<(), serde_json::Error> {
        let raw = json!({
            "id": 1718000000000u64,
            "description": null,
            "model": "gpt-4o",
            "thoughts": [{ "note": "no content field" }]
        });
        let record: AgentRecord = serde_json::from_value(raw.clone())?;
        assert_eq!(serde_json::to_value(&record)?, raw);
        assert!(record.to_agent().is_err());
        Ok(())
    }

    #[test]
    fn test_matches_string_and_numeric_ids() {
        assert!(AgentRecord::new(json!({ "id": "42" })).matches_id("42"));
        assert!(AgentRecord::new(json!({ "id": 42 })).matches_id("42"));
        assert!(!AgentRecord::new(json!({ "id": null })).matches_id("null"));
        assert!(!AgentRecord::new(json!("42")).matches_id("42"));
        assert_eq!(AgentRecord::new(json!({ "id": 7 })).id().as_deref(), Some("7"));
    }

    #[test]
    fn test_push_thought_creates_missing_array() -> Result<(), ValidationError> {
        let mut record = AgentRecord::new(json!({ "id": "1" }));
        assert_eq!(record.push_thought("first".into())?, 1);

        let mut record = AgentRecord::new(json!({ "id": "1", "thoughts": null }));
        assert_eq!(record.push_thought(Thought::new("1", "second").into())?, 1);
        assert_eq!(record.field("thoughts").and_then(|t| t[0]["agentId"].as_str()), Some("1"));
        Ok(())
    }

    #[test]
    fn test_push_thought_rejects_non_array_thoughts() {
        let mut record = AgentRecord::new(json!({ "id": "1", "thoughts": "oops" }));
        assert!(record.push_thought("x".into()).is_err());
        assert_eq!(record.field("thoughts"), Some(&json!("oops")));

        let mut scalar = AgentRecord::new(json!(3));
        assert!(scalar.push_thought("x".into()).is_err());
    }

    #[test]
    fn test_thoughts_skips_unknown_shapes() {
        let record = AgentRecord::new(json!({
            "thoughts": ["plain", { "content": "rich" }, 5, { "other": true }]
        }));
        let thoughts = record.thoughts();
        assert_eq!(thoughts.len(), 2);
        assert_eq!(thoughts[1].content(), "rich");
        assert_eq!(record.thought_count(), 4);
    }

    #[test]
    fn test_from_agent_matches_serde_layout() -> Result<(), serde_json::Error> {
        let mut agent = Agent {
            id: "a1".to_string(),
            name: "Support".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            ..Agent::default()
        };
        agent.push_thought("plain".into());
        agent.push_thought(Thought::new("a1", "rich").into());

        let expected = serde_json::to_value(&agent)?;
        assert_eq!(AgentRecord::from(agent).into_value(), expected);
        Ok(())
    }
}
