//! Identifier and timestamp helpers.
//!
//! Agent ids are opaque strings chosen by the caller. The dashboard uses the
//! current Unix time in milliseconds, so [`new_agent_id`] produces the same
//! shape for server-side callers and test fixtures. Nothing checks ids for
//! collisions.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Agent identifier as stored on disk and matched in routes.
pub type AgentId = String;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate an agent id in the dashboard's millisecond-timestamp format.
pub fn new_agent_id() -> AgentId {
    Utc::now().timestamp_millis().to_string()
}

/// Generate a thought id (UUIDv4, matching the structured thought record).
pub fn new_thought_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time as an RFC 3339 string with millisecond precision.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
