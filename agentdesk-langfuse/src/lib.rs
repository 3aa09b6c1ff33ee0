//! Langfuse prompt-service integration
//!
//! A thin pass-through to the hosted prompt/trace service:
//! - [`LangfuseClient`] speaks the public REST API over reqwest
//! - [`PromptService`] forwards each call, logs failures, and returns the
//!   error unchanged
//!
//! There is no retry, backoff, or response validation beyond JSON decoding.

pub mod client;
pub mod config;
pub mod service;
pub mod types;

pub use client::LangfuseClient;
pub use config::LangfuseConfig;
pub use service::{PromptBackend, PromptService};
pub use types::{
    CreatePromptParams, IngestionBatch, IngestionError, IngestionEvent, IngestionResponse,
    IngestionSuccess, Prompt, PromptConfig, PromptList, PromptMeta, TraceRef, UpdatePromptParams,
};
