//! summaryx-llm — Boundary to the external generative rewriting service.
//!
//! The core treats abstractive rewriting as a black box that returns a string
//! or fails. This crate holds the trait for that boundary and thin HTTP
//! clients for local/self-hosted chat-completions endpoints. It carries no
//! pipeline logic; failures here are absorbed by the orchestrator's fallback
//! chain, never surfaced to the caller.

pub mod backend;

pub use backend::{
    target_summary_window, GenerationRequest, GenerationResponse, GenerativeBackend, LlmError,
    OllamaBackend, OpenAiCompatibleBackend,
};
