//! Generative backend trait and concrete implementations.
//!
//! Backends:
//!   OllamaBackend           — local Ollama (OpenAI-compatible chat endpoint)
//!   OpenAiCompatibleBackend — any OpenAI-compatible endpoint (LMStudio,
//!                             vLLM, TogetherAI, OpenRouter, …)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Backend timed out after {0}s")]
    Timeout(u64),
    #[error("API error [{status}]: {message}")]
    ApiError { status: u16, message: String },
}

// ── Request / Response ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Text to rewrite into a summary.
    pub text: String,
    pub max_tokens: Option<u32>,
    pub min_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Request with a target length window scaled to the input size.
    pub fn sized_for(text: impl Into<String>) -> Self {
        let text = text.into();
        let (max_tokens, min_tokens) = target_summary_window(&text);
        Self {
            text,
            max_tokens: Some(max_tokens),
            min_tokens: Some(min_tokens),
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub summary: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Target summary length derived from the input word count, so short chunks
/// never get asked for summaries longer than themselves.
/// Returns (max_tokens, min_tokens): max in [30, 150], min in [10, 30].
pub fn target_summary_window(text: &str) -> (u32, u32) {
    let words = text.split_whitespace().count() as u32;
    let max = (words / 2).clamp(30, 150);
    let min = (words / 10).clamp(10, 30).min(max);
    (max, min)
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn summarize_text(&self, req: GenerationRequest) -> Result<GenerationResponse, LlmError>;
    fn model_id(&self) -> &str;
    fn is_local(&self) -> bool;
}

// ── Helpers: OpenAI-style chat completions ────────────────────────────────────

const SYSTEM_PROMPT: &str =
    "You condense scientific text. Write a faithful, self-contained summary of \
     the user's text. Do not add information that is not in the text.";

fn chat_body(model: &str, req: &GenerationRequest) -> serde_json::Value {
    let mut user = req.text.clone();
    if let Some(min) = req.min_tokens {
        user = format!("Summarize in at least {min} and at most {} words:\n\n{user}",
            req.max_tokens.unwrap_or(150));
    }
    serde_json::json!({
        "model":       model,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user",   "content": user },
        ],
        "max_tokens":  req.max_tokens.unwrap_or(150),
        "temperature": req.temperature.unwrap_or(0.1),
    })
}

fn parse_openai_response(json: &serde_json::Value, fallback_model: &str) -> GenerationResponse {
    GenerationResponse {
        summary: json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string(),
        model: json["model"]
            .as_str()
            .unwrap_or(fallback_model)
            .to_string(),
        prompt_tokens:     json["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
        completion_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
    }
}

async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    if status >= 400 {
        let msg = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(LlmError::ApiError { status, message: msg });
    }
    Ok(body)
}

// ── 1. Ollama (local) ─────────────────────────────────────────────────────────

pub struct OllamaBackend {
    pub base_url: String,
    pub model: String,
    client: reqwest::Client,
}

impl OllamaBackend {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), model: model.into(), client: reqwest::Client::new() }
    }
}

#[async_trait]
impl GenerativeBackend for OllamaBackend {
    async fn summarize_text(&self, req: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(model = %self.model, input_chars = req.text.len(), "ollama summarize request");
        let body = chat_body(&self.model, &req);
        let resp = self.client.post(&url).json(&body).send().await?;
        let json = check_response_status(resp).await?;
        Ok(parse_openai_response(&json, &self.model))
    }

    fn model_id(&self) -> &str { &self.model }
    fn is_local(&self) -> bool { true }
}

// ── 2. OpenAI-compatible (LMStudio, vLLM, TogetherAI, OpenRouter, …) ──────────

pub struct OpenAiCompatibleBackend {
    pub base_url: String,
    pub model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiCompatibleBackend {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(k) => req.bearer_auth(k),
            None    => req,
        }
    }
}

#[async_trait]
impl GenerativeBackend for OpenAiCompatibleBackend {
    async fn summarize_text(&self, req: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let body = chat_body(&self.model, &req);
        let resp = self.auth(self.client.post(&url)).json(&body).send().await?;
        let json = check_response_status(resp).await?;
        Ok(parse_openai_response(&json, &self.model))
    }

    fn model_id(&self) -> &str { &self.model }
    fn is_local(&self) -> bool { false }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
