//! End-to-end tests: raw document → preprocess → summarize, with mock
//! generative backends exercising the whole fallback chain.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use summaryx_llm::{GenerationRequest, GenerationResponse, GenerativeBackend, LlmError};
use summaryx_preprocess::{preprocess, DocumentSource, PreprocessConfig, PreprocessedDocument, RawDocument};
use summaryx_summarize::{summarize, SummarizeConfig, SummaryMethod, SummaryStrategy};

// ── Mock backends ─────────────────────────────────────────────────────────────

/// Succeeds on every call with a deterministic rewrite.
struct EchoBackend;

#[async_trait]
impl GenerativeBackend for EchoBackend {
    async fn summarize_text(
        &self,
        req: GenerationRequest,
    ) -> Result<GenerationResponse, LlmError> {
        let words: Vec<&str> = req.text.split_whitespace().take(25).collect();
        Ok(GenerationResponse {
            summary: format!("Rewritten: {}", words.join(" ")),
            model: "echo".to_string(),
            prompt_tokens: 0,
            completion_tokens: 0,
        })
    }

    fn model_id(&self) -> &str { "echo" }
    fn is_local(&self) -> bool { true }
}

/// Permanently failing collaborator.
struct FailingBackend;

#[async_trait]
impl GenerativeBackend for FailingBackend {
    async fn summarize_text(
        &self,
        _req: GenerationRequest,
    ) -> Result<GenerationResponse, LlmError> {
        Err(LlmError::Unavailable("model load failed".to_string()))
    }

    fn model_id(&self) -> &str { "failing" }
    fn is_local(&self) -> bool { true }
}

/// Fails every second call (per-chunk partial failures).
struct FlakyBackend {
    calls: AtomicUsize,
}

impl FlakyBackend {
    fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl GenerativeBackend for FlakyBackend {
    async fn summarize_text(
        &self,
        req: GenerationRequest,
    ) -> Result<GenerationResponse, LlmError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n % 2 == 1 {
            return Err(LlmError::ApiError { status: 500, message: "overloaded".to_string() });
        }
        let words: Vec<&str> = req.text.split_whitespace().take(10).collect();
        Ok(GenerationResponse {
            summary: words.join(" "),
            model: "flaky".to_string(),
            prompt_tokens: 0,
            completion_tokens: 0,
        })
    }

    fn model_id(&self) -> &str { "flaky" }
    fn is_local(&self) -> bool { true }
}

/// Never answers inside any reasonable deadline.
struct HangingBackend;

#[async_trait]
impl GenerativeBackend for HangingBackend {
    async fn summarize_text(
        &self,
        _req: GenerationRequest,
    ) -> Result<GenerationResponse, LlmError> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        unreachable!("deadline should fire first");
    }

    fn model_id(&self) -> &str { "hanging" }
    fn is_local(&self) -> bool { true }
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn paper_document() -> PreprocessedDocument {
    let intro = "Large models continue to improve with scale on many benchmarks. ".repeat(8);
    let method = "Our method trains compact distilled models with targeted data. ".repeat(8);
    let results = "Distilled compact models match larger baselines on most tasks. ".repeat(8);
    let text = format!(
        "Introduction\n{intro}\n\nMethod\n{method}\n\nResults\n{results}\n\nReferences\n[1] A. Author."
    );
    let raw = RawDocument {
        source: DocumentSource::PdfExtract,
        paper_id: Some("2312.00123".to_string()),
        title: Some("Distilling at Scale".to_string()),
        abstract_text: Some(
            "We distill large models into compact ones that retain accuracy. \
             Evaluation covers translation and summarization benchmarks."
                .to_string(),
        ),
        text,
        meta: HashMap::new(),
    };
    preprocess(raw, &PreprocessConfig::default())
}

/// Same document chunked small enough to force several chunks.
fn paper_document_many_chunks() -> PreprocessedDocument {
    let body: String = (0..12)
        .map(|i| format!("Topic t{i} paragraph with enough words to fill a budget slot. "))
        .map(|p| p.repeat(6) + "\n\n")
        .collect();
    let raw = RawDocument {
        source: DocumentSource::PlainText,
        paper_id: None,
        title: None,
        abstract_text: None,
        text: body,
        meta: HashMap::new(),
    };
    let cfg = PreprocessConfig {
        max_tokens_per_chunk: 80,
        overlap_tokens: 10,
        ..Default::default()
    };
    preprocess(raw, &cfg)
}

fn empty_document() -> PreprocessedDocument {
    let raw = RawDocument {
        source: DocumentSource::PlainText,
        paper_id: None,
        title: None,
        abstract_text: None,
        text: String::new(),
        meta: HashMap::new(),
    };
    preprocess(raw, &PreprocessConfig::default())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_extractive_path() {
    let doc = paper_document();
    let result = summarize(&doc, SummaryStrategy::Extractive, None, &SummarizeConfig::default())
        .await
        .unwrap();

    assert_eq!(result.method, SummaryMethod::Extractive);
    assert!(!result.text.is_empty());
    assert!(result.contributions.len() <= 10);
    assert!(result.key_points.len() <= 5);
}

#[tokio::test]
async fn test_hybrid_success_is_tagged_hybrid() {
    let doc = paper_document();
    let result = summarize(
        &doc,
        SummaryStrategy::Hybrid,
        Some(&EchoBackend),
        &SummarizeConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(result.method, SummaryMethod::Hybrid);
    assert!(result.text.starts_with("Rewritten:"));
    assert!(!result.contributions.is_empty());
}

#[tokio::test]
async fn test_hybrid_with_failing_backend_degrades_without_error() {
    let doc = paper_document();
    let result = summarize(
        &doc,
        SummaryStrategy::Hybrid,
        Some(&FailingBackend),
        &SummarizeConfig::default(),
    )
    .await
    .expect("fallback must absorb the failure");

    assert_eq!(result.method, SummaryMethod::ExtractiveFallback);
    assert!(!result.text.is_empty());
}

#[tokio::test]
async fn test_hybrid_with_hanging_backend_times_out_and_degrades() {
    tokio::time::pause();
    let doc = paper_document();
    let cfg = SummarizeConfig { generative_timeout_secs: 1, ..Default::default() };
    let result = summarize(&doc, SummaryStrategy::Hybrid, Some(&HangingBackend), &cfg)
        .await
        .expect("timeout must degrade, not fail");

    assert_eq!(result.method, SummaryMethod::ExtractiveFallback);
    assert!(!result.text.is_empty());
}

#[tokio::test]
async fn test_abstractive_skips_failed_chunks() {
    let doc = paper_document_many_chunks();
    assert!(doc.chunks.len() >= 3, "fixture should chunk: got {}", doc.chunks.len());

    let backend = FlakyBackend::new();
    let result = summarize(
        &doc,
        SummaryStrategy::Abstractive,
        Some(&backend),
        &SummarizeConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(result.method, SummaryMethod::Abstractive);
    // Every other chunk failed, the rest were joined.
    assert_eq!(result.contributions.len(), doc.chunks.len().div_ceil(2));
}

#[tokio::test]
async fn test_abstractive_with_all_chunks_failing_degrades() {
    let doc = paper_document_many_chunks();
    let result = summarize(
        &doc,
        SummaryStrategy::Abstractive,
        Some(&FailingBackend),
        &SummarizeConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(result.method, SummaryMethod::ExtractiveFallback);
    assert!(!result.text.is_empty());
}

#[tokio::test]
async fn test_llm_strategy_without_backend_degrades() {
    let doc = paper_document();
    let result = summarize(&doc, SummaryStrategy::Hybrid, None, &SummarizeConfig::default())
        .await
        .unwrap();
    assert_eq!(result.method, SummaryMethod::ExtractiveFallback);

    let result = summarize(&doc, SummaryStrategy::Abstractive, None, &SummarizeConfig::default())
        .await
        .unwrap();
    assert_eq!(result.method, SummaryMethod::ExtractiveFallback);
}

#[tokio::test]
async fn test_empty_document_is_the_only_error() {
    let doc = empty_document();
    let err = summarize(&doc, SummaryStrategy::Extractive, None, &SummarizeConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, summaryx_common::SummaryxError::EmptyInput(_)));
}

#[tokio::test]
async fn test_abstract_only_document_still_summarizes() {
    let raw = RawDocument {
        source: DocumentSource::RemoteAbstract,
        paper_id: Some("2101.99999".to_string()),
        title: Some("Abstract Only".to_string()),
        abstract_text: Some(
            "This work proposes a novel regularizer for sparse networks. \
             The regularizer improves convergence on sparse benchmarks. \
             Experiments confirm the sparse regularizer effect at scale."
                .to_string(),
        ),
        text: String::new(),
        meta: HashMap::new(),
    };
    let doc = preprocess(raw, &PreprocessConfig::default());
    assert!(doc.focus_text.starts_with("ABSTRACT"));

    let result = summarize(&doc, SummaryStrategy::Extractive, None, &SummarizeConfig::default())
        .await
        .unwrap();
    assert!(!result.text.is_empty());
}

#[tokio::test]
async fn test_contributions_preserve_document_order() {
    let doc = paper_document();
    let result = summarize(&doc, SummaryStrategy::Extractive, None, &SummarizeConfig::default())
        .await
        .unwrap();

    // Each contribution must appear in the focus text after its predecessor.
    let mut last_pos = 0usize;
    for sentence in &result.contributions {
        let pos = doc.focus_text[last_pos..]
            .find(sentence.trim_end_matches('.'))
            .map(|p| p + last_pos)
            .expect("contribution must come from the focus text in order");
        assert!(pos >= last_pos);
        last_pos = pos;
    }
}
