//! summaryx-summarize — Summarization orchestration.
//!
//! Dispatches a preprocessed document to one of three strategies:
//! - extractive: TF-IDF sentence ranking, in-process;
//! - abstractive: per-chunk delegation to a generative backend;
//! - hybrid: extractive condensation, then one generative pass.
//!
//! Strategies that need the generative backend degrade to
//! `extractive (fallback)` when it is missing, errors, or times out. The only
//! error returned to the caller is `EmptyInput` for a document with no text
//! and no abstract.

pub mod abstractive;
pub mod config;
pub mod hybrid;
pub mod models;

use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use summaryx_common::{Result, SummaryxError};
use summaryx_llm::GenerativeBackend;
use summaryx_preprocess::PreprocessedDocument;
use summaryx_ranker::rank;

pub use config::SummarizeConfig;
pub use hybrid::HybridState;
pub use models::{SummaryMethod, SummaryResult, SummaryStrategy};

use models::StageOutcome;

/// Produce a summary for a preprocessed document.
///
/// Always returns a complete `SummaryResult` when the document has any
/// content; the `method` field reflects any degradation honestly.
#[instrument(skip(doc, backend, cfg), fields(paper_id = ?doc.paper_id, strategy = ?strategy))]
pub async fn summarize(
    doc: &PreprocessedDocument,
    strategy: SummaryStrategy,
    backend: Option<&dyn GenerativeBackend>,
    cfg: &SummarizeConfig,
) -> Result<SummaryResult> {
    let t0 = Instant::now();
    let run_id = Uuid::new_v4();

    if doc.focus_text.trim().is_empty() {
        return Err(SummaryxError::EmptyInput(
            "document has no text and no abstract".to_string(),
        ));
    }

    let outcome = match (strategy, backend) {
        (SummaryStrategy::Extractive, _) => extractive_outcome(&doc.focus_text, cfg),
        (SummaryStrategy::Hybrid, Some(b)) => hybrid::run_hybrid(&doc.focus_text, b, cfg).await,
        (SummaryStrategy::Abstractive, Some(b)) => abstractive_outcome(doc, b, cfg).await,
        (_, None) => {
            warn!("no generative backend configured, using extractive ranking instead");
            let mut outcome = extractive_outcome(&doc.focus_text, cfg);
            outcome.method = SummaryMethod::ExtractiveFallback;
            outcome
        }
    };

    // Key points are the summary's own top sentences.
    let (_, key_sentences) = rank(&outcome.text, cfg.key_points);
    let key_points: Vec<String> = key_sentences.into_iter().map(|s| s.text).collect();

    info!(
        %run_id,
        method = %outcome.method,
        input_chars = doc.focus_text.len(),
        summary_chars = outcome.text.len(),
        "summarization complete"
    );

    Ok(SummaryResult {
        run_id,
        method: outcome.method,
        input_chars: doc.focus_text.len(),
        summary_chars: outcome.text.len(),
        text: outcome.text,
        contributions: outcome.contributions,
        key_points,
        duration_ms: t0.elapsed().as_millis() as u64,
    })
}

fn extractive_outcome(focus_text: &str, cfg: &SummarizeConfig) -> StageOutcome {
    let (text, sentences) = rank(focus_text, cfg.num_sentences);
    StageOutcome {
        method: SummaryMethod::Extractive,
        text,
        contributions: sentences.into_iter().map(|s| s.text).collect(),
    }
}

async fn abstractive_outcome(
    doc: &PreprocessedDocument,
    backend: &dyn GenerativeBackend,
    cfg: &SummarizeConfig,
) -> StageOutcome {
    let deadline = Duration::from_secs(cfg.generative_timeout_secs);
    match abstractive::summarize_chunks(&doc.chunks, backend, deadline).await {
        Ok((text, outputs)) => StageOutcome {
            method: SummaryMethod::Abstractive,
            text,
            contributions: outputs,
        },
        Err(e) => {
            warn!(error = %e, "abstractive summarization unavailable, falling back to extractive");
            let mut outcome = extractive_outcome(&doc.focus_text, cfg);
            outcome.method = SummaryMethod::ExtractiveFallback;
            outcome
        }
    }
}
