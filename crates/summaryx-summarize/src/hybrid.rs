//! Hybrid orchestration state machine.
//!
//! Start → Filtered → Delegated → Done, with the alternate terminal Degraded:
//! condense the input via extractive ranking (order-preserving), delegate the
//! condensed text to the generative backend, and on any failure re-rank the
//! original uncondensed text instead. The caller never sees the failure,
//! only the honest method tag.

use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use summaryx_llm::{GenerationRequest, GenerativeBackend, LlmError};
use summaryx_ranker::rank;

use crate::config::SummarizeConfig;
use crate::models::{StageOutcome, SummaryMethod};

/// States of a hybrid run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HybridState {
    Start,
    Filtered,
    Delegated,
    Done,
    Degraded,
}

/// Number of sentences the condensation keeps, derived from a cheap
/// approximation of the sentence count.
pub fn condensation_target(text: &str, cfg: &SummarizeConfig) -> usize {
    let approx_sentences = text.matches('.').count();
    ((approx_sentences as f64 * cfg.reduction_ratio).ceil() as usize)
        .max(cfg.min_condensed_sentences)
}

pub(crate) async fn run_hybrid(
    focus_text: &str,
    backend: &dyn GenerativeBackend,
    cfg: &SummarizeConfig,
) -> StageOutcome {
    let mut state = HybridState::Start;
    debug!(?state, input_chars = focus_text.len(), "hybrid run starting");

    // Start → Filtered: condense while preserving document order.
    let target = condensation_target(focus_text, cfg);
    let (condensed, kept) = rank(focus_text, target);
    state = HybridState::Filtered;
    debug!(
        ?state,
        target,
        condensed_chars = condensed.len(),
        "condensation complete"
    );

    // Filtered → Delegated: hand off to the external generative step.
    state = HybridState::Delegated;
    debug!(?state, model = backend.model_id(), "delegating condensed text");
    let deadline = Duration::from_secs(cfg.generative_timeout_secs);
    let request = GenerationRequest::sized_for(condensed);
    let result = match timeout(deadline, backend.summarize_text(request)).await {
        Ok(inner) => inner,
        Err(_) => Err(LlmError::Timeout(deadline.as_secs())),
    };

    let summary = match result {
        Ok(resp) if !resp.summary.trim().is_empty() => Some(resp.summary),
        Ok(_) => {
            warn!("generative step returned empty output");
            None
        }
        Err(e) => {
            warn!(error = %e, "generative step failed");
            None
        }
    };

    match summary {
        Some(text) => {
            state = HybridState::Done;
            info!(?state, "hybrid summary complete");
            StageOutcome {
                method: SummaryMethod::Hybrid,
                text,
                contributions: kept.into_iter().map(|s| s.text).collect(),
            }
        }
        None => {
            // Delegated → Degraded: re-rank the original, uncondensed text.
            state = HybridState::Degraded;
            warn!(?state, "falling back to extractive ranking of the full focus text");
            let (text, sentences) = rank(focus_text, cfg.num_sentences);
            StageOutcome {
                method: SummaryMethod::ExtractiveFallback,
                text,
                contributions: sentences.into_iter().map(|s| s.text).collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condensation_target_applies_ratio_and_floor() {
        let cfg = SummarizeConfig::default(); // ratio 0.5, floor 5
        let text = "A sentence. ".repeat(40);
        assert_eq!(condensation_target(&text, &cfg), 20);

        let short = "One. Two. Three.";
        assert_eq!(condensation_target(short, &cfg), 5);
    }

    #[test]
    fn test_condensation_target_rounds_up() {
        let cfg = SummarizeConfig { reduction_ratio: 0.5, ..Default::default() };
        let text = "A sentence. ".repeat(13);
        // ceil(13 * 0.5) = 7
        assert_eq!(condensation_target(&text, &cfg), 7);
    }
}
