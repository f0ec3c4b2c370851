//! Per-chunk abstractive summarization with partial-failure tolerance.
//!
//! One failing chunk must not abort the whole run: it is skipped with a
//! warning and the remaining outputs are joined. Only when zero chunks
//! succeed does the caller fall back entirely.

use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use summaryx_llm::{GenerationRequest, GenerativeBackend, LlmError};
use summaryx_preprocess::Chunk;

/// Summarize each chunk through the generative backend under a per-call
/// deadline. Returns the joined summary and the per-chunk outputs in order.
pub async fn summarize_chunks(
    chunks: &[Chunk],
    backend: &dyn GenerativeBackend,
    deadline: Duration,
) -> Result<(String, Vec<String>), LlmError> {
    let mut outputs: Vec<String> = Vec::new();

    for chunk in chunks {
        let req = GenerationRequest::sized_for(chunk.text.clone());
        let result = match timeout(deadline, backend.summarize_text(req)).await {
            Ok(inner) => inner,
            Err(_) => Err(LlmError::Timeout(deadline.as_secs())),
        };

        match result {
            Ok(resp) if !resp.summary.trim().is_empty() => {
                debug!(chunk = chunk.index, out_chars = resp.summary.len(), "chunk summarized");
                outputs.push(resp.summary);
            }
            Ok(_) => {
                warn!(chunk = chunk.index, "chunk summary empty, skipping");
            }
            Err(e) => {
                warn!(chunk = chunk.index, error = %e, "chunk summarization failed, skipping");
            }
        }
    }

    if outputs.is_empty() {
        return Err(LlmError::Unavailable(
            "no chunk produced a summary".to_string(),
        ));
    }
    Ok((outputs.join(" "), outputs))
}
