//! Result types for summarization runs.

use serde::Serialize;
use uuid::Uuid;

/// How the final summary was actually produced. `Hybrid` and `Abstractive`
/// degrade to `ExtractiveFallback` when the generative step is unavailable;
/// the tag is informational, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SummaryMethod {
    #[serde(rename = "extractive")]
    Extractive,
    #[serde(rename = "abstractive")]
    Abstractive,
    #[serde(rename = "hybrid")]
    Hybrid,
    #[serde(rename = "extractive (fallback)")]
    ExtractiveFallback,
}

impl SummaryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryMethod::Extractive         => "extractive",
            SummaryMethod::Abstractive        => "abstractive",
            SummaryMethod::Hybrid             => "hybrid",
            SummaryMethod::ExtractiveFallback => "extractive (fallback)",
        }
    }
}

impl std::fmt::Display for SummaryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which summarization strategy the caller requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStrategy {
    Extractive,
    Abstractive,
    Hybrid,
}

/// Internal hand-off between strategy runners and result assembly.
#[derive(Debug)]
pub(crate) struct StageOutcome {
    pub method: SummaryMethod,
    pub text: String,
    pub contributions: Vec<String>,
}

/// Final output of a summarization run.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub run_id: Uuid,
    pub method: SummaryMethod,
    pub text: String,
    /// The sentences (extractive paths) or per-chunk outputs (abstractive
    /// paths) that contributed to the final text, in document order.
    pub contributions: Vec<String>,
    /// Bullet-style key points re-ranked out of the final summary.
    pub key_points: Vec<String>,
    pub input_chars: usize,
    pub summary_chars: usize,
    pub duration_ms: u64,
}
