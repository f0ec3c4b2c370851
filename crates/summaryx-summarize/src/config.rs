//! Configuration for summarization runs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeConfig {
    /// Sentences kept by the extractive stages.
    #[serde(default = "default_num_sentences")]
    pub num_sentences: usize,
    /// Fraction of sentences the hybrid condensation keeps.
    #[serde(default = "default_reduction_ratio")]
    pub reduction_ratio: f64,
    /// Condensation never targets fewer sentences than this.
    #[serde(default = "default_min_condensed_sentences")]
    pub min_condensed_sentences: usize,
    /// Key points re-ranked out of the final summary.
    #[serde(default = "default_key_points")]
    pub key_points: usize,
    /// Deadline for each call to the generative backend.
    #[serde(default = "default_generative_timeout_secs")]
    pub generative_timeout_secs: u64,
}

fn default_num_sentences()           -> usize { 10 }
fn default_reduction_ratio()         -> f64   { 0.5 }
fn default_min_condensed_sentences() -> usize { 5 }
fn default_key_points()              -> usize { 5 }
fn default_generative_timeout_secs() -> u64   { 120 }

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            num_sentences:           default_num_sentences(),
            reduction_ratio:         default_reduction_ratio(),
            min_condensed_sentences: default_min_condensed_sentences(),
            key_points:              default_key_points(),
            generative_timeout_secs: default_generative_timeout_secs(),
        }
    }
}
