//! Extractive ranking: select the most salient sentences of a text,
//! preserving original document order in the output.

use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

use crate::sentences::{is_low_value, scoring_key, split_sentences};
use crate::tfidf::TfIdfModel;

/// A selected sentence with its position in the source text and its
/// aggregate TF-IDF score (0.0 on verbatim fallbacks).
#[derive(Debug, Clone, Serialize)]
pub struct RankedSentence {
    pub index: usize,
    pub text: String,
    pub score: f64,
}

/// Rank sentences by aggregate TF-IDF and return the top `num_sentences` in
/// original document order, joined into a summary string.
///
/// Degrade paths, in order:
/// - nothing survives the low-value filter → first `num_sentences` sentences
///   verbatim;
/// - the filtered corpus has an empty vocabulary → same verbatim fallback;
/// - fewer survivors than requested → all survivors.
///
/// Never fails; empty input yields empty output.
pub fn rank(text: &str, num_sentences: usize) -> (String, Vec<RankedSentence>) {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return (String::new(), Vec::new());
    }

    // (original index, scoring key) for sentences worth scoring.
    let eligible: Vec<(usize, String)> = sentences
        .iter()
        .enumerate()
        .filter(|(_, s)| !is_low_value(s))
        .map(|(i, s)| (i, scoring_key(s)))
        .collect();

    if eligible.is_empty() {
        debug!("no sentences survived filtering, returning first {num_sentences} verbatim");
        return first_n(&sentences, num_sentences);
    }

    let corpus: Vec<String> = eligible.iter().map(|(_, key)| key.clone()).collect();
    let model = match TfIdfModel::fit(&corpus) {
        Ok(model) => model,
        Err(empty) => {
            debug!(%empty, "falling back to first {num_sentences} sentences verbatim");
            return first_n(&sentences, num_sentences);
        }
    };

    let mut scored: Vec<(usize, f64)> = eligible
        .iter()
        .map(|(i, key)| (*i, model.score(key)))
        .collect();

    if scored.len() > num_sentences {
        // Highest score first; ties broken by source position so selection
        // is deterministic.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(num_sentences);
    }

    // Back to original document order: callers depend on narrative flow,
    // not score order.
    scored.sort_by_key(|(i, _)| *i);

    let selected: Vec<RankedSentence> = scored
        .into_iter()
        .map(|(index, score)| RankedSentence {
            index,
            text: sentences[index].clone(),
            score,
        })
        .collect();

    let joined = selected
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    (joined, selected)
}

fn first_n(sentences: &[String], n: usize) -> (String, Vec<RankedSentence>) {
    let selected: Vec<RankedSentence> = sentences
        .iter()
        .take(n)
        .enumerate()
        .map(|(index, text)| RankedSentence {
            index,
            text: text.clone(),
            score: 0.0,
        })
        .collect();
    let joined = selected
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    (joined, selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_sentence_text() -> String {
        [
            "The transformer architecture relies entirely on attention mechanisms.",
            "Attention mechanisms compute weighted averages over token representations.",
            "We evaluate the transformer attention approach on translation benchmarks.",
            "The weather that week was pleasant overall.",
            "Results show attention transformer models outperform recurrent baselines.",
        ]
        .join(" ")
    }

    #[test]
    fn test_exactly_k_sentences_in_source_order() {
        let (joined, selected) = rank(&five_sentence_text(), 3);
        assert_eq!(selected.len(), 3);
        for pair in selected.windows(2) {
            assert!(pair[0].index < pair[1].index);
        }
        assert!(!joined.is_empty());
    }

    #[test]
    fn test_high_overlap_sentences_outrank_off_topic_one() {
        // Four sentences share the attention/transformer vocabulary; the
        // weather sentence shares almost nothing and should be dropped first.
        let (_, selected) = rank(&five_sentence_text(), 4);
        assert_eq!(selected.len(), 4);
        assert!(selected.iter().all(|s| !s.text.contains("weather")));
    }

    #[test]
    fn test_returns_all_when_fewer_than_requested() {
        let (_, selected) = rank(&five_sentence_text(), 50);
        assert_eq!(selected.len(), 5);
    }

    #[test]
    fn test_boundedness() {
        for k in 0..7 {
            let (_, selected) = rank(&five_sentence_text(), k);
            assert_eq!(selected.len(), k.min(5));
        }
    }

    #[test]
    fn test_empty_input() {
        let (joined, selected) = rank("", 10);
        assert!(joined.is_empty());
        assert!(selected.is_empty());
    }

    #[test]
    fn test_all_filtered_falls_back_to_first_n() {
        // Every sentence is under the length threshold.
        let (joined, selected) = rank("Tiny. Small. Short.", 2);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].text, "Tiny.");
        assert_eq!(joined, "Tiny. Small.");
    }

    #[test]
    fn test_empty_vocabulary_falls_back_to_first_n() {
        // Long enough to survive filtering, but entirely stop words.
        let text = "They would have been there with them and that was all of it. \
                    We should not have been here with you because of all this.";
        let (_, selected) = rank(text, 1);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].index, 0);
        assert_eq!(selected[0].score, 0.0);
    }

    #[test]
    fn test_scores_attached_to_selection() {
        let (_, selected) = rank(&five_sentence_text(), 3);
        assert!(selected.iter().all(|s| s.score > 0.0));
    }
}
