//! Term-frequency / inverse-document-frequency model over a sentence corpus.
//!
//! The corpus is the filtered sentence set of a single document. An empty
//! vocabulary (all-stopword or all-numeric text) is an explicit typed outcome
//! so callers choose the fallback in the open rather than in a catch clause.

use std::collections::HashMap;
use thiserror::Error;

use crate::stopwords::is_stop_word;

/// The corpus produced no scorable terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("TF-IDF vocabulary is empty")]
pub struct EmptyVocabulary;

/// Per-term IDF weights fitted over a sentence corpus.
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    idf: HashMap<String, f64>,
}

impl TfIdfModel {
    /// Fit IDF weights over the corpus. Stop words are excluded from the
    /// vocabulary. Smooth IDF: ln((1 + n) / (1 + df)) + 1.
    pub fn fit(corpus: &[String]) -> Result<Self, EmptyVocabulary> {
        let n = corpus.len();
        let mut df: HashMap<&str, usize> = HashMap::new();

        for doc in corpus {
            let mut seen: Vec<&str> = Vec::new();
            for term in doc.split_whitespace() {
                if is_stop_word(term) || seen.contains(&term) {
                    continue;
                }
                seen.push(term);
                *df.entry(term).or_insert(0) += 1;
            }
        }

        if df.is_empty() {
            return Err(EmptyVocabulary);
        }

        let idf = df
            .into_iter()
            .map(|(term, count)| {
                let weight = ((1.0 + n as f64) / (1.0 + count as f64)).ln() + 1.0;
                (term.to_string(), weight)
            })
            .collect();

        Ok(Self { idf })
    }

    /// Score a document as the sum of tf·idf over its in-vocabulary terms.
    pub fn score(&self, doc: &str) -> f64 {
        let mut tf: HashMap<&str, usize> = HashMap::new();
        for term in doc.split_whitespace() {
            *tf.entry(term).or_insert(0) += 1;
        }
        tf.into_iter()
            .filter_map(|(term, count)| self.idf.get(term).map(|idf| count as f64 * idf))
            .sum()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }
}
