//! summaryx-ranker — TF-IDF extractive sentence ranking.
//!
//! Scores sentences by term-frequency statistics over the document itself and
//! selects the most salient ones, preserving original document order in the
//! output. All statistical failure modes degrade to verbatim fallbacks; the
//! public API never fails.

pub mod extractive;
pub mod sentences;
pub mod stopwords;
pub mod tfidf;

pub use extractive::{rank, RankedSentence};
pub use tfidf::{EmptyVocabulary, TfIdfModel};
