//! Data models for the preprocessing pipeline.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Where the raw text of a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSource {
    /// Metadata + abstract fetched from a remote index (e.g. arXiv).
    RemoteAbstract,
    /// Full text recovered from a binary page format (PDF extraction).
    PdfExtract,
    /// Plain text handed in directly.
    PlainText,
}

impl DocumentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentSource::RemoteAbstract => "remote_abstract",
            DocumentSource::PdfExtract     => "pdf_extract",
            DocumentSource::PlainText      => "plain_text",
        }
    }
}

/// A document as produced by an ingestion collaborator, before preprocessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub source: DocumentSource,
    pub paper_id: Option<String>,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub text: String,
    /// Open key/value carry-through (fetch URLs, extraction method, …).
    #[serde(default)]
    pub meta: HashMap<String, String>,
}

/// Canonical section names recognized by the sectioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Abstract,
    Introduction,
    Background,
    RelatedWork,
    Preliminaries,
    Method,
    Approach,
    Model,
    Experiments,
    Results,
    Discussion,
    Analysis,
    Conclusion,
    Limitations,
    FutureWork,
    Acknowledgments,
    References,
    Appendix,
}

impl SectionName {
    /// Canonicalize a matched heading string.
    /// Variants collapse onto one canonical name (`methods`/`methodology` →
    /// `Method`, `conclusions` → `Conclusion`, `bibliography` → `References`).
    pub fn from_heading(heading: &str) -> Option<Self> {
        let h = heading.trim().to_lowercase();
        let name = match h.as_str() {
            "abstract"                              => SectionName::Abstract,
            "introduction"                          => SectionName::Introduction,
            "background"                            => SectionName::Background,
            "related work"                          => SectionName::RelatedWork,
            "preliminaries"                         => SectionName::Preliminaries,
            "method" | "methods" | "methodology"    => SectionName::Method,
            "approach"                              => SectionName::Approach,
            "model"                                 => SectionName::Model,
            "experiment" | "experiments" | "experimental setup" => SectionName::Experiments,
            "result" | "results"                    => SectionName::Results,
            "discussion"                            => SectionName::Discussion,
            "analysis"                              => SectionName::Analysis,
            "conclusion" | "conclusions"            => SectionName::Conclusion,
            "limitations"                           => SectionName::Limitations,
            "future work"                           => SectionName::FutureWork,
            "acknowledgment" | "acknowledgments" | "acknowledgement" | "acknowledgements" => {
                SectionName::Acknowledgments
            }
            "references" | "bibliography"           => SectionName::References,
            "appendix"                              => SectionName::Appendix,
            _ => return None,
        };
        Some(name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Abstract        => "abstract",
            SectionName::Introduction    => "introduction",
            SectionName::Background      => "background",
            SectionName::RelatedWork     => "related_work",
            SectionName::Preliminaries   => "preliminaries",
            SectionName::Method          => "method",
            SectionName::Approach        => "approach",
            SectionName::Model           => "model",
            SectionName::Experiments     => "experiments",
            SectionName::Results         => "results",
            SectionName::Discussion      => "discussion",
            SectionName::Analysis        => "analysis",
            SectionName::Conclusion      => "conclusion",
            SectionName::Limitations     => "limitations",
            SectionName::FutureWork      => "future_work",
            SectionName::Acknowledgments => "acknowledgments",
            SectionName::References      => "references",
            SectionName::Appendix        => "appendix",
        }
    }
}

/// Sections in source-position order. The first occurrence of a canonical
/// name wins; later duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    entries: Vec<(SectionName, String)>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a section unless its name is already present.
    pub fn insert(&mut self, name: SectionName, content: String) {
        if !self.contains(name) {
            self.entries.push((name, content));
        }
    }

    pub fn get(&self, name: SectionName) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| c.as_str())
    }

    pub fn contains(&self, name: SectionName) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionName, &str)> {
        self.entries.iter().map(|(n, c)| (*n, c.as_str()))
    }

    pub fn names(&self) -> Vec<SectionName> {
        self.entries.iter().map(|(n, _)| *n).collect()
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, content) in &self.entries {
            map.serialize_entry(name.as_str(), content)?;
        }
        map.end()
    }
}

/// A bounded-length slice of a source text, tagged with its sequence position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
}

/// Debug counters for a preprocessing run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreprocessStats {
    pub raw_chars: usize,
    pub clean_chars: usize,
    pub focus_chars: usize,
    pub num_sections: usize,
    pub num_chunks: usize,
    pub cut_references: bool,
}

/// Output of the preprocessing pipeline for a single document.
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessedDocument {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub clean_text: String,
    pub sections: SectionMap,
    pub focus_text: String,
    pub chunks: Vec<Chunk>,
    pub stats: PreprocessStats,
    pub meta: HashMap<String, String>,
    pub source: DocumentSource,
    pub paper_id: Option<String>,
}

/// Which chunking strategy the pipeline applies to the focus text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// Paragraph packing against an approximate token budget.
    TokenBudget,
    /// Raw sliding character window.
    CharWindow,
}

/// Knobs for the preprocessing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Cut everything after a detected references/bibliography heading.
    #[serde(default = "default_remove_references")]
    pub remove_references: bool,
    /// Strip inline citation markers like `[12]` or `(Smith et al., 2020)`.
    #[serde(default)]
    pub remove_citations: bool,
    /// Approximate token budget per chunk for the paragraph packer.
    #[serde(default = "default_max_tokens_per_chunk")]
    pub max_tokens_per_chunk: usize,
    /// Approximate token overlap between consecutive packed chunks.
    #[serde(default = "default_overlap_tokens")]
    pub overlap_tokens: usize,
    /// Window size in characters for the sliding character chunker.
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,
    /// Character overlap for the sliding character chunker.
    #[serde(default = "default_overlap_chars")]
    pub overlap_chars: usize,
    /// Hard cap on focus-text length.
    #[serde(default = "default_focus_max_chars")]
    pub focus_max_chars: usize,
    /// Sections shorter than this are treated as false-positive headings.
    #[serde(default = "default_min_section_chars")]
    pub min_section_chars: usize,
    /// Chunking strategy for the pipeline's chunk output.
    #[serde(default = "default_chunk_strategy")]
    pub chunk_strategy: ChunkStrategy,
}

fn default_remove_references()    -> bool  { true }
fn default_chunk_strategy()       -> ChunkStrategy { ChunkStrategy::TokenBudget }
fn default_max_tokens_per_chunk() -> usize { 900 }
fn default_overlap_tokens()       -> usize { 120 }
fn default_chunk_chars()          -> usize { 3000 }
fn default_overlap_chars()        -> usize { 200 }
fn default_focus_max_chars()      -> usize { 120_000 }
fn default_min_section_chars()    -> usize { 200 }

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            remove_references:    default_remove_references(),
            remove_citations:     false,
            max_tokens_per_chunk: default_max_tokens_per_chunk(),
            overlap_tokens:       default_overlap_tokens(),
            chunk_chars:          default_chunk_chars(),
            overlap_chars:        default_overlap_chars(),
            focus_max_chars:      default_focus_max_chars(),
            min_section_chars:    default_min_section_chars(),
            chunk_strategy:       default_chunk_strategy(),
        }
    }
}
