//! End-to-end preprocessing for a single document.
//!
//! Orchestrates the flow:
//!   1. Normalize raw text (layout repair, boilerplate, references cut)
//!   2. Extract sections (best effort)
//!   3. Promote a section-detected abstract into empty metadata
//!   4. Assemble focus text
//!   5. Chunk the focus text for downstream consumers
//!
//! Pure and infallible: any input, including an empty document, produces a
//! complete `PreprocessedDocument` with honest stats.

use tracing::{info, instrument};

use crate::chunker::{chunk_by_chars, chunk_by_tokens};
use crate::focus::build_focus;
use crate::models::{
    ChunkStrategy, PreprocessConfig, PreprocessStats, PreprocessedDocument, RawDocument,
    SectionName,
};
use crate::normalize::normalize;
use crate::sections::extract_sections;

/// Run the full preprocessing pipeline on one raw document.
#[instrument(skip(doc, cfg), fields(paper_id = ?doc.paper_id, source = doc.source.as_str()))]
pub fn preprocess(doc: RawDocument, cfg: &PreprocessConfig) -> PreprocessedDocument {
    let raw_chars = doc.text.len();

    let (clean_text, cut_references) = normalize(&doc.text, cfg);
    let sections = extract_sections(&clean_text, cfg.min_section_chars);

    // PDF/plain-text ingestion often has no abstract in metadata; recover it
    // from the sectioner when possible.
    let abstract_text = doc
        .abstract_text
        .filter(|a| !a.trim().is_empty())
        .or_else(|| sections.get(SectionName::Abstract).map(str::to_string));

    let focus_text = build_focus(
        abstract_text.as_deref(),
        &sections,
        &clean_text,
        cfg.focus_max_chars,
    );

    let chunks = match cfg.chunk_strategy {
        ChunkStrategy::TokenBudget => {
            chunk_by_tokens(&focus_text, cfg.max_tokens_per_chunk, cfg.overlap_tokens)
        }
        ChunkStrategy::CharWindow => {
            chunk_by_chars(&focus_text, cfg.chunk_chars, cfg.overlap_chars)
        }
    };

    let stats = PreprocessStats {
        raw_chars,
        clean_chars: clean_text.len(),
        focus_chars: focus_text.len(),
        num_sections: sections.len(),
        num_chunks: chunks.len(),
        cut_references,
    };

    info!(
        raw_chars = stats.raw_chars,
        clean_chars = stats.clean_chars,
        focus_chars = stats.focus_chars,
        sections = stats.num_sections,
        chunks = stats.num_chunks,
        cut_references = stats.cut_references,
        "preprocess complete"
    );

    PreprocessedDocument {
        title: doc.title,
        abstract_text,
        clean_text,
        sections,
        focus_text,
        chunks,
        stats,
        meta: doc.meta,
        source: doc.source,
        paper_id: doc.paper_id,
    }
}
