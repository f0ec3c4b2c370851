//! summaryx-preprocess — Document normalization and structuring pipeline.
//! Covers the text-side stages for a single document:
//! - Layout repair and boilerplate removal
//! - References-tail truncation
//! - Best-effort section detection
//! - Focus-text assembly
//! - Chunking (token-budget and character-window strategies)

pub mod chunker;
pub mod focus;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod sections;

pub use models::{
    Chunk, ChunkStrategy, DocumentSource, PreprocessConfig, PreprocessStats, PreprocessedDocument,
    RawDocument, SectionMap, SectionName,
};
pub use pipeline::preprocess;
