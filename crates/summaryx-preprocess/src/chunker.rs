//! Chunking strategies for bounded-size downstream consumers.
//!
//! Two independent strategies:
//! - `chunk_by_tokens`: paragraph packing against an approximate token
//!   budget, with trailing-word overlap between chunks.
//! - `chunk_by_chars`: raw sliding character window with word-boundary
//!   snapping and a strict forward-progress guarantee.

use tracing::debug;

use crate::models::Chunk;

/// Approximate token count: whitespace words × 1.2. Deliberately
/// over-estimates versus true subword counts to keep a safety margin against
/// downstream model limits.
pub fn approx_token_count(s: &str) -> usize {
    (s.split_whitespace().count() as f32 * 1.2) as usize
}

/// Pack paragraphs into chunks of at most `max_tokens` approximate tokens.
///
/// Paragraphs are blank-line separated. When adding the next paragraph would
/// exceed the budget, the buffer is flushed and the next one is seeded with
/// the previous chunk's trailing words as overlap. A single paragraph larger
/// than the whole budget is decomposed at sentence-ish boundaries instead of
/// being emitted oversized. Every input paragraph lands in at least one chunk.
pub fn chunk_by_tokens(text: &str, max_tokens: usize, overlap_tokens: usize) -> Vec<Chunk> {
    let paragraphs: Vec<&str> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut chunks: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_tokens = 0usize;

    fn flush(current: &mut Vec<String>, current_tokens: &mut usize, chunks: &mut Vec<String>) {
        if !current.is_empty() {
            chunks.push(current.join("\n\n").trim().to_string());
        }
        current.clear();
        *current_tokens = 0;
    }

    for p in paragraphs {
        let p_tokens = approx_token_count(p);

        // Oversized paragraph: decompose at sentence-ish boundaries and pack
        // the fragments under the same budget.
        if p_tokens > max_tokens {
            for part in split_sentencish(p) {
                let part_tokens = approx_token_count(&part);
                if current_tokens + part_tokens > max_tokens {
                    flush(&mut current, &mut current_tokens, &mut chunks);
                }
                current.push(part);
                current_tokens += part_tokens;
            }
            continue;
        }

        if current_tokens + p_tokens > max_tokens {
            flush(&mut current, &mut current_tokens, &mut chunks);

            // Seed the next buffer with the previous chunk's tail words so
            // context carries across the boundary.
            if overlap_tokens > 0 {
                if let Some(prev) = chunks.last() {
                    let words: Vec<&str> = prev.split_whitespace().collect();
                    let n = ((overlap_tokens as f32 / 1.2).round() as usize).max(1);
                    let tail = words[words.len().saturating_sub(n)..].join(" ");
                    if !tail.is_empty() {
                        current_tokens = approx_token_count(&tail);
                        current.push(tail);
                    }
                }
            }
        }

        current.push(p.to_string());
        current_tokens += p_tokens;
    }

    flush(&mut current, &mut current_tokens, &mut chunks);

    debug!(n_chunks = chunks.len(), max_tokens, "token chunking complete");
    chunks
        .into_iter()
        .enumerate()
        .map(|(index, text)| Chunk { index, text })
        .collect()
}

/// Split a paragraph at terminal punctuation followed by whitespace, or at
/// embedded newlines. (No regex lookbehind available, so this is a scanner.)
fn split_sentencish(p: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    let chars: Vec<(usize, char)> = p.char_indices().collect();

    for i in 0..chars.len() {
        let (idx, c) = chars[i];
        let next = chars.get(i + 1).map(|&(_, n)| n);
        let boundary = match c {
            '.' | '!' | '?' => next.map_or(true, |n| n.is_whitespace()),
            '\n' => true,
            _ => false,
        };
        if boundary {
            let end = idx + c.len_utf8();
            let piece = p[start..end].trim();
            if !piece.is_empty() {
                parts.push(piece.to_string());
            }
            start = end;
        }
    }

    let piece = p[start..].trim();
    if !piece.is_empty() {
        parts.push(piece.to_string());
    }
    parts
}

/// Sliding character window with word-boundary snapping.
///
/// The right edge of each window snaps backward to the nearest space, but
/// never earlier than `start + overlap` so the next start always advances.
/// If the configured overlap would still stall the walk (`overlap >=
/// chunk_size`), the start is forced ahead by `max(1, chunk_size - overlap)`.
/// Absent that invariant, a degenerate configuration loops forever.
pub fn chunk_by_chars(text: &str, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    let chunk_size = chunk_size.max(1);
    let len = text.len();

    if len == 0 {
        return Vec::new();
    }
    if len <= chunk_size {
        return vec![Chunk { index: 0, text: text.to_string() }];
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut index = 0usize;

    while start < len {
        let mut end = floor_char_boundary(text, (start + chunk_size).min(len));

        if end < len {
            // Snap back to a space, but keep end strictly beyond
            // start + overlap so the next start always advances.
            let safe_start = ceil_char_boundary(text, (start + overlap).min(len));
            if safe_start < end {
                if let Some(pos) = text[safe_start..end].rfind(' ') {
                    if pos > 0 {
                        end = safe_start + pos;
                    }
                }
            }
        }

        chunks.push(Chunk { index, text: text[start..end].to_string() });
        index += 1;

        if end == len {
            break;
        }

        let mut next_start = floor_char_boundary(text, end.saturating_sub(overlap));
        if next_start <= start {
            // Degenerate configuration or snap edge case: force progress.
            next_start = ceil_char_boundary(text, start + chunk_size.saturating_sub(overlap).max(1));
        }
        start = next_start;
    }

    chunks
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
