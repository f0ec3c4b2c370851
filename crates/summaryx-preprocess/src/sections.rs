//! Best-effort section detection on clean text.
//!
//! This is a heuristic, not a grammar: headings are matched as standalone
//! lines against a fixed vocabulary, and absence of any expected section must
//! be tolerated by every consumer. Output is confidence-free — an empty or
//! partial map is a normal result.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::{SectionMap, SectionName};

lazy_static! {
    // A heading is a known keyword alone on a line, optionally preceded by a
    // numeric or roman-numeral prefix ("3.", "IV)").
    static ref SECTION_HEADING_RE: Regex = Regex::new(
        r"(?im)^[ \t]*(?:(?:\d+|[ivxlc]+)[ \t]*[.)]?[ \t]+)?(abstract|introduction|background|related work|preliminaries|methods?|methodology|approach|model|experiments?|experimental setup|results?|discussion|analysis|conclusions?|limitations|future work|acknowledge?ments?|references|bibliography|appendix)[ \t]*$"
    ).unwrap();
}

/// Scan clean text for section headings and slice the content between them.
///
/// Sections shorter than `min_section_chars` are dropped: they are almost
/// always false-positive inline mentions rather than real section headers.
pub fn extract_sections(text: &str, min_section_chars: usize) -> SectionMap {
    let mut hits: Vec<(usize, usize, SectionName)> = Vec::new();
    for caps in SECTION_HEADING_RE.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let keyword = caps.get(1).unwrap();
        if let Some(name) = SectionName::from_heading(keyword.as_str()) {
            hits.push((whole.start(), whole.end(), name));
        }
    }

    let mut map = SectionMap::new();
    for (i, &(_, end, name)) in hits.iter().enumerate() {
        let next_start = hits.get(i + 1).map(|h| h.0).unwrap_or(text.len());
        let content = text[end..next_start].trim();
        if content.len() < min_section_chars {
            continue;
        }
        map.insert(name, content.to_string());
    }

    debug!(sections = map.len(), "section extraction complete");
    map
}
