//! Text normalization: layout repair, boilerplate removal, references-tail cut.
//!
//! Input is messy extracted text (PDF or HTML derived); output is the
//! canonical clean text the rest of the pipeline operates on. Never fails,
//! including on empty input.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::PreprocessConfig;

/// Only the trailing window is searched for a references heading, so an
/// in-text "References" mention early in the document never truncates it.
const REFERENCES_TAIL_WINDOW: usize = 15_000;

lazy_static! {
    // PDF extraction artifact: "trans-\nformer" → "transformer".
    static ref HYPHEN_LINEBREAK_RE: Regex = Regex::new(r"(\w)-\r?\n(\w)").unwrap();
    // A number alone on a line is almost always a page number.
    static ref PAGE_NUM_RE: Regex = Regex::new(r"(?m)^[ \t]*\d+[ \t]*$").unwrap();
    static ref MULTISPACE_RE: Regex = Regex::new(r"[ \t]+").unwrap();
    static ref MULTI_NEWLINE_RE: Regex = Regex::new(r"\n{3,}").unwrap();
    // Boilerplate seen in arXiv/HTML-derived text.
    static ref BOILERPLATE_RES: Vec<Regex> = vec![
        Regex::new(r"(?is)provided proper attribution is provided.*?scholarly works\.").unwrap(),
        Regex::new(r"(?i)arxiv:\s*\d{4}\.\d{4,5}v?\d*").unwrap(),
        Regex::new(r"(?i)https?://\S+").unwrap(),
        Regex::new(r"(?i)\bfootnotemark\b").unwrap(),
        Regex::new(r"(?i)\bfootnote\b").unwrap(),
    ];
    // "References" / "Bibliography" / "Literature Cited" / "Reference List"
    // on a standalone line, optionally numbered, optionally ending in ":"/".".
    static ref REFERENCES_RE: Regex = Regex::new(
        r"(?im)^[ \t]*(?:\d+[.)]?[ \t]*)?(?:references|bibliography|literature cited|reference list)[ \t]*[:.]?[ \t]*$"
    ).unwrap();
    // Inline citations like [12], [3, 5-7] and (Smith et al., 2020).
    static ref BRACKET_CITATION_RE: Regex = Regex::new(r"\[[0-9,\s\-]{1,20}\]").unwrap();
    static ref PAREN_CITATION_RE: Regex = Regex::new(
        r"\((?:[A-Z][A-Za-z]+ et al\.,?\s*\d{4}|[A-Z][A-Za-z]+,\s*\d{4})\)"
    ).unwrap();
}

/// Normalize raw document text into clean text.
/// Returns the clean text and whether a references tail was cut.
pub fn normalize(raw: &str, cfg: &PreprocessConfig) -> (String, bool) {
    if raw.trim().is_empty() {
        return (String::new(), false);
    }

    let text = HYPHEN_LINEBREAK_RE.replace_all(raw, "${1}${2}");
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = PAGE_NUM_RE.replace_all(&text, "");
    let text = collapse_whitespace(&text);
    let text = strip_boilerplate(&text);

    let (text, cut) = if cfg.remove_references {
        remove_references_tail(&text)
    } else {
        (text, false)
    };

    let text = if cfg.remove_citations {
        strip_citations(&text)
    } else {
        text
    };

    (text.trim().to_string(), cut)
}

fn collapse_whitespace(text: &str) -> String {
    let text = MULTISPACE_RE.replace_all(text, " ");
    MULTI_NEWLINE_RE.replace_all(&text, "\n\n").into_owned()
}

fn strip_boilerplate(text: &str) -> String {
    let mut out = text.to_string();
    for re in BOILERPLATE_RES.iter() {
        out = re.replace_all(&out, "").into_owned();
    }
    // Phrase removal leaves gaps; restore the whitespace invariants.
    collapse_whitespace(&out)
}

/// Cut everything from the first references heading found in the trailing
/// window. Searching the whole document would false-positive on in-text
/// mentions; searching only the tail can miss the heading in unusually long
/// documents — a known limitation of the heuristic.
fn remove_references_tail(text: &str) -> (String, bool) {
    let mut window_start = text.len().saturating_sub(REFERENCES_TAIL_WINDOW);
    while !text.is_char_boundary(window_start) {
        window_start += 1;
    }

    match REFERENCES_RE.find(&text[window_start..]) {
        Some(m) => {
            let cut_pos = window_start + m.start();
            debug!(cut_pos, "references tail cut");
            (text[..cut_pos].trim_end().to_string(), true)
        }
        None => (text.to_string(), false),
    }
}

fn strip_citations(text: &str) -> String {
    let out = BRACKET_CITATION_RE.replace_all(text, "");
    let out = PAREN_CITATION_RE.replace_all(&out, "");
    collapse_whitespace(&out)
}
