//! Focus-text assembly: a prioritized, length-capped excerpt for downstream
//! length-limited consumers.

use tracing::debug;

use crate::models::{SectionMap, SectionName};

/// Assemble the focus text from the abstract and the highest-value sections,
/// in fixed priority order. Sections that were not detected are skipped
/// silently. If nothing was detected at all, the full clean text is returned
/// unchanged so chunking and ranking never see an empty string while real
/// content exists.
pub fn build_focus(
    abstract_text: Option<&str>,
    sections: &SectionMap,
    clean_text: &str,
    max_chars: usize,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(abs) = abstract_text {
        if !abs.trim().is_empty() {
            parts.push(format!("ABSTRACT\n{}", abs.trim()));
        }
    }

    let mut add_if = |name: SectionName, label: &str| {
        if let Some(content) = sections.get(name) {
            parts.push(format!("{label}\n{}", content.trim()));
        }
    };

    add_if(SectionName::Introduction, "INTRODUCTION");
    // Some papers use "Approach" / "Model" instead of "Method".
    if sections.contains(SectionName::Method) {
        add_if(SectionName::Method, "METHOD");
    } else {
        add_if(SectionName::Approach, "APPROACH");
        add_if(SectionName::Model, "MODEL");
    }
    add_if(SectionName::Experiments, "EXPERIMENTS");
    add_if(SectionName::Results, "RESULTS");
    add_if(SectionName::Discussion, "DISCUSSION");
    add_if(SectionName::Analysis, "ANALYSIS");
    add_if(SectionName::Conclusion, "CONCLUSION");

    let mut focus = if parts.is_empty() {
        clean_text.to_string()
    } else {
        parts.join("\n\n")
    };

    // Emergency guard against huge memory/compute spikes, not a quality
    // feature: truncate at the nearest char boundary at or below the cap.
    if focus.len() > max_chars {
        let mut cut = max_chars;
        while !focus.is_char_boundary(cut) {
            cut -= 1;
        }
        focus.truncate(cut);
        debug!(max_chars, "focus text truncated at hard cap");
    }

    focus
}
