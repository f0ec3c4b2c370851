//! Sentence splitting and low-value sentence filtering.

/// Split text into sentences at terminal punctuation or line breaks.
///
/// A period is not a boundary when the preceding token looks like a short
/// capitalized abbreviation ("Dr.", "Fig.", "Eq."). This is a heuristic
/// splitter, not a linguistic tokenizer; it only needs to be good enough for
/// term-frequency ranking.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let chars: Vec<(usize, char)> = text.char_indices().collect();

    for i in 0..chars.len() {
        let (idx, c) = chars[i];
        let next = chars.get(i + 1).map(|&(_, n)| n);

        let boundary = match c {
            '!' | '?' => next.map_or(true, |n| n.is_whitespace()),
            '.' => {
                next.map_or(true, |n| n.is_whitespace())
                    && !is_abbreviation(&text[start..idx])
            }
            '\n' => true,
            _ => false,
        };

        if boundary {
            let end = idx + c.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

/// The token right before a period: short and capitalized usually means an
/// abbreviation rather than a sentence end.
fn is_abbreviation(before: &str) -> bool {
    match before.split_whitespace().last() {
        Some(word) => {
            word.chars().count() <= 3
                && word.chars().next().is_some_and(|c| c.is_uppercase())
        }
        None => false,
    }
}

/// Heuristic filter for sentences that would pollute the scoring corpus:
/// citation lines, boilerplate, table/formula rows, variable soup.
pub fn is_low_value(sentence: &str) -> bool {
    let t = sentence.trim();
    if t.len() < 20 {
        return true;
    }

    let lower = t.to_lowercase();
    if ["arxiv", "doi", "http", "vol.", "no."]
        .iter()
        .any(|p| lower.starts_with(p))
    {
        return true;
    }
    if lower.contains("preprint") || lower.contains("copyright") {
        return true;
    }
    if alpha_ratio(t) < 0.70 {
        return true;
    }
    if single_letter_token_ratio(t) > 0.20 {
        return true;
    }
    false
}

/// Alphabetic characters over non-whitespace characters. Low values indicate
/// stray table or formula rows.
fn alpha_ratio(s: &str) -> f64 {
    let total = s.chars().filter(|c| !c.is_whitespace()).count();
    if total == 0 {
        return 0.0;
    }
    let alpha = s.chars().filter(|c| c.is_alphabetic()).count();
    alpha as f64 / total as f64
}

/// Fraction of whitespace tokens that are single letters which do not form
/// English words ("x", "β") — mathematical variable soup.
fn single_letter_token_ratio(s: &str) -> f64 {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }
    let singles = tokens
        .iter()
        .filter(|t| {
            t.chars().count() == 1
                && t.chars().all(char::is_alphabetic)
                && !matches!(**t, "a" | "A" | "I")
        })
        .count();
    singles as f64 / tokens.len() as f64
}

/// Reduce a sentence to its scoring form: lowercase, alphabetic and
/// whitespace only.
pub fn scoring_key(sentence: &str) -> String {
    sentence
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect()
}
