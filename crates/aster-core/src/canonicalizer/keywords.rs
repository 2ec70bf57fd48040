//! Keyword and operator normalization
//!
//! Left-to-right scan over masked text. At every position the lexicon's
//! matcher is asked for the longest phrase starting there; a hit is
//! replaced by its canonical form and the scan resumes right after it.

use crate::lexicon::Lexicon;

/// Rewrite every keyword phrase and operator synonym to its canonical form
pub fn normalize_keywords(text: &str, lexicon: &Lexicon) -> String {
    let matcher = lexicon.matcher();
    if matcher.is_empty() {
        return text.to_string();
    }

    let direction = lexicon.direction();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(ch) = text[pos..].chars().next() {
        match matcher.longest_match(text, pos, direction) {
            Some(hit) => {
                out.push_str(hit.canonical);
                pos = hit.end;
            }
            None => {
                out.push(ch);
                pos += ch.len_utf8();
            }
        }
    }

    out
}
