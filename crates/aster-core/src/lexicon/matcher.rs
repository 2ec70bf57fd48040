//! Longest-match phrase scanner
//!
//! Phrases are stored case-folded with single spaces between words and
//! indexed by their first folded character. Matching compares text and
//! phrase one folded character at a time, so characters whose lowercase
//! form changes byte length are handled without re-slicing the text.
//!
//! A space inside a phrase matches any run of horizontal whitespace.
//! A phrase edge that is a word character must sit on a word boundary.

use std::collections::HashMap;

use super::Direction;
use crate::text::{fold_key, is_horizontal_space};

/// One successful match starting at a given offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch<'a> {
    /// Byte offset just past the matched text
    pub end: usize,
    /// Canonical replacement for the matched text
    pub canonical: &'a str,
}

#[derive(Debug, Clone)]
struct Entry {
    pattern: Vec<char>,
    canonical: String,
}

/// Case-insensitive phrase table with longest-match lookup
#[derive(Debug, Clone, Default)]
pub struct PhraseMatcher {
    entries: Vec<Entry>,
    by_first: HashMap<char, Vec<usize>>,
}

impl PhraseMatcher {
    /// Build a matcher from `(phrase, canonical)` pairs.
    ///
    /// A later pair replaces an earlier one with the same folded phrase.
    /// Blank phrases are ignored.
    pub fn new<I, P, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let mut matcher = PhraseMatcher::default();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for (phrase, canonical) in pairs {
            let key = fold_key(phrase.as_ref());
            let Some(first) = key.chars().next() else {
                continue;
            };
            let canonical = canonical.into();

            if let Some(&slot) = slots.get(&key) {
                matcher.entries[slot].canonical = canonical;
                continue;
            }

            let slot = matcher.entries.len();
            slots.insert(key.clone(), slot);
            matcher.by_first.entry(first).or_default().push(slot);
            matcher.entries.push(Entry {
                pattern: key.chars().collect(),
                canonical,
            });
        }

        matcher
    }

    /// Number of distinct phrases
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no phrase is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest phrase matching `text` at byte offset `at`.
    ///
    /// `at` must be a char boundary. Returns `None` when nothing matches or
    /// when the only candidates would split a word.
    pub fn longest_match(&self, text: &str, at: usize, direction: Direction) -> Option<PhraseMatch<'_>> {
        let rest = &text[at..];
        let first = rest.chars().next()?.to_lowercase().next()?;
        let candidates = self.by_first.get(&first)?;

        let before = text[..at].chars().next_back();
        let mut best: Option<PhraseMatch<'_>> = None;

        for &slot in candidates {
            let entry = &self.entries[slot];

            if direction.is_word_char(entry.pattern[0]) && before.is_some_and(|c| direction.is_word_char(c)) {
                continue;
            }

            let Some(len) = match_len(&entry.pattern, rest) else {
                continue;
            };

            let last = entry.pattern[entry.pattern.len() - 1];
            if direction.is_word_char(last) && rest[len..].chars().next().is_some_and(|c| direction.is_word_char(c)) {
                continue;
            }

            if best.map_or(true, |b| at + len > b.end) {
                best = Some(PhraseMatch {
                    end: at + len,
                    canonical: &entry.canonical,
                });
            }
        }

        best
    }
}

/// Byte length of the prefix of `text` that matches `pattern`
fn match_len(pattern: &[char], text: &str) -> Option<usize> {
    let mut chars = text.char_indices().peekable();
    let mut p = 0;

    while p < pattern.len() {
        let (_, found) = chars.next()?;

        if pattern[p] == ' ' {
            if !is_horizontal_space(found) {
                return None;
            }
            while chars.next_if(|&(_, c)| is_horizontal_space(c)).is_some() {}
            p += 1;
            continue;
        }

        for lower in found.to_lowercase() {
            if pattern.get(p) != Some(&lower) {
                return None;
            }
            p += 1;
        }
    }

    Some(chars.peek().map_or(text.len(), |&(offset, _)| offset))
}
