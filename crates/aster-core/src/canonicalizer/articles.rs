//! Article removal
//!
//! Drops a determiner together with the horizontal whitespace after it when
//! another word (or a masked literal) follows on the same line. Whatever
//! separated the determiner from the word before it stays, so flanking
//! words keep exactly the spacing they had.

use super::mask::MASK_OPEN;
use crate::lexicon::Lexicon;
use crate::text::is_horizontal_space;

/// Remove the lexicon's determiners from masked text
pub fn remove_articles(text: &str, lexicon: &Lexicon) -> String {
    if lexicon.articles().is_empty() {
        return text.to_string();
    }

    let direction = lexicon.direction();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let word_len = rest
            .find(|c: char| !direction.is_word_char(c))
            .unwrap_or(rest.len());

        if word_len == 0 {
            // Non-word character: copy it through.
            let ch = rest.chars().next().map_or(1, char::len_utf8);
            out.push_str(&rest[..ch]);
            pos += ch;
            continue;
        }

        let word = &rest[..word_len];
        let after = &rest[word_len..];
        let gap = after.len() - after.trim_start_matches(is_horizontal_space).len();
        let word_follows = gap > 0
            && after[gap..]
                .chars()
                .next()
                .is_some_and(|c| direction.is_word_char(c) || c == MASK_OPEN);

        if word_follows && lexicon.is_article(word) {
            pos += word_len + gap;
        } else {
            out.push_str(word);
            pos += word_len;
        }
    }

    out
}
