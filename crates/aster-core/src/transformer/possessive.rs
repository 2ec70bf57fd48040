//! English possessive → member access
//!
//! `driver's age` becomes `driver.age`. The owner must be a whole
//! identifier (letters, digits, `_`, not starting with a digit), the `'s`
//! must end the word, and the member must follow on the same line. Both
//! the ASCII apostrophe and U+2019 are accepted.

use super::{Stage, Transformer};
use crate::lexicon::Lexicon;
use crate::text::{identifier_len, is_horizontal_space, is_ident_continue, is_ident_start};

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPossessive;

impl Transformer for EnglishPossessive {
    fn name(&self) -> &str {
        "english-possessive"
    }

    fn stage(&self) -> Stage {
        Stage::Locale
    }

    fn apply(&self, text: &str, _lexicon: &Lexicon) -> String {
        rewrite_possessives(text)
    }
}

fn rewrite_possessives(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(ch) = text[pos..].chars().next() {
        if !is_ident_continue(ch) {
            out.push(ch);
            pos += ch.len_utf8();
            continue;
        }

        // Whole word run; only runs that start like an identifier can own.
        let rest = &text[pos..];
        let run = rest.find(|c: char| !is_ident_continue(c)).unwrap_or(rest.len());
        let word = &rest[..run];
        out.push_str(word);
        pos += run;

        if is_ident_start(ch) {
            if let Some(member_at) = possessive_member(&text[pos..]) {
                out.push('.');
                pos += member_at;
            }
        }
    }

    out
}

/// If `text` starts with `'s <hws>+ <identifier>`, the offset of the identifier
fn possessive_member(text: &str) -> Option<usize> {
    let rest = text.strip_prefix(&APOSTROPHES[..])?;
    let rest = rest.strip_prefix('s')?;
    if rest.starts_with(is_ident_continue) {
        return None;
    }
    let member = rest.trim_start_matches(is_horizontal_space);
    if member.len() == rest.len() {
        return None;
    }
    identifier_len(member)?;
    Some(text.len() - member.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(text: &str) -> String {
        rewrite_possessives(text)
    }

    #[test]
    fn test_basic_possessive() {
        assert_eq!(rewrite("driver's age"), "driver.age");
        assert_eq!(rewrite("If driver's age < 18:"), "If driver.age < 18:");
    }

    #[test]
    fn test_typographic_apostrophe() {
        assert_eq!(rewrite("driver\u{2019}s age"), "driver.age");
    }

    #[test]
    fn test_unicode_identifiers() {
        assert_eq!(rewrite("Müller's score"), "Müller.score");
        assert_eq!(rewrite("José's größe"), "José.größe");
    }

    #[test]
    fn test_chained_possessives() {
        assert_eq!(rewrite("quote's driver's age"), "quote.driver.age");
        assert_eq!(rewrite("a's b's c"), "a.b.c");
    }

    #[test]
    fn test_owner_must_be_identifier() {
        assert_eq!(rewrite("1st's place"), "1st's place");
        assert_eq!(rewrite("x1st's place"), "x1st.place");
    }

    #[test]
    fn test_suffix_must_end_word() {
        assert_eq!(rewrite("driver'sx age"), "driver'sx age");
        assert_eq!(rewrite("driver'd go"), "driver'd go");
    }

    #[test]
    fn test_member_must_follow_on_same_line() {
        assert_eq!(rewrite("driver's"), "driver's");
        assert_eq!(rewrite("driver's."), "driver's.");
        assert_eq!(rewrite("driver's 42"), "driver's 42");
        assert_eq!(rewrite("driver's\nage"), "driver's\nage");
    }

    #[test]
    fn test_spacing_collapses_to_dot() {
        assert_eq!(rewrite("driver's \t age"), "driver.age");
    }

    #[test]
    fn test_idempotent() {
        let once = rewrite("Return driver's age plus car's value.");
        assert_eq!(once, "Return driver.age plus car.value.");
        assert_eq!(rewrite(&once), once);
    }
}
