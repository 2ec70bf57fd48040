//! Sentence-pattern rewrites
//!
//! Both rules look at one sentence at a time. A line is cut after every
//! statement terminator that is followed by whitespace; the whitespace
//! stays at the front of the next sentence, so indentation and spacing
//! survive a rewrite. A sentence whose shape does not fit is left as is;
//! rejecting it is the parser's job.

use super::{Stage, Transformer};
use crate::lexicon::{Lexicon, SemanticTokenKind};
use crate::text::{identifier_len, split_indent, strip_required_space, strip_word_fold};

/// "The result is X" → "Return X"
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultIs;

/// "Set x to Y" → "Let x be Y"
#[derive(Debug, Clone, Copy, Default)]
pub struct SetTo;

impl Transformer for ResultIs {
    fn name(&self) -> &str {
        "result-is"
    }

    fn stage(&self) -> Stage {
        Stage::Sentence
    }

    fn apply(&self, text: &str, lexicon: &Lexicon) -> String {
        rewrite_sentences(text, lexicon, rewrite_result_is)
    }
}

impl Transformer for SetTo {
    fn name(&self) -> &str {
        "set-to"
    }

    fn stage(&self) -> Stage {
        Stage::Sentence
    }

    fn apply(&self, text: &str, lexicon: &Lexicon) -> String {
        rewrite_sentences(text, lexicon, rewrite_set_to)
    }
}

/// Run `rewrite` over every sentence of every line
fn rewrite_sentences<F>(text: &str, lexicon: &Lexicon, rewrite: F) -> String
where
    F: Fn(&str, &Lexicon) -> Option<String>,
{
    let terminator = lexicon.punctuation().statement_end.as_str();
    let mut out = String::with_capacity(text.len() + 16);

    for line in text.split_inclusive('\n') {
        for sentence in split_sentences(line, terminator) {
            match rewrite(sentence, lexicon) {
                Some(rewritten) => out.push_str(&rewritten),
                None => out.push_str(sentence),
            }
        }
    }

    out
}

/// Cut `line` after each `terminator` that is followed by whitespace
fn split_sentences<'a>(line: &'a str, terminator: &str) -> Vec<&'a str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut search = 0;

    while let Some(found) = line[search..].find(terminator) {
        let end = search + found + terminator.len();
        if line[end..].starts_with(char::is_whitespace) {
            sentences.push(&line[start..end]);
            start = end;
        }
        search = end;
    }
    if start < line.len() {
        sentences.push(&line[start..]);
    }

    sentences
}

/// `<ws>* [the <ws>+] result <ws>+ is <ws>+ <rest>`
///
/// The determiner is optional because article removal normally runs first.
fn rewrite_result_is(sentence: &str, lexicon: &Lexicon) -> Option<String> {
    let (indent, rest) = split_indent(sentence);
    let rest = match strip_word_fold(rest, "the").and_then(strip_required_space) {
        Some(after_article) => after_article,
        None => rest,
    };
    let rest = strip_word_fold(rest, "result").and_then(strip_required_space)?;
    let rest = strip_word_fold(rest, lexicon.keyword(SemanticTokenKind::Is))
        .and_then(strip_required_space)?;
    if rest.trim().is_empty() {
        return None;
    }

    Some(format!(
        "{}{} {}",
        indent,
        lexicon.keyword(SemanticTokenKind::Return),
        rest
    ))
}

/// `<ws>* SET <ws>+ <identifier> <ws>+ TO <ws>+ <value>`
fn rewrite_set_to(sentence: &str, lexicon: &Lexicon) -> Option<String> {
    let (indent, rest) = split_indent(sentence);
    let rest = strip_word_fold(rest, lexicon.keyword(SemanticTokenKind::Set))
        .and_then(strip_required_space)?;

    let target_len = identifier_len(rest)?;
    let (target, rest) = rest.split_at(target_len);
    let rest = strip_required_space(rest)?;

    let value = strip_word_fold(rest, lexicon.keyword(SemanticTokenKind::To))
        .and_then(strip_required_space)?;
    if value.trim().is_empty() {
        return None;
    }

    Some(format!(
        "{}{} {} {} {}",
        indent,
        lexicon.keyword(SemanticTokenKind::Let),
        target,
        lexicon.keyword(SemanticTokenKind::Be),
        value
    ))
}
