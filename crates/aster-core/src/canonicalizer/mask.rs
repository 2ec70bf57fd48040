//! Literal masking — hides quoted spans from every rewrite pass
//!
//! Each quoted span (delimiters included) is replaced by a placeholder of
//! ten Private Use Area characters: an open marker, eight hex digits of
//! the span index, and a close marker. None of them is alphanumeric,
//! whitespace or punctuation, so no pass can match across or inside one.
//!
//! An open quote without a matching close extends to the end of the text
//! and is still masked. An open marker already present in the input is
//! masked as a one-character span so it cannot be mistaken for a
//! placeholder on restore.

use tracing::warn;

use crate::lexicon::PunctuationConfig;

/// First character of every placeholder
pub(crate) const MASK_OPEN: char = '\u{E000}';
/// Last character of every placeholder
const MASK_CLOSE: char = '\u{E001}';
/// Hex digit `d` is encoded as `DIGIT_BASE + d`
const DIGIT_BASE: u32 = 0xE010;
const DIGITS: usize = 8;

/// One masked region of the original text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedSpan {
    /// Byte offset of the open quote (or stray marker) in the original text
    pub start: usize,
    /// Byte offset just past the close quote, the marker, or end of text
    pub end: usize,
    /// Original bytes of the span, delimiters included
    pub content: String,
}

/// Text with literals replaced by placeholders, plus what they hid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedText {
    text: String,
    spans: Vec<MaskedSpan>,
}

impl MaskedText {
    /// Text the rewrite passes operate on
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Masked spans in order of appearance
    pub fn spans(&self) -> &[MaskedSpan] {
        &self.spans
    }

    /// Substitute every placeholder in `rewritten` with its original span.
    ///
    /// Characters that only look like a placeholder are copied unchanged.
    pub fn restore(&self, rewritten: &str) -> String {
        let extra: usize = self.spans.iter().map(|s| s.content.len()).sum();
        let mut out = String::with_capacity(rewritten.len() + extra);
        let mut restored = 0;
        let mut rest = rewritten;

        while let Some(at) = rest.find(MASK_OPEN) {
            out.push_str(&rest[..at]);
            rest = &rest[at..];
            match decode_placeholder(rest).and_then(|(index, len)| Some((self.spans.get(index)?, len))) {
                Some((span, len)) => {
                    out.push_str(&span.content);
                    rest = &rest[len..];
                    restored += 1;
                }
                None => {
                    out.push(MASK_OPEN);
                    rest = &rest[MASK_OPEN.len_utf8()..];
                }
            }
        }
        out.push_str(rest);

        if restored != self.spans.len() {
            warn!(
                expected = self.spans.len(),
                restored, "placeholder count changed during canonicalization"
            );
        }
        out
    }
}

/// Mask every quoted span in `text`
pub fn mask_literals(text: &str, punctuation: &PunctuationConfig) -> MaskedText {
    let open = punctuation.string_quote_open.as_str();
    let close = punctuation.string_quote_close.as_str();

    let mut masked = String::with_capacity(text.len());
    let mut spans = Vec::new();
    let mut cursor = 0;

    loop {
        let quote = text[cursor..].find(open).map(|at| cursor + at);
        let marker = text[cursor..].find(MASK_OPEN).map(|at| cursor + at);
        let (start, end) = match (quote, marker) {
            (Some(q), Some(m)) if m < q => (m, m + MASK_OPEN.len_utf8()),
            (None, Some(m)) => (m, m + MASK_OPEN.len_utf8()),
            (Some(q), _) => {
                let body = q + open.len();
                let end = text[body..]
                    .find(close)
                    .map_or(text.len(), |offset| body + offset + close.len());
                (q, end)
            }
            (None, None) => break,
        };

        masked.push_str(&text[cursor..start]);
        push_placeholder(&mut masked, spans.len());
        spans.push(MaskedSpan {
            start,
            end,
            content: text[start..end].to_string(),
        });
        cursor = end;
    }
    masked.push_str(&text[cursor..]);

    MaskedText {
        text: masked,
        spans,
    }
}

fn push_placeholder(out: &mut String, index: usize) {
    out.push(MASK_OPEN);
    for shift in (0..DIGITS).rev() {
        let digit = ((index >> (shift * 4)) & 0xF) as u32;
        // DIGIT_BASE..DIGIT_BASE + 16 lies inside the Private Use Area.
        out.extend(char::from_u32(DIGIT_BASE + digit));
    }
    out.push(MASK_CLOSE);
}

/// Parse a placeholder at the start of `text`; returns (index, byte length)
fn decode_placeholder(text: &str) -> Option<(usize, usize)> {
    let mut chars = text.char_indices();
    if chars.next()?.1 != MASK_OPEN {
        return None;
    }
    let mut index = 0usize;
    for _ in 0..DIGITS {
        let digit = (chars.next()?.1 as u32).checked_sub(DIGIT_BASE)?;
        if digit > 0xF {
            return None;
        }
        index = (index << 4) | digit as usize;
    }
    let (offset, close) = chars.next()?;
    (close == MASK_CLOSE).then_some((index, offset + close.len_utf8()))
}
