//! Character classes and small cursor helpers shared by the passes

/// Space or tab; never a line break
pub(crate) fn is_horizontal_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// First character of an identifier: any Unicode letter or `_`
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Identifier continuation: Unicode letters, digits, `_`
pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte length of the identifier at the start of `text`, if one starts there
pub(crate) fn identifier_len(text: &str) -> Option<usize> {
    let first = text.chars().next()?;
    if !is_ident_start(first) {
        return None;
    }
    Some(
        text.find(|c: char| !is_ident_continue(c))
            .unwrap_or(text.len()),
    )
}

/// Split leading horizontal whitespace off `text`
pub(crate) fn split_indent(text: &str) -> (&str, &str) {
    let rest = text.trim_start_matches(is_horizontal_space);
    text.split_at(text.len() - rest.len())
}

/// Strip at least one horizontal whitespace character
pub(crate) fn strip_required_space(text: &str) -> Option<&str> {
    let rest = text.trim_start_matches(is_horizontal_space);
    if rest.len() == text.len() {
        None
    } else {
        Some(rest)
    }
}

/// Strip `prefix` from `text` comparing case-insensitively, char by char
pub(crate) fn strip_prefix_fold<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = text;
    for expected in prefix.chars() {
        let mut chars = rest.chars();
        let found = chars.next()?;
        if !found.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        rest = chars.as_str();
    }
    Some(rest)
}

/// Strip a whole word: `prefix` case-insensitively, not followed by an identifier character
pub(crate) fn strip_word_fold<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let rest = strip_prefix_fold(text, word)?;
    match rest.chars().next() {
        Some(c) if is_ident_continue(c) => None,
        _ => Some(rest),
    }
}

/// Lowercase `text` and collapse whitespace runs to single spaces
pub(crate) fn fold_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !key.is_empty() {
            key.push(' ');
        }
        key.extend(word.chars().flat_map(char::to_lowercase));
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_len_unicode() {
        assert_eq!(identifier_len("Müller's score"), Some("Müller".len()));
        assert_eq!(identifier_len("_tmp1 x"), Some(5));
        assert_eq!(identifier_len("1abc"), None);
        assert_eq!(identifier_len(""), None);
    }

    #[test]
    fn test_split_indent() {
        assert_eq!(split_indent("  \tSet x"), ("  \t", "Set x"));
        assert_eq!(split_indent("Set x"), ("", "Set x"));
    }

    #[test]
    fn test_strip_prefix_fold() {
        assert_eq!(strip_prefix_fold("SET x", "set"), Some(" x"));
        assert_eq!(strip_prefix_fold("Se", "set"), None);
        assert_eq!(strip_prefix_fold("ÜBER", "über"), Some(""));
    }

    #[test]
    fn test_strip_word_fold_requires_boundary() {
        assert_eq!(strip_word_fold("Settle x", "set"), None);
        assert_eq!(strip_word_fold("Set x", "set"), Some(" x"));
        assert_eq!(strip_word_fold("set", "set"), Some(""));
    }

    #[test]
    fn test_fold_key() {
        assert_eq!(fold_key("  Wait   For "), "wait for");
        assert_eq!(fold_key("MORE\tthan"), "more than");
    }
}
