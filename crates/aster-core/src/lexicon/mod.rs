//! Lexicon — immutable per-locale vocabulary
//!
//! A [`Lexicon`] holds everything the canonicalizer needs to know about a
//! locale: the canonical spelling of every [`SemanticTokenKind`], the phrase
//! table (multi-word keywords and operator synonyms), punctuation, the
//! determiners removed before keyword matching, and the names of the
//! transformers the locale applies.
//!
//! Lexicons are only built through [`LexiconBuilder::build`], which checks
//! that the keyword table is total. After that they never change and are
//! shared behind `Arc`.

pub mod document;
pub mod kind;
pub mod matcher;

pub use document::{LexiconDocument, PhraseDocument, PunctuationDocument};
pub use kind::SemanticTokenKind;
pub use matcher::{PhraseMatch, PhraseMatcher};

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::debug;

use crate::text::fold_key;
use crate::{Error, Result};

/// Text direction of a locale
///
/// Only affects which characters count as part of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// Document tag (`LTR` / `RTL`)
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "LTR",
            Direction::Rtl => "RTL",
        }
    }

    /// Parse a document tag, case-insensitively
    pub fn parse(tag: &str) -> Option<Direction> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "LTR" => Some(Direction::Ltr),
            "RTL" => Some(Direction::Rtl),
            _ => None,
        }
    }

    /// Whether `c` continues a word under this direction's boundary policy.
    ///
    /// RTL scripts attach cantillation and other combining marks to letters
    /// and use ZWNJ inside words; those never split a word there.
    pub fn is_word_char(self, c: char) -> bool {
        if c.is_alphanumeric() || c == '_' {
            return true;
        }
        match self {
            Direction::Ltr => false,
            Direction::Rtl => is_rtl_word_mark(c),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_rtl_word_mark(c: char) -> bool {
    matches!(c,
        '\u{0591}'..='\u{05BD}'
        | '\u{05BF}'
        | '\u{05C1}'..='\u{05C2}'
        | '\u{05C4}'..='\u{05C5}'
        | '\u{05C7}'
        | '\u{0610}'..='\u{061A}'
        | '\u{064B}'..='\u{065F}'
        | '\u{0670}'
        | '\u{06D6}'..='\u{06DC}'
        | '\u{06DF}'..='\u{06E4}'
        | '\u{06E7}'..='\u{06E8}'
        | '\u{06EA}'..='\u{06ED}'
        | '\u{200C}')
}

/// Punctuation a locale uses; every value is non-blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctuationConfig {
    pub statement_end: String,
    pub list_separator: String,
    pub block_start: String,
    pub string_quote_open: String,
    pub string_quote_close: String,
}

impl PunctuationConfig {
    /// `.` `,` `:` and straight double quotes
    pub fn standard() -> Self {
        PunctuationConfig {
            statement_end: ".".into(),
            list_separator: ",".into(),
            block_start: ":".into(),
            string_quote_open: "\"".into(),
            string_quote_close: "\"".into(),
        }
    }

    fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("statementEnd", &self.statement_end),
            ("listSeparator", &self.list_separator),
            ("blockStart", &self.block_start),
            ("stringQuoteOpen", &self.string_quote_open),
            ("stringQuoteClose", &self.string_quote_close),
        ]
    }

    fn validate(&self, locale: &str) -> Result<()> {
        for (field, value) in self.fields() {
            if value.trim().is_empty() {
                return Err(Error::BlankPunctuation {
                    locale: locale.to_string(),
                    field,
                });
            }
        }
        Ok(())
    }
}

/// One phrase-table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    /// Spelling matched in source text, case-insensitively
    pub phrase: String,
    /// Replacement written to canonical text (may be a symbol)
    pub canonical: String,
}

/// Immutable per-locale vocabulary
#[derive(Debug, Clone)]
pub struct Lexicon {
    id: String,
    name: String,
    direction: Direction,
    keywords: Vec<String>,
    phrases: Vec<Phrase>,
    punctuation: PunctuationConfig,
    articles: Vec<String>,
    transformers: Vec<String>,
    matcher: PhraseMatcher,
}

impl Lexicon {
    /// Start building a lexicon for `id`
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> LexiconBuilder {
        LexiconBuilder::new(id, name)
    }

    /// Parse and validate a locale-pack JSON document
    pub fn from_json(json: &str) -> Result<Lexicon> {
        LexiconDocument::from_json(json)?.into_lexicon()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Canonical spelling of `kind`; total by construction
    pub fn keyword(&self, kind: SemanticTokenKind) -> &str {
        &self.keywords[kind.index()]
    }

    /// Every kind with its canonical spelling, in declaration order
    pub fn keywords(&self) -> impl Iterator<Item = (SemanticTokenKind, &str)> + '_ {
        SemanticTokenKind::ALL
            .iter()
            .map(|&kind| (kind, self.keyword(kind)))
    }

    /// Phrase table in registration order
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn punctuation(&self) -> &PunctuationConfig {
        &self.punctuation
    }

    /// Determiners removed by the article pass, lowercase
    pub fn articles(&self) -> &[String] {
        &self.articles
    }

    /// Whether `word` is one of this locale's determiners (case-insensitive)
    pub fn is_article(&self, word: &str) -> bool {
        if self.articles.is_empty() {
            return false;
        }
        let key = fold_key(word);
        self.articles.iter().any(|a| *a == key)
    }

    /// Names of the transformers this locale applies, in order
    pub fn transformer_names(&self) -> &[String] {
        &self.transformers
    }

    /// Compiled keyword + phrase table used by keyword normalization
    pub fn matcher(&self) -> &PhraseMatcher {
        &self.matcher
    }
}

/// Collects lexicon parts and validates them in [`LexiconBuilder::build`]
#[derive(Debug, Clone)]
pub struct LexiconBuilder {
    id: String,
    name: String,
    direction: Direction,
    keywords: Vec<Option<String>>,
    phrases: Vec<Phrase>,
    punctuation: Option<PunctuationConfig>,
    articles: Vec<String>,
    transformers: Vec<String>,
}

impl LexiconBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        LexiconBuilder {
            id: id.into(),
            name: name.into(),
            direction: Direction::Ltr,
            keywords: vec![None; SemanticTokenKind::COUNT],
            phrases: Vec::new(),
            punctuation: None,
            articles: Vec::new(),
            transformers: Vec::new(),
        }
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn keyword(mut self, kind: SemanticTokenKind, spelling: impl Into<String>) -> Self {
        self.keywords[kind.index()] = Some(spelling.into());
        self
    }

    pub fn phrase(mut self, phrase: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.phrases.push(Phrase {
            phrase: phrase.into(),
            canonical: canonical.into(),
        });
        self
    }

    pub fn punctuation(mut self, punctuation: PunctuationConfig) -> Self {
        self.punctuation = Some(punctuation);
        self
    }

    pub fn article(mut self, article: impl Into<String>) -> Self {
        self.articles.push(article.into());
        self
    }

    pub fn transformer(mut self, name: impl Into<String>) -> Self {
        self.transformers.push(name.into());
        self
    }

    /// Validate and freeze.
    ///
    /// # Errors
    /// Configuration errors: blank id or name, a kind without a keyword, a
    /// blank keyword, conflicting keyword casing, missing or blank
    /// punctuation, blank or duplicate phrases, blank articles.
    pub fn build(self) -> Result<Lexicon> {
        let locale = self.id.trim().to_string();
        if locale.is_empty() {
            return Err(Error::MissingField {
                locale: "<unknown>".into(),
                field: "id",
            });
        }
        if self.name.trim().is_empty() {
            return Err(Error::MissingField { locale, field: "name" });
        }

        let mut keywords = Vec::with_capacity(SemanticTokenKind::COUNT);
        for &kind in SemanticTokenKind::ALL {
            match &self.keywords[kind.index()] {
                None => return Err(Error::MissingKeyword { locale, kind }),
                Some(spelling) if spelling.trim().is_empty() => {
                    return Err(Error::BlankKeyword { locale, kind })
                }
                Some(spelling) => keywords.push(spelling.clone()),
            }
        }
        check_keyword_casing(&locale, &keywords)?;

        let punctuation = self.punctuation.ok_or_else(|| Error::MissingField {
            locale: locale.clone(),
            field: "punctuation",
        })?;
        punctuation.validate(&locale)?;

        let mut seen = HashSet::new();
        for phrase in &self.phrases {
            if phrase.phrase.trim().is_empty() || phrase.canonical.trim().is_empty() {
                return Err(Error::BlankPhrase {
                    locale,
                    phrase: phrase.phrase.clone(),
                });
            }
            if !seen.insert(fold_key(&phrase.phrase)) {
                return Err(Error::DuplicatePhrase {
                    locale,
                    phrase: phrase.phrase.clone(),
                });
            }
        }

        let mut articles = Vec::with_capacity(self.articles.len());
        for article in &self.articles {
            let folded = fold_key(article);
            if folded.is_empty() {
                return Err(Error::BlankPhrase {
                    locale,
                    phrase: article.clone(),
                });
            }
            articles.push(folded);
        }

        // Keywords first so an explicit phrase entry overrides the derived one.
        let direction = self.direction;
        let keyword_entries = keywords
            .iter()
            .filter(|spelling| spelling.chars().any(|c| direction.is_word_char(c)))
            .map(|spelling| (spelling.as_str(), spelling.clone()));
        let phrase_entries = self
            .phrases
            .iter()
            .map(|p| (p.phrase.as_str(), p.canonical.clone()));
        let matcher = PhraseMatcher::new(keyword_entries.chain(phrase_entries));

        debug!(
            locale = %locale,
            phrases = matcher.len(),
            transformers = self.transformers.len(),
            "built lexicon"
        );

        Ok(Lexicon {
            id: locale,
            name: self.name.trim().to_string(),
            direction,
            keywords,
            phrases: self.phrases,
            punctuation,
            articles,
            transformers: self.transformers,
            matcher,
        })
    }
}

/// Two kinds may share a spelling, but not differ only by case
fn check_keyword_casing(locale: &str, keywords: &[String]) -> Result<()> {
    let mut by_key: HashMap<String, SemanticTokenKind> = HashMap::new();
    for &kind in SemanticTokenKind::ALL {
        let spelling = &keywords[kind.index()];
        let key = fold_key(spelling);
        match by_key.get(&key) {
            Some(&first) if keywords[first.index()] != *spelling => {
                return Err(Error::ConflictingSpelling {
                    locale: locale.to_string(),
                    spelling: spelling.clone(),
                    first,
                    second: kind,
                });
            }
            Some(_) => {}
            None => {
                by_key.insert(key, kind);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A complete builder with every keyword spelled as its lowercase name
    pub(crate) fn complete_builder(id: &str) -> LexiconBuilder {
        let mut builder = Lexicon::builder(id, "Test locale").punctuation(PunctuationConfig::standard());
        for &kind in SemanticTokenKind::ALL {
            builder = builder.keyword(kind, kind.name().to_lowercase().replace('_', " "));
        }
        builder
    }

    #[test]
    fn test_build_complete_lexicon() {
        let lexicon = complete_builder("xx-TEST")
            .keyword(SemanticTokenKind::Return, "Return")
            .build()
            .unwrap();
        assert_eq!(lexicon.id(), "xx-TEST");
        assert_eq!(lexicon.keyword(SemanticTokenKind::Return), "Return");
        assert_eq!(lexicon.keywords().count(), SemanticTokenKind::COUNT);
        assert_eq!(lexicon.direction(), Direction::Ltr);
    }

    #[test]
    fn test_missing_keyword_is_rejected() {
        let mut builder = Lexicon::builder("xx-TEST", "Test").punctuation(PunctuationConfig::standard());
        for &kind in &SemanticTokenKind::ALL[1..] {
            builder = builder.keyword(kind, kind.name());
        }
        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            Error::MissingKeyword {
                locale: "xx-TEST".into(),
                kind: SemanticTokenKind::ALL[0],
            }
        );
    }

    #[test]
    fn test_blank_keyword_is_rejected() {
        let err = complete_builder("xx-TEST")
            .keyword(SemanticTokenKind::If, "  ")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::BlankKeyword {
                kind: SemanticTokenKind::If,
                ..
            }
        ));
    }

    #[test]
    fn test_blank_punctuation_is_rejected() {
        let mut punctuation = PunctuationConfig::standard();
        punctuation.string_quote_close = String::new();
        let err = complete_builder("xx-TEST")
            .punctuation(punctuation)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::BlankPunctuation {
                field: "stringQuoteClose",
                ..
            }
        ));
    }

    #[test]
    fn test_conflicting_casing_is_rejected() {
        let err = complete_builder("xx-TEST")
            .keyword(SemanticTokenKind::To, "to")
            .keyword(SemanticTokenKind::FuncDecl, "To")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConflictingSpelling { .. }));
    }

    #[test]
    fn test_duplicate_phrase_is_rejected() {
        let err = complete_builder("xx-TEST")
            .phrase("more than", ">")
            .phrase("More  Than", ">")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicatePhrase { .. }));
    }

    #[test]
    fn test_symbol_keywords_stay_out_of_matcher() {
        let lexicon = complete_builder("xx-TEST")
            .keyword(SemanticTokenKind::GreaterThan, ">")
            .build()
            .unwrap();
        assert!(lexicon.matcher().longest_match(">", 0, Direction::Ltr).is_none());
    }

    #[test]
    fn test_articles_are_folded() {
        let lexicon = complete_builder("xx-TEST").article("The").build().unwrap();
        assert!(lexicon.is_article("THE"));
        assert!(lexicon.is_article("the"));
        assert!(!lexicon.is_article("then"));
    }

    #[test]
    fn test_rtl_keeps_marks_inside_words() {
        // Hebrew accent segol
        let marked = '\u{0592}';
        assert!(Direction::Rtl.is_word_char(marked));
        assert!(!Direction::Ltr.is_word_char(marked));
        assert!(Direction::Rtl.is_word_char('\u{200C}'));
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("rtl"), Some(Direction::Rtl));
        assert_eq!(Direction::parse("LTR"), Some(Direction::Ltr));
        assert_eq!(Direction::parse("up"), None);
    }
}
