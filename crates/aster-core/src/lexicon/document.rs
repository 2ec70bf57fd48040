//! Locale-pack documents — the persisted JSON form of a [`Lexicon`]
//!
//! ```json
//! {
//!   "id": "en-US",
//!   "name": "English (United States)",
//!   "direction": "LTR",
//!   "keywords": { "MODULE_DECL": "Module", "RETURN": "Return", ... },
//!   "phrases": [ { "phrase": "more than", "canonical": ">" } ],
//!   "punctuation": {
//!     "statementEnd": ".", "listSeparator": ",", "blockStart": ":",
//!     "stringQuoteOpen": "\"", "stringQuoteClose": "\""
//!   },
//!   "articles": ["a", "an", "the"],
//!   "transformers": ["result-is", "set-to", "english-possessive"]
//! }
//! ```
//!
//! Every field except `articles` and `transformers` is required. Required
//! fields are `Option` here so a missing one is reported by name instead of
//! as a generic deserialization failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Direction, Lexicon, PunctuationConfig, SemanticTokenKind};
use crate::{Error, Result};

/// Serialized locale pack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconDocument {
    pub id: Option<String>,
    pub name: Option<String>,
    pub direction: Option<String>,
    pub keywords: Option<BTreeMap<String, String>>,
    pub phrases: Option<Vec<PhraseDocument>>,
    pub punctuation: Option<PunctuationDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub articles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transformers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseDocument {
    pub phrase: Option<String>,
    pub canonical: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunctuationDocument {
    pub statement_end: Option<String>,
    pub list_separator: Option<String>,
    pub block_start: Option<String>,
    pub string_quote_open: Option<String>,
    pub string_quote_close: Option<String>,
}

impl LexiconDocument {
    /// Parse JSON text; shape errors only, nothing is validated yet
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Snapshot an existing lexicon
    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        let punctuation = lexicon.punctuation();
        LexiconDocument {
            id: Some(lexicon.id().to_string()),
            name: Some(lexicon.name().to_string()),
            direction: Some(lexicon.direction().as_str().to_string()),
            keywords: Some(
                lexicon
                    .keywords()
                    .map(|(kind, spelling)| (kind.name().to_string(), spelling.to_string()))
                    .collect(),
            ),
            phrases: Some(
                lexicon
                    .phrases()
                    .iter()
                    .map(|p| PhraseDocument {
                        phrase: Some(p.phrase.clone()),
                        canonical: Some(p.canonical.clone()),
                    })
                    .collect(),
            ),
            punctuation: Some(PunctuationDocument {
                statement_end: Some(punctuation.statement_end.clone()),
                list_separator: Some(punctuation.list_separator.clone()),
                block_start: Some(punctuation.block_start.clone()),
                string_quote_open: Some(punctuation.string_quote_open.clone()),
                string_quote_close: Some(punctuation.string_quote_close.clone()),
            }),
            articles: lexicon.articles().to_vec(),
            transformers: lexicon.transformer_names().to_vec(),
        }
    }

    /// Validate every field and build the lexicon.
    ///
    /// # Errors
    /// Any missing required field, an unknown keyword kind, an invalid
    /// direction, or anything [`super::LexiconBuilder::build`] rejects.
    pub fn into_lexicon(self) -> Result<Lexicon> {
        let id = self.id.ok_or_else(|| Error::MissingField {
            locale: "<unknown>".into(),
            field: "id",
        })?;
        let missing = |field: &'static str| Error::MissingField {
            locale: id.clone(),
            field,
        };

        let name = self.name.ok_or_else(|| missing("name"))?;
        let direction = self.direction.ok_or_else(|| missing("direction"))?;
        let keywords = self.keywords.ok_or_else(|| missing("keywords"))?;
        let phrases = self.phrases.ok_or_else(|| missing("phrases"))?;
        let punctuation = self.punctuation.ok_or_else(|| missing("punctuation"))?;

        let punctuation = PunctuationConfig {
            statement_end: punctuation
                .statement_end
                .ok_or_else(|| missing("punctuation.statementEnd"))?,
            list_separator: punctuation
                .list_separator
                .ok_or_else(|| missing("punctuation.listSeparator"))?,
            block_start: punctuation
                .block_start
                .ok_or_else(|| missing("punctuation.blockStart"))?,
            string_quote_open: punctuation
                .string_quote_open
                .ok_or_else(|| missing("punctuation.stringQuoteOpen"))?,
            string_quote_close: punctuation
                .string_quote_close
                .ok_or_else(|| missing("punctuation.stringQuoteClose"))?,
        };

        let direction = Direction::parse(&direction).ok_or_else(|| Error::InvalidDirection {
            locale: id.clone(),
            value: direction.clone(),
        })?;

        let mut builder = Lexicon::builder(id.clone(), name)
            .direction(direction)
            .punctuation(punctuation);

        for (kind_name, spelling) in keywords {
            let kind =
                SemanticTokenKind::from_name(&kind_name).ok_or_else(|| Error::UnknownKeywordKind {
                    locale: id.clone(),
                    name: kind_name.clone(),
                })?;
            builder = builder.keyword(kind, spelling);
        }

        for entry in phrases {
            let phrase = entry.phrase.ok_or_else(|| missing("phrases[].phrase"))?;
            let canonical = entry
                .canonical
                .ok_or_else(|| missing("phrases[].canonical"))?;
            builder = builder.phrase(phrase, canonical);
        }

        for article in self.articles {
            builder = builder.article(article);
        }
        for name in self.transformers {
            builder = builder.transformer(name);
        }

        builder.build()
    }
}
