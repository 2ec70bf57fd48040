//! Error types for the Aster canonicalizer
//!
//! All fallible operations return `Result<T, Error>`.
//! Canonicalization itself never fails; errors come from building a
//! lexicon, loading a locale pack, or resolving names in a registry.

use thiserror::Error;

use crate::lexicon::SemanticTokenKind;

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Locale pack is unusable until fixed
    Configuration,
    /// Requested locale or transformer is not registered
    Lookup,
    /// Registry was populated twice for the same name
    Registration,
}

/// Aster canonicalizer error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Required field absent from a locale pack document
    #[error("locale pack '{locale}': missing required field `{field}`")]
    MissingField { locale: String, field: &'static str },

    /// Keyword table does not cover every semantic token kind
    #[error("locale pack '{locale}': no keyword for {kind}")]
    MissingKeyword {
        locale: String,
        kind: SemanticTokenKind,
    },

    /// Keyword spelling is empty or whitespace only
    #[error("locale pack '{locale}': blank keyword for {kind}")]
    BlankKeyword {
        locale: String,
        kind: SemanticTokenKind,
    },

    /// Keyword table names a kind that does not exist
    #[error("locale pack '{locale}': unknown keyword kind '{name}'")]
    UnknownKeywordKind { locale: String, name: String },

    /// Punctuation value is empty or whitespace only
    #[error("locale pack '{locale}': blank punctuation `{field}`")]
    BlankPunctuation { locale: String, field: &'static str },

    /// Phrase or its canonical form is empty or whitespace only
    #[error("locale pack '{locale}': blank phrase entry '{phrase}'")]
    BlankPhrase { locale: String, phrase: String },

    /// Same phrase registered twice (case-insensitive)
    #[error("locale pack '{locale}': duplicate phrase '{phrase}'")]
    DuplicatePhrase { locale: String, phrase: String },

    /// Two keywords share a spelling up to case but differ in canonical casing
    #[error("locale pack '{locale}': {first} and {second} both spell '{spelling}' with different casing")]
    ConflictingSpelling {
        locale: String,
        spelling: String,
        first: SemanticTokenKind,
        second: SemanticTokenKind,
    },

    /// Direction tag is neither LTR nor RTL
    #[error("locale pack '{locale}': invalid direction '{value}' (expected LTR or RTL)")]
    InvalidDirection { locale: String, value: String },

    /// Locale pack document is not well-formed JSON of the expected shape
    #[error("malformed locale pack: {0}")]
    MalformedPack(String),

    /// No lexicon registered under this locale id
    #[error("unknown locale '{0}'")]
    UnknownLocale(String),

    /// Lexicon names a transformer nobody registered
    #[error("locale '{locale}': unknown transformer '{name}'")]
    UnknownTransformer { locale: String, name: String },

    /// Locale id registered twice
    #[error("locale '{0}' is already registered")]
    DuplicateLocale(String),

    /// Transformer name registered twice
    #[error("transformer '{0}' is already registered")]
    DuplicateTransformer(String),

    /// Global registries were already installed or read
    #[error("global registries are already initialized")]
    RegistryInitialized,
}

impl Error {
    /// Classify the error for callers that only care about the category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField { .. }
            | Error::MissingKeyword { .. }
            | Error::BlankKeyword { .. }
            | Error::UnknownKeywordKind { .. }
            | Error::BlankPunctuation { .. }
            | Error::BlankPhrase { .. }
            | Error::DuplicatePhrase { .. }
            | Error::ConflictingSpelling { .. }
            | Error::InvalidDirection { .. }
            | Error::MalformedPack(_) => ErrorKind::Configuration,
            Error::UnknownLocale(_) | Error::UnknownTransformer { .. } => ErrorKind::Lookup,
            Error::DuplicateLocale(_)
            | Error::DuplicateTransformer(_)
            | Error::RegistryInitialized => ErrorKind::Registration,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedPack(err.to_string())
    }
}

/// Result type alias for Aster operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::UnknownLocale("fr-FR".into()).kind(),
            ErrorKind::Lookup
        );
        assert_eq!(
            Error::BlankPunctuation {
                locale: "en-US".into(),
                field: "statementEnd"
            }
            .kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            Error::DuplicateLocale("en-US".into()).kind(),
            ErrorKind::Registration
        );
    }

    #[test]
    fn test_error_messages_name_the_culprit() {
        let err = Error::MissingKeyword {
            locale: "de-DE".into(),
            kind: SemanticTokenKind::Return,
        };
        assert_eq!(err.to_string(), "locale pack 'de-DE': no keyword for RETURN");

        let err = Error::MissingField {
            locale: "<unknown>".into(),
            field: "id",
        };
        assert!(err.to_string().contains("`id`"));
    }

    #[test]
    fn test_json_error_becomes_malformed_pack() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().starts_with("malformed locale pack"));
    }
}
