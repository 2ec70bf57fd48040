//! Aster Core - canonicalizer for the Aster controlled natural language
//!
//! Rewrites surface variations of Aster source text into one canonical
//! form before lexing and parsing. The vocabulary comes from a per-locale
//! [`Lexicon`]; the passes themselves know no language.
//!
//! # Architecture
//!
//! ```text
//! Locale pack (JSON) → LexiconDocument → Lexicon ─┐
//!                                                 ├→ Canonicalizer
//! TransformerRegistry ───────────────────────────┘        ↓
//!   Source → Mask → Articles → Keywords → Sentences → Locale → Restore
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: Same text and lexicon always produce identical output
//! - **Idempotent**: Canonical text canonicalizes to itself
//! - **Literal-safe**: Quoted literals come back byte for byte
//! - **Infallible**: Canonicalization never fails; only configuration can

pub mod canonicalizer;
pub mod error;
pub mod lexicon;
pub mod registry;
mod text;
pub mod transformer;

pub use canonicalizer::{fingerprint, Canonicalized, Canonicalizer, Pass};
pub use error::{Error, ErrorKind, Result};
pub use lexicon::{Direction, Lexicon, LexiconBuilder, PunctuationConfig, SemanticTokenKind};
pub use registry::{install_pack, DocumentPack, EnUsPack, LexiconRegistry, LocalePack, Registries};
pub use transformer::{Stage, Transformer, TransformerRegistry};

/// Locale used when none is requested
pub const DEFAULT_LOCALE: &str = "en-US";

/// Canonicalize `text` with the default locale from the global registries.
///
/// # Errors
/// `UnknownLocale` if the default locale failed to load.
pub fn canonicalize(text: &str) -> Result<String> {
    Ok(Canonicalizer::for_locale(DEFAULT_LOCALE)?.canonicalize(text))
}
