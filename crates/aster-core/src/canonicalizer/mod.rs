//! Canonicalizer — the fixed pass pipeline
//!
//! ```text
//! source ─▶ mask literals ─▶ remove articles ─▶ normalize keywords
//!        ─▶ sentence rewrites ─▶ locale transformers ─▶ restore literals
//! ```
//!
//! Every pass between masking and restoration sees only masked text, so
//! nothing inside a quoted literal can change.

pub mod articles;
pub mod keywords;
pub mod mask;

pub use articles::remove_articles;
pub use keywords::normalize_keywords;
pub use mask::{mask_literals, MaskedSpan, MaskedText};

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::lexicon::Lexicon;
use crate::registry::{self, Registries};
use crate::transformer::{Stage, Transformer, TransformerRegistry};
use crate::Result;

/// Pipeline passes, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    MaskLiterals,
    RemoveArticles,
    NormalizeKeywords,
    SentenceRewrites,
    LocaleTransformers,
    RestoreLiterals,
}

impl Pass {
    pub const ORDER: [Pass; 6] = [
        Pass::MaskLiterals,
        Pass::RemoveArticles,
        Pass::NormalizeKeywords,
        Pass::SentenceRewrites,
        Pass::LocaleTransformers,
        Pass::RestoreLiterals,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pass::MaskLiterals => "mask-literals",
            Pass::RemoveArticles => "remove-articles",
            Pass::NormalizeKeywords => "normalize-keywords",
            Pass::SentenceRewrites => "sentence-rewrites",
            Pass::LocaleTransformers => "locale-transformers",
            Pass::RestoreLiterals => "restore-literals",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical text together with its locale and fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Canonicalized {
    pub text: String,
    pub locale: String,
    /// SHA-256 of `text`, lowercase hex
    pub fingerprint: String,
}

/// Canonicalizer bound to one lexicon and its resolved transformers
#[derive(Clone)]
pub struct Canonicalizer {
    lexicon: Arc<Lexicon>,
    sentence: Vec<Arc<dyn Transformer>>,
    locale: Vec<Arc<dyn Transformer>>,
}

impl Canonicalizer {
    /// Bind `lexicon`, resolving its transformer names in `transformers`.
    ///
    /// # Errors
    /// `UnknownTransformer` if the lexicon names a transformer nobody registered.
    pub fn new(lexicon: Arc<Lexicon>, transformers: &TransformerRegistry) -> Result<Self> {
        let (sentence, locale): (Vec<_>, Vec<_>) = transformers
            .resolve(&lexicon)?
            .into_iter()
            .partition(|t| t.stage() == Stage::Sentence);

        debug!(
            locale = lexicon.id(),
            sentence = sentence.len(),
            locale_transformers = locale.len(),
            "assembled canonicalizer"
        );

        Ok(Canonicalizer {
            lexicon,
            sentence,
            locale,
        })
    }

    /// Canonicalizer for a locale in the process-wide registries
    pub fn for_locale(id: &str) -> Result<Self> {
        Self::from_registries(id, registry::global())
    }

    /// Canonicalizer for a locale in the given registries
    pub fn from_registries(id: &str, registries: &Registries) -> Result<Self> {
        let lexicon = registries.lexicons.require(id)?;
        Self::new(lexicon, &registries.transformers)
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Rewrite `text` into canonical form. Never fails.
    pub fn canonicalize(&self, text: &str) -> String {
        let lexicon = self.lexicon.as_ref();

        let masked = mask_literals(text, lexicon.punctuation());
        trace!(pass = %Pass::MaskLiterals, literals = masked.spans().len());

        let current = remove_articles(masked.text(), lexicon);
        trace!(pass = %Pass::RemoveArticles, text = %current);

        let current = normalize_keywords(&current, lexicon);
        trace!(pass = %Pass::NormalizeKeywords, text = %current);

        let current = apply_all(&self.sentence, current, lexicon);
        trace!(pass = %Pass::SentenceRewrites, text = %current);

        let current = apply_all(&self.locale, current, lexicon);
        trace!(pass = %Pass::LocaleTransformers, text = %current);

        let restored = masked.restore(&current);
        trace!(pass = %Pass::RestoreLiterals, text = %restored);
        restored
    }

    /// [`canonicalize`](Self::canonicalize) plus locale id and fingerprint
    pub fn canonicalize_with_fingerprint(&self, text: &str) -> Canonicalized {
        let text = self.canonicalize(text);
        Canonicalized {
            fingerprint: fingerprint(&text),
            locale: self.lexicon.id().to_string(),
            text,
        }
    }
}

impl fmt::Debug for Canonicalizer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names = |list: &[Arc<dyn Transformer>]| -> Vec<String> {
            list.iter().map(|t| t.name().to_string()).collect()
        };
        f.debug_struct("Canonicalizer")
            .field("locale", &self.lexicon.id())
            .field("sentence", &names(&self.sentence))
            .field("locale_transformers", &names(&self.locale))
            .finish()
    }
}

fn apply_all(transformers: &[Arc<dyn Transformer>], text: String, lexicon: &Lexicon) -> String {
    transformers
        .iter()
        .fold(text, |current, transformer| transformer.apply(&current, lexicon))
}

/// SHA-256 of `text`, lowercase hex
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
