//! Transformers — named rewrite rules a locale opts into
//!
//! A transformer is a pure `text → text` function over masked text, given
//! the active [`Lexicon`]. Lexicons list transformer names; the
//! [`TransformerRegistry`] resolves them when a canonicalizer is built.
//!
//! Built-ins:
//! - `result-is` — "The result is X." → "Return X."
//! - `set-to` — "Set x to Y." → "Let x be Y."
//! - `english-possessive` — "driver's age" → "driver.age"

pub mod possessive;
pub mod sentence;

pub use possessive::EnglishPossessive;
pub use sentence::{ResultIs, SetTo};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::lexicon::Lexicon;
use crate::{Error, Result};

/// Pipeline stage a transformer runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Whole-sentence paraphrase rewrites, after keyword normalization
    Sentence,
    /// Locale-specific rewrites, last before literals are restored
    Locale,
}

/// Named, stateless rewrite rule
pub trait Transformer: Send + Sync {
    /// Unique registry name
    fn name(&self) -> &str;

    /// Stage this transformer belongs to
    fn stage(&self) -> Stage {
        Stage::Locale
    }

    /// Rewrite masked text. Must not alter placeholder characters.
    fn apply(&self, text: &str, lexicon: &Lexicon) -> String;
}

/// Name → transformer, read-only once startup is done
#[derive(Clone, Default)]
pub struct TransformerRegistry {
    transformers: BTreeMap<String, Arc<dyn Transformer>>,
}

impl TransformerRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `result-is`, `set-to` and `english-possessive`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins: [Arc<dyn Transformer>; 3] = [
            Arc::new(ResultIs),
            Arc::new(SetTo),
            Arc::new(EnglishPossessive),
        ];
        for transformer in builtins {
            registry
                .transformers
                .insert(transformer.name().to_string(), transformer);
        }
        registry
    }

    /// Add a transformer under its own name.
    ///
    /// # Errors
    /// `DuplicateTransformer` if the name is taken.
    pub fn register(&mut self, transformer: Arc<dyn Transformer>) -> Result<()> {
        let name = transformer.name().to_string();
        if self.transformers.contains_key(&name) {
            return Err(Error::DuplicateTransformer(name));
        }
        self.transformers.insert(name, transformer);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Transformer>> {
        self.transformers.get(name).cloned()
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transformers.keys().map(String::as_str)
    }

    /// Resolve every name the lexicon lists, keeping its order.
    ///
    /// # Errors
    /// `UnknownTransformer` for the first name nobody registered.
    pub fn resolve(&self, lexicon: &Lexicon) -> Result<Vec<Arc<dyn Transformer>>> {
        lexicon
            .transformer_names()
            .iter()
            .map(|name| {
                self.get(name).ok_or_else(|| Error::UnknownTransformer {
                    locale: lexicon.id().to_string(),
                    name: name.clone(),
                })
            })
            .collect()
    }
}

impl fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::tests::complete_builder;

    struct Shout;

    impl Transformer for Shout {
        fn name(&self) -> &str {
            "shout"
        }

        fn apply(&self, text: &str, _lexicon: &Lexicon) -> String {
            text.to_uppercase()
        }
    }

    #[test]
    fn test_builtins_are_registered() {
        let registry = TransformerRegistry::with_builtins();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["english-possessive", "result-is", "set-to"]);
        assert_eq!(registry.get("set-to").unwrap().stage(), Stage::Sentence);
        assert_eq!(
            registry.get("english-possessive").unwrap().stage(),
            Stage::Locale
        );
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = TransformerRegistry::with_builtins();
        registry.register(Arc::new(Shout)).unwrap();
        let err = registry.register(Arc::new(Shout)).unwrap_err();
        assert_eq!(err, Error::DuplicateTransformer("shout".into()));
    }

    #[test]
    fn test_resolve_keeps_lexicon_order() {
        let mut registry = TransformerRegistry::with_builtins();
        registry.register(Arc::new(Shout)).unwrap();
        let lexicon = complete_builder("xx-TEST")
            .transformer("shout")
            .transformer("result-is")
            .build()
            .unwrap();
        let resolved = registry.resolve(&lexicon).unwrap();
        let names: Vec<_> = resolved.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["shout", "result-is"]);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let registry = TransformerRegistry::new();
        let lexicon = complete_builder("xx-TEST")
            .transformer("pig-latin")
            .build()
            .unwrap();
        let err = registry.resolve(&lexicon).err().unwrap();
        assert_eq!(
            err,
            Error::UnknownTransformer {
                locale: "xx-TEST".into(),
                name: "pig-latin".into()
            }
        );
    }
}
