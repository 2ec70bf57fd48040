//! Locale registries
//!
//! Lexicons and transformers are registered explicitly at startup through
//! [`LocalePack`] providers and then only read. A process-wide pair of
//! registries lives in a `OnceLock`: [`install`] sets it once, otherwise
//! the first read populates it with the built-in packs.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::lexicon::Lexicon;
use crate::transformer::{Transformer, TransformerRegistry};
use crate::{Error, Result};

/// Locale id → lexicon
#[derive(Debug, Clone, Default)]
pub struct LexiconRegistry {
    lexicons: BTreeMap<String, Arc<Lexicon>>,
}

impl LexiconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lexicon under its own id.
    ///
    /// # Errors
    /// `DuplicateLocale` if the id is taken.
    pub fn register(&mut self, lexicon: Lexicon) -> Result<Arc<Lexicon>> {
        let id = lexicon.id().to_string();
        if self.lexicons.contains_key(&id) {
            return Err(Error::DuplicateLocale(id));
        }
        let lexicon = Arc::new(lexicon);
        self.lexicons.insert(id, Arc::clone(&lexicon));
        Ok(lexicon)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Lexicon>> {
        self.lexicons.get(id).cloned()
    }

    /// Like [`get`](Self::get), failing with `UnknownLocale`
    pub fn require(&self, id: &str) -> Result<Arc<Lexicon>> {
        self.get(id)
            .ok_or_else(|| Error::UnknownLocale(id.to_string()))
    }

    /// Registered locale ids, sorted
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.lexicons.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lexicons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicons.is_empty()
    }
}

/// Supplies one locale's lexicon and any transformers it brings along
pub trait LocalePack {
    /// Build and validate the lexicon
    fn lexicon(&self) -> Result<Lexicon>;

    /// Transformers this pack contributes
    fn transformers(&self) -> Vec<Arc<dyn Transformer>> {
        Vec::new()
    }
}

/// Built-in English (United States) pack
///
/// Its transformers are the built-ins, so it contributes none itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnUsPack;

const EN_US_JSON: &str = include_str!("../locales/en-US.json");

impl LocalePack for EnUsPack {
    fn lexicon(&self) -> Result<Lexicon> {
        Lexicon::from_json(EN_US_JSON)
    }
}

/// Pack read from a locale-pack JSON document
#[derive(Debug, Clone)]
pub struct DocumentPack {
    json: String,
}

impl DocumentPack {
    pub fn new(json: impl Into<String>) -> Self {
        DocumentPack { json: json.into() }
    }
}

impl LocalePack for DocumentPack {
    fn lexicon(&self) -> Result<Lexicon> {
        Lexicon::from_json(&self.json)
    }
}

/// Register a pack's transformers, then its lexicon.
///
/// All or nothing: every check runs before the first registration, so on
/// error both registries are left as they were.
///
/// # Errors
/// The lexicon's configuration error, `DuplicateTransformer`, or
/// `DuplicateLocale`.
pub fn install_pack(
    pack: &dyn LocalePack,
    lexicons: &mut LexiconRegistry,
    transformers: &mut TransformerRegistry,
) -> Result<Arc<Lexicon>> {
    let lexicon = pack.lexicon()?;
    if lexicons.get(lexicon.id()).is_some() {
        return Err(Error::DuplicateLocale(lexicon.id().to_string()));
    }

    let contributed = pack.transformers();
    let mut names = BTreeSet::new();
    for transformer in &contributed {
        let name = transformer.name();
        if transformers.get(name).is_some() || !names.insert(name) {
            return Err(Error::DuplicateTransformer(name.to_string()));
        }
    }

    let count = contributed.len();
    for transformer in contributed {
        transformers.register(transformer)?;
    }

    let lexicon = lexicons.register(lexicon)?;
    debug!(locale = lexicon.id(), transformers = count, "installed locale pack");
    Ok(lexicon)
}

/// A lexicon registry and a transformer registry that belong together
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub lexicons: LexiconRegistry,
    pub transformers: TransformerRegistry,
}

impl Registries {
    /// Built-in transformers only, no locales
    pub fn empty() -> Self {
        Registries {
            lexicons: LexiconRegistry::new(),
            transformers: TransformerRegistry::with_builtins(),
        }
    }

    /// Built-in transformers and the built-in `en-US` pack.
    ///
    /// A broken embedded pack is logged and left out rather than aborting.
    pub fn builtin() -> Self {
        let mut registries = Self::empty();
        if let Err(e) = registries.install(&EnUsPack) {
            warn!(error = %e, "failed to load built-in en-US locale pack");
        }
        registries
    }

    /// [`install_pack`] into these registries
    pub fn install(&mut self, pack: &dyn LocalePack) -> Result<Arc<Lexicon>> {
        install_pack(pack, &mut self.lexicons, &mut self.transformers)
    }
}

static GLOBAL: OnceLock<Registries> = OnceLock::new();

/// Set the process-wide registries.
///
/// # Errors
/// `RegistryInitialized` if they were already set or already read.
pub fn install(registries: Registries) -> Result<()> {
    GLOBAL
        .set(registries)
        .map_err(|_| Error::RegistryInitialized)
}

/// Process-wide registries, populated with [`Registries::builtin`] on first use
pub fn global() -> &'static Registries {
    GLOBAL.get_or_init(Registries::builtin)
}
