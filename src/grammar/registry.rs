//! Process-wide language-to-grammar mapping.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::base::{EngineError, Language};
use crate::grammar::GrammarCapability;

/// Maps language identifiers to grammar capabilities.
///
/// Read-mostly: populated at init, then resolved on every `create_parser`.
/// Identifiers are compared by value, so hosts can pass freshly
/// constructed ones. Registration is idempotent with last-write-wins.
///
/// Populated explicitly via `register`; there are no load-time side
/// effects.
#[derive(Default)]
pub struct GrammarRegistry {
    map: RwLock<IndexMap<Language, Arc<dyn GrammarCapability>>>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `language` to `grammar`. Re-registering the same identifier
    /// replaces the previous capability.
    pub fn register(&self, language: Language, grammar: Arc<dyn GrammarCapability>) {
        debug!(language = %language, "registering grammar");
        self.map.write().insert(language, grammar);
    }

    /// Look up the capability for `language`.
    pub fn resolve(&self, language: &Language) -> Result<Arc<dyn GrammarCapability>, EngineError> {
        self.map
            .read()
            .get(language)
            .cloned()
            .ok_or_else(|| EngineError::UnknownLanguage {
                language: language.clone(),
            })
    }

    /// Registered identifiers, in registration order.
    pub fn languages(&self) -> Vec<Language> {
        self.map.read().keys().cloned().collect()
    }

    /// Drop every registration. Used at shutdown.
    pub fn clear(&self) {
        self.map.write().clear();
    }
}

impl std::fmt::Debug for GrammarRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrammarRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}
