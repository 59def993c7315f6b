//! Process-wide engine state and the host-to-core entry points.
//!
//! A [`Runtime`] owns the grammar registry and the handle table holding
//! every live parser instance and published tree. Hosts create one at
//! module load (`Runtime::init`) and tear it down at unload
//! (`Runtime::shutdown`), which releases all outstanding handles.
//!
//! Every entry point validates its handle arguments first and fails fast
//! with `InvalidHandle` before touching engine state.

mod session;

pub use session::HostSession;

use std::sync::Arc;

use tracing::debug;

use crate::base::{EngineError, Handle, HandleTable, Language};
use crate::edit::EditRecord;
use crate::grammar::json::JsonGrammar;
use crate::grammar::{GrammarCapability, GrammarRegistry};
use crate::parser::{self, ParseState, ParserInstance};
use crate::syntax::SyntaxTree;
use crate::text::TextSource;

/// A core-owned object a host can hold a handle to.
#[derive(Debug)]
enum CoreObject {
    Parser(ParserInstance),
    Tree(SyntaxTree),
}

/// Owns all engine state for one embedding.
#[derive(Debug, Default)]
pub struct Runtime {
    registry: GrammarRegistry,
    objects: HandleTable<CoreObject>,
}

impl Runtime {
    /// An empty runtime with no registered grammars.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runtime with the bundled grammars registered. This is the normal
    /// entry point for hosts.
    pub fn init() -> Self {
        let runtime = Self::new();
        runtime
            .registry
            .register(Language::JSON, Arc::new(JsonGrammar));
        debug!("runtime initialized");
        runtime
    }

    /// Release every outstanding handle and registration.
    pub fn shutdown(&mut self) {
        debug!(live_objects = self.objects.len(), "runtime shutdown");
        self.objects.drain();
        self.registry.clear();
    }

    pub fn registry(&self) -> &GrammarRegistry {
        &self.registry
    }

    /// Make a new parser instance for `language`.
    ///
    /// Fails with `UnknownLanguage` before any handle is allocated; the
    /// returned instance is in the `Empty` state until the first feed.
    pub fn create_parser(&mut self, language: Language) -> Result<Handle, EngineError> {
        let grammar: Arc<dyn GrammarCapability> = self.registry.resolve(&language)?;
        let instance = ParserInstance::new(language, grammar);
        Ok(self.objects.alloc(CoreObject::Parser(instance)))
    }

    /// Parse or re-parse against the current contents of `source`,
    /// returning a handle to the new tree.
    ///
    /// After recorded edits this is a restricted reparse of the dirty
    /// region; otherwise a full parse. On failure the instance keeps its
    /// previous tree and pending edits.
    pub fn feed(&mut self, parser: Handle, source: &dyn TextSource) -> Result<Handle, EngineError> {
        let instance = self.parser_mut(parser)?;
        let tree = parser::feed(instance, source)?;
        Ok(self.objects.alloc(CoreObject::Tree(tree)))
    }

    /// Record one buffer mutation on a parser instance; offsets are
    /// character positions.
    pub fn record_edit(
        &mut self,
        parser: Handle,
        start: usize,
        old_end: usize,
        new_end: usize,
    ) -> Result<(), EngineError> {
        // Handle first, then offsets, then mutate
        let instance = self.parser_mut(parser)?;
        let edit = EditRecord::new(start, old_end, new_end)?;
        instance.record_edit(edit);
        Ok(())
    }

    /// Inspect a parser instance.
    pub fn parser(&self, handle: Handle) -> Result<&ParserInstance, EngineError> {
        match self.objects.get(handle)? {
            CoreObject::Parser(instance) => Ok(instance),
            CoreObject::Tree(_) => Err(EngineError::InvalidHandle { handle }),
        }
    }

    /// Current lifecycle state of a parser instance.
    pub fn parser_state(&self, handle: Handle) -> Result<ParseState, EngineError> {
        Ok(self.parser(handle)?.state())
    }

    /// Inspect a published tree.
    pub fn tree(&self, handle: Handle) -> Result<&SyntaxTree, EngineError> {
        match self.objects.get(handle)? {
            CoreObject::Tree(tree) => Ok(tree),
            CoreObject::Parser(_) => Err(EngineError::InvalidHandle { handle }),
        }
    }

    /// Drop the object behind `handle` (parser or tree).
    ///
    /// Idempotent: releasing an already-released handle is a no-op
    /// returning `false`. Releasing a parser never invalidates outstanding
    /// tree handles; trees own their green roots.
    pub fn release(&mut self, handle: Handle) -> bool {
        self.objects.release(handle)
    }

    /// Number of live objects (parsers plus trees).
    pub fn live_objects(&self) -> usize {
        self.objects.len()
    }

    fn parser_mut(&mut self, handle: Handle) -> Result<&mut ParserInstance, EngineError> {
        match self.objects.get_mut(handle)? {
            CoreObject::Parser(instance) => Ok(instance),
            CoreObject::Tree(_) => Err(EngineError::InvalidHandle { handle }),
        }
    }
}
