//! Per-buffer parser instances.

use std::sync::Arc;

use crate::base::Language;
use crate::edit::{DirtyRange, EditRecord, EditTracker};
use crate::grammar::GrammarCapability;
use crate::syntax::SyntaxTree;

/// Where an instance is in its parse lifecycle.
///
/// ```text
/// Empty -> Parsing -> Parsed -> Reparsing -> Parsed -> ...
/// ```
///
/// `Parsing`/`Reparsing` are only observable mid-`feed`; a failed feed
/// restores the previous state, so no failure leaves the machine stuck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// No tree yet.
    Empty,
    /// First (or fallback full) parse in progress.
    Parsing,
    /// A tree is installed and no parse is running.
    Parsed,
    /// Restricted reparse of a dirty region in progress.
    Reparsing,
}

/// One grammar bound to one buffer.
///
/// Owns its grammar state and the latest tree exclusively. Created by
/// `create_parser`, mutated by `feed`/`record_edit`, destroyed when the
/// host releases its handle - liveness is handle liveness, never something
/// the grammar tracks.
pub struct ParserInstance {
    pub(crate) language: Language,
    pub(crate) grammar: Arc<dyn GrammarCapability>,
    pub(crate) state: ParseState,
    /// Snapshot of the buffer as of the last successful parse.
    pub(crate) text: String,
    pub(crate) tree: Option<SyntaxTree>,
    pub(crate) tracker: EditTracker,
}

impl ParserInstance {
    pub fn new(language: Language, grammar: Arc<dyn GrammarCapability>) -> Self {
        Self {
            language,
            grammar,
            state: ParseState::Empty,
            text: String::new(),
            tree: None,
            tracker: EditTracker::new(),
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// The latest tree, if at least one parse succeeded.
    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.tree.as_ref()
    }

    /// The snapshot the latest tree was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The pending coalesced dirty range, if any edits were recorded since
    /// the last successful feed.
    pub fn dirty(&self) -> Option<DirtyRange> {
        self.tracker.dirty()
    }

    /// Record a buffer mutation; the next `feed` narrows to the coalesced
    /// dirty region.
    pub fn record_edit(&mut self, edit: EditRecord) {
        self.tracker.record(edit);
    }
}

impl std::fmt::Debug for ParserInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserInstance")
            .field("language", &self.language)
            .field("state", &self.state)
            .field("has_tree", &self.tree.is_some())
            .field("dirty", &self.tracker.dirty())
            .finish()
    }
}
