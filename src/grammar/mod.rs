//! Pluggable grammar capabilities.
//!
//! The engine treats a grammar as a capability object behind a fixed trait:
//! it can parse a whole snapshot, optionally re-parse a single node's text
//! for splicing, and classify its own kind space. Concrete grammars live
//! below this module ([`json`]) or come from the host via
//! [`GrammarRegistry::register`].

mod registry;

pub mod json;

pub use registry::GrammarRegistry;

use rowan::GreenNode;

use crate::base::Language;
use crate::syntax::{SyntaxError, SyntaxKind};

/// Result of one grammar run: the green root plus recovered diagnostics.
#[derive(Debug, Clone)]
pub struct GrammarParse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

/// Internal grammar failure. Distinct from syntax errors in the input:
/// those are recovered into the tree, this aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarFailure {
    pub message: String,
}

impl GrammarFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A component that tokenizes and parses text for one language.
///
/// Implementations must be deterministic: the same text always produces a
/// structurally identical tree, and `parse_node` output spliced into an old
/// tree must match what `parse` would build over the whole buffer. A
/// grammar that cannot promise that for some node kind simply returns
/// `None` from `parse_node` and the engine falls back to a full parse.
pub trait GrammarCapability: Send + Sync + std::fmt::Debug {
    /// The identifier this capability serves.
    fn language(&self) -> Language;

    /// Full parse of a buffer snapshot.
    ///
    /// Syntax errors in the input are recovered into the tree, not
    /// reported here; `Err` means the grammar itself failed and the engine
    /// must not publish anything.
    fn parse(&self, text: &str) -> Result<GrammarParse, GrammarFailure>;

    /// Re-parse `text` as a single node of kind `kind`, for splicing.
    ///
    /// Returns `None` unless `text` forms exactly one clean node of that
    /// kind (fully consumed, no errors). Only meaningful for kinds where
    /// [`reparse_boundary`](Self::reparse_boundary) holds.
    fn parse_node(&self, kind: SyntaxKind, text: &str) -> Option<GrammarParse>;

    /// Whether nodes of `kind` delimit a self-contained region that can be
    /// re-lexed in isolation without the seam bleeding into neighbors.
    fn reparse_boundary(&self, kind: SyntaxKind) -> bool;

    /// Debug name for a kind in this grammar's space.
    fn kind_name(&self, kind: SyntaxKind) -> &'static str;
}
