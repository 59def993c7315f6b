//! # graft-base
//!
//! Core library for incremental, multi-language syntax parsing over live
//! host buffers.
//!
//! An embedding host (an editor, typically) declares a language for a
//! buffer, gets back an opaque parser handle, and feeds the buffer through
//! the engine in bounded chunks. After localized edits the engine
//! re-synchronizes the syntax tree by re-parsing only the dirty region and
//! splicing the result, instead of reparsing from scratch.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! runtime   → host entry points, handle ownership, init/shutdown
//!   ↓
//! host      → HostBridge: type predicates, error signaling
//!   ↓
//! parser    → ParserEngine: chunked feed, restricted reparse, splice
//!   ↓
//! edit      → EditRecord, dirty-range coalescing
//!   ↓
//! grammar   → GrammarCapability trait, registry, bundled JSON grammar
//!   ↓
//! syntax    → raw kind space, rowan tree types, SyntaxTree
//!   ↓
//! text      → TextSource, chunked reads, ShortRead check
//!   ↓
//! base      → Handle/HandleTable, Language, EngineError
//! ```

// ============================================================================
// MODULES (dependency order: base → text → syntax → grammar → edit → parser
// → host → runtime)
// ============================================================================

/// Foundation types: Handle, HandleTable, Language, EngineError
pub mod base;

/// Text feed: TextSource, chunked reads, exact-length checks
pub mod text;

/// Syntax trees: raw kinds, rowan types, SyntaxTree, SyntaxError
pub mod syntax;

/// Grammars: capability trait, registry, bundled JSON grammar
pub mod grammar;

/// Edit tracking: EditRecord, DirtyRange coalescing
pub mod edit;

/// Parse engine: instances, state machine, incremental feed
pub mod parser;

/// Host bridge: type predicates, error signaling
pub mod host;

/// Runtime: process-wide state, host-to-core entry points
pub mod runtime;

// Re-export foundation types
pub use base::{EngineError, Handle, HandleTable, Language};
pub use edit::{DirtyRange, EditRecord, EditTracker};
pub use grammar::{GrammarCapability, GrammarParse, GrammarRegistry};
pub use parser::{ParseState, ParserInstance};
pub use runtime::{HostSession, Runtime};
pub use syntax::{SyntaxError, SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTree};
pub use text::{CHUNK_SIZE, StringSource, TextSource};
