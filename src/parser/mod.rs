//! The incremental parse engine.
//!
//! One [`ParserInstance`] binds a grammar capability to one host buffer.
//! Feeding an instance pulls the buffer through chunked reads and either
//! parses it fully or, after recorded edits, re-parses only the dirty
//! region:
//!
//! 1. Coalesced edits give a dirty span (see [`crate::edit`])
//! 2. The span is expanded to the nearest node the grammar can re-parse in
//!    isolation (its reparse boundary)
//! 3. Only that node's post-edit text is re-lexed and re-parsed
//! 4. The fresh subtree is spliced over the old node; every untouched green
//!    node is reused by reference
//!
//! Incremental parsing is strictly a performance optimization: the spliced
//! tree is structurally identical to a full reparse of the post-edit
//! buffer, and the engine falls back to a full parse whenever it cannot
//! guarantee that.

mod engine;
mod instance;

pub use engine::feed;
pub use instance::{ParseState, ParserInstance};
