//! The error taxonomy shared by every core entry point.

use thiserror::Error;

use crate::base::handle::Handle;
use crate::base::language::Language;

/// Everything that can go wrong at a core boundary.
///
/// Every entry point validates its inputs before mutating any state, so no
/// partial mutation is ever visible across a failure ("fail before
/// commit"). The core never logs, retries, or silently degrades; failures
/// surface to the host through the session adapter's `signal_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The requested identifier is not in the grammar registry.
    /// Recoverable: no instance is created, no handle is allocated.
    #[error("unknown language `{language}`")]
    UnknownLanguage { language: Language },

    /// A handle argument does not refer to a live object of the expected
    /// kind. Indicates host misuse or use-after-release.
    #[error("invalid handle {handle}")]
    InvalidHandle { handle: Handle },

    /// The text source returned fewer characters than requested. Treated
    /// as a host/environment bug; the current parse is aborted and the
    /// previous tree is left intact.
    #[error("short read at offset {offset}: requested {requested} chars, got {got}")]
    ShortRead {
        offset: usize,
        requested: usize,
        got: usize,
    },

    /// An edit record violates `start <= old_end && start <= new_end`.
    #[error("invalid edit ({start}, {old_end}, {new_end})")]
    InvalidEdit {
        start: usize,
        old_end: usize,
        new_end: usize,
    },

    /// The grammar engine failed internally. The current parse is aborted
    /// and the previous tree is left intact. Syntax errors in the input are
    /// NOT parse failures; those are recovered into the tree.
    #[error("parse failure in `{language}`: {message}")]
    ParseFailure { language: Language, message: String },
}
