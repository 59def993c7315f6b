//! Syntax tree types shared by every grammar.
//!
//! The core is grammar-agnostic: node and token kinds are raw `u16` values
//! owned by whichever grammar produced the tree, and only the grammar can
//! name or classify them. The tree itself is a rowan green/red tree:
//!
//! ```text
//! GreenNode      immutable, position-independent, structurally shared
//!     |
//! SyntaxNode     red layer with offsets and parent pointers, built on demand
//! ```
//!
//! Green-node sharing is what makes incremental reparsing cheap: splicing a
//! new subtree reuses every untouched green node by reference.

use rowan::GreenNode;
use text_size::TextRange;

/// A raw node/token kind within some grammar's kind space.
///
/// The engine never interprets kinds; it only routes them back into the
/// grammar that produced them (`reparse_boundary`, `kind_name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SyntaxKind(pub u16);

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind.0)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        Self(raw.0)
    }
}

/// Language definition for rowan.
///
/// One tree language covers every grammar; the raw kind space is
/// partitioned per grammar by construction (a tree only ever holds kinds
/// from the single grammar that parsed it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TreeLanguage {}

impl rowan::Language for TreeLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<TreeLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<TreeLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<TreeLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<TreeLanguage>;

/// A syntax error with location and message.
///
/// These are *recovered* diagnostics: the input failed to parse cleanly but
/// the tree still covers every character, with the offending region wrapped
/// in an error node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// An immutable-until-replaced parse result: the green root plus the
/// diagnostics recovered while building it.
///
/// A new tree is produced on each successful parse. Cloning is cheap (the
/// green root is reference-counted), so an instance and any number of
/// outstanding tree handles can own "the same" tree without copying.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl SyntaxTree {
    pub fn new(green: GreenNode, errors: Vec<SyntaxError>) -> Self {
        Self { green, errors }
    }

    /// Root of the tree with offsets and parent pointers.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Span of the root node: `[0, text length)`.
    pub fn range(&self) -> TextRange {
        self.syntax().text_range()
    }

    /// Reconstruct the exact source text (the tree is lossless).
    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }

    /// Structural equality, ignoring how either tree was produced.
    ///
    /// Used to check that an incremental reparse is byte-for-byte identical
    /// to a full reparse of the same buffer.
    pub fn structurally_equal(&self, other: &SyntaxTree) -> bool {
        format!("{:#?}", self.syntax()) == format!("{:#?}", other.syntax())
    }
}
