//! Syntax kinds for the JSON grammar's slice of the raw kind space.

use crate::syntax::SyntaxKind;

/// All syntax kinds (tokens and nodes) in JSON.
///
/// Tokens are leaf nodes (literals, punctuation).
/// Nodes are composite (documents, arrays, objects, members).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum JsonKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,

    // =========================================================================
    // LITERALS
    // =========================================================================
    STRING,   // "hello"
    NUMBER,   // 42, 3.14, -1e9
    TRUE_KW,  // true
    FALSE_KW, // false
    NULL_KW,  // null

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,   // {
    R_BRACE,   // }
    L_BRACKET, // [
    R_BRACKET, // ]
    COLON,     // :
    COMMA,     // ,

    // =========================================================================
    // NODES
    // =========================================================================
    DOCUMENT, // top-level value plus surrounding trivia
    OBJECT,   // { members }
    ARRAY,    // [ values ]
    MEMBER,   // "key": value

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl JsonKind {
    /// Check if this is a trivia token.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE)
    }

    /// Check if this token can start a value.
    pub fn starts_value(self) -> bool {
        matches!(
            self,
            Self::STRING
                | Self::NUMBER
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
                | Self::L_BRACE
                | Self::L_BRACKET
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::WHITESPACE => "WHITESPACE",
            Self::STRING => "STRING",
            Self::NUMBER => "NUMBER",
            Self::TRUE_KW => "TRUE_KW",
            Self::FALSE_KW => "FALSE_KW",
            Self::NULL_KW => "NULL_KW",
            Self::L_BRACE => "L_BRACE",
            Self::R_BRACE => "R_BRACE",
            Self::L_BRACKET => "L_BRACKET",
            Self::R_BRACKET => "R_BRACKET",
            Self::COLON => "COLON",
            Self::COMMA => "COMMA",
            Self::DOCUMENT => "DOCUMENT",
            Self::OBJECT => "OBJECT",
            Self::ARRAY => "ARRAY",
            Self::MEMBER => "MEMBER",
            Self::ERROR => "ERROR",
            Self::__LAST => "__LAST",
        }
    }
}

impl From<JsonKind> for SyntaxKind {
    fn from(kind: JsonKind) -> Self {
        Self(kind as u16)
    }
}

impl From<JsonKind> for rowan::SyntaxKind {
    fn from(kind: JsonKind) -> Self {
        Self(kind as u16)
    }
}

impl TryFrom<SyntaxKind> for JsonKind {
    type Error = ();

    fn try_from(raw: SyntaxKind) -> Result<Self, ()> {
        if raw.0 >= JsonKind::__LAST as u16 {
            return Err(());
        }
        // Safety: repr(u16), contiguous from 0, bounds checked above
        Ok(unsafe { std::mem::transmute::<u16, JsonKind>(raw.0) })
    }
}
