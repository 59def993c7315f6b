//! Logos-based lexer for JSON.

use logos::Logos;
use rowan::TextSize;

use super::syntax_kind::JsonKind;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: JsonKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => JsonKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to JsonKind
///
/// No skip patterns: whitespace is a real token, the tree is lossless.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
}

impl From<LogosToken> for JsonKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => JsonKind::WHITESPACE,
            LogosToken::String => JsonKind::STRING,
            LogosToken::Number => JsonKind::NUMBER,
            LogosToken::True => JsonKind::TRUE_KW,
            LogosToken::False => JsonKind::FALSE_KW,
            LogosToken::Null => JsonKind::NULL_KW,
            LogosToken::LBrace => JsonKind::L_BRACE,
            LogosToken::RBrace => JsonKind::R_BRACE,
            LogosToken::LBracket => JsonKind::L_BRACKET,
            LogosToken::RBracket => JsonKind::R_BRACKET,
            LogosToken::Colon => JsonKind::COLON,
            LogosToken::Comma => JsonKind::COMMA,
        }
    }
}
