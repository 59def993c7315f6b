//! Bundled JSON grammar.
//!
//! Recursive descent over logos tokens, building a lossless rowan tree.
//! Supports error recovery: malformed input still produces a tree covering
//! every character, with offending tokens wrapped in ERROR nodes.
//!
//! Arrays and objects are reparse boundaries: they are brace-delimited, so
//! their text can be re-lexed in isolation without tokens bleeding across
//! the seam, which is what makes them safe splice targets.

mod lexer;
mod syntax_kind;

pub use lexer::{Lexer, Token, tokenize};
pub use syntax_kind::JsonKind;

use rowan::{GreenNodeBuilder, TextRange, TextSize};

use crate::base::Language;
use crate::grammar::{GrammarCapability, GrammarFailure, GrammarParse};
use crate::syntax::{SyntaxError, SyntaxKind};

/// The JSON grammar capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGrammar;

impl GrammarCapability for JsonGrammar {
    fn language(&self) -> Language {
        Language::JSON
    }

    fn parse(&self, text: &str) -> Result<GrammarParse, GrammarFailure> {
        let tokens: Vec<_> = tokenize(text);
        let mut parser = Parser::new(&tokens);
        parser.parse_document();
        Ok(parser.finish())
    }

    fn parse_node(&self, kind: SyntaxKind, text: &str) -> Option<GrammarParse> {
        let kind = JsonKind::try_from(kind).ok()?;
        let tokens: Vec<_> = tokenize(text);
        let mut parser = Parser::new(&tokens);
        match kind {
            JsonKind::ARRAY => {
                if !parser.at(JsonKind::L_BRACKET) {
                    return None;
                }
                parser.parse_array();
            }
            JsonKind::OBJECT => {
                if !parser.at(JsonKind::L_BRACE) {
                    return None;
                }
                parser.parse_object();
            }
            _ => return None,
        }
        // The text must form exactly one clean node: fully consumed and
        // error-free, otherwise splicing it could diverge from a full parse.
        if !parser.at_eof() {
            return None;
        }
        let parse = parser.finish();
        if parse.errors.is_empty() { Some(parse) } else { None }
    }

    fn reparse_boundary(&self, kind: SyntaxKind) -> bool {
        matches!(
            JsonKind::try_from(kind),
            Ok(JsonKind::ARRAY | JsonKind::OBJECT)
        )
    }

    fn kind_name(&self, kind: SyntaxKind) -> &'static str {
        JsonKind::try_from(kind)
            .map(JsonKind::name)
            .unwrap_or("UNKNOWN")
    }
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> GrammarParse {
        GrammarParse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> JsonKind {
        self.current().map(|t| t.kind).unwrap_or(JsonKind::ERROR)
    }

    fn at(&self, kind: JsonKind) -> bool {
        self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: JsonKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: JsonKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}", kind.name()));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: JsonKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// Document = Value
    fn parse_document(&mut self) {
        self.start_node(JsonKind::DOCUMENT);

        self.skip_trivia();
        if !self.at_eof() {
            self.parse_value();
        }
        self.skip_trivia();

        if !self.at_eof() {
            self.error("expected end of input");
            self.start_node(JsonKind::ERROR);
            while !self.at_eof() {
                self.bump();
            }
            self.finish_node();
        }

        self.finish_node();
    }

    /// Value = Object | Array | String | Number | true | false | null
    ///
    /// Scalars stay leaf tokens in their parent; only composite values get
    /// their own node.
    fn parse_value(&mut self) {
        match self.current_kind() {
            JsonKind::L_BRACKET => self.parse_array(),
            JsonKind::L_BRACE => self.parse_object(),
            k if k.starts_value() => self.bump(),
            k => {
                self.error(format!("expected value, found {}", k.name()));
                self.start_node(JsonKind::ERROR);
                self.bump();
                self.finish_node();
            }
        }
    }

    /// Array = '[' (Value (',' Value)*)? ']'
    fn parse_array(&mut self) {
        self.start_node(JsonKind::ARRAY);
        self.bump(); // '['
        self.skip_trivia();

        while !self.at_eof() && !self.at(JsonKind::R_BRACKET) {
            let pos_before = self.pos;
            self.parse_value();
            self.skip_trivia();
            if self.eat(JsonKind::COMMA) {
                self.skip_trivia();
                if self.at(JsonKind::R_BRACKET) {
                    self.error("unexpected trailing comma");
                }
            } else if !self.at(JsonKind::R_BRACKET) && !self.at_eof() {
                self.error("expected ',' or ']'");
            }
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.bump();
            }
        }

        self.expect(JsonKind::R_BRACKET);
        self.finish_node();
    }

    /// Object = '{' (Member (',' Member)*)? '}'
    fn parse_object(&mut self) {
        self.start_node(JsonKind::OBJECT);
        self.bump(); // '{'
        self.skip_trivia();

        while !self.at_eof() && !self.at(JsonKind::R_BRACE) {
            let pos_before = self.pos;
            self.parse_member();
            self.skip_trivia();
            if self.eat(JsonKind::COMMA) {
                self.skip_trivia();
                if self.at(JsonKind::R_BRACE) {
                    self.error("unexpected trailing comma");
                }
            } else if !self.at(JsonKind::R_BRACE) && !self.at_eof() {
                self.error("expected ',' or '}'");
            }
            if self.pos == pos_before && !self.at_eof() {
                self.bump();
            }
        }

        self.expect(JsonKind::R_BRACE);
        self.finish_node();
    }

    /// Member = String ':' Value
    fn parse_member(&mut self) {
        self.start_node(JsonKind::MEMBER);

        if !self.eat(JsonKind::STRING) {
            self.error("expected string key");
            if !self.at(JsonKind::COLON) && !self.at(JsonKind::R_BRACE) && !self.at_eof() {
                self.start_node(JsonKind::ERROR);
                self.bump();
                self.finish_node();
            }
        }
        self.skip_trivia();
        self.expect(JsonKind::COLON);
        self.skip_trivia();

        if self.at(JsonKind::R_BRACE) || self.at(JsonKind::COMMA) || self.at_eof() {
            self.error("expected value");
        } else {
            self.parse_value();
        }

        self.finish_node();
    }
}
