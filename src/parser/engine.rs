//! The parse driver: chunked feed, restricted reparse, splice.

use rowan::NodeOrToken;
use text_size::{TextRange, TextSize};
use tracing::trace;

use crate::base::EngineError;
use crate::edit::DirtyRange;
use crate::grammar::GrammarCapability;
use crate::parser::instance::{ParseState, ParserInstance};
use crate::syntax::{SyntaxNode, SyntaxTree};
use crate::text::{self, TextSource};

/// Parse or re-parse `instance` against the current contents of `source`.
///
/// Pulls the buffer through chunked reads, then either runs a full parse
/// (no dirty range) or a restricted reparse of the dirty region expanded to
/// the nearest stable node boundary, splicing the result into the previous
/// tree. The spliced tree is structurally identical to what a full reparse
/// of the post-edit buffer would build; whenever that cannot be guaranteed
/// the engine silently performs the full parse instead.
///
/// On failure the instance is left exactly as it was: previous tree, text,
/// state, and pending edits all intact ("fail before commit").
pub fn feed(
    instance: &mut ParserInstance,
    source: &dyn TextSource,
) -> Result<SyntaxTree, EngineError> {
    let new_text = text::read_to_string(source)?;

    let prev_state = instance.state;
    let dirty = instance.tracker.dirty();
    let incremental = instance.tree.is_some() && dirty.is_some();
    instance.state = if incremental {
        ParseState::Reparsing
    } else {
        ParseState::Parsing
    };

    let result = match (instance.tree.as_ref(), dirty) {
        (Some(old_tree), Some(dirty)) => {
            match try_restricted_reparse(
                instance.grammar.as_ref(),
                old_tree,
                &instance.text,
                &new_text,
                dirty,
            ) {
                Some(tree) => {
                    trace!(language = %instance.language, "restricted reparse spliced");
                    Ok(tree)
                }
                None => {
                    trace!(language = %instance.language, "restricted reparse unavailable, reparsing fully");
                    full_parse(instance.grammar.as_ref(), &new_text)
                }
            }
        }
        _ => full_parse(instance.grammar.as_ref(), &new_text),
    };

    match result {
        Ok(tree) => {
            instance.text = new_text;
            instance.tree = Some(tree.clone());
            instance.tracker.clear();
            instance.state = ParseState::Parsed;
            Ok(tree)
        }
        Err(err) => {
            instance.state = prev_state;
            Err(err)
        }
    }
}

fn full_parse(grammar: &dyn GrammarCapability, text: &str) -> Result<SyntaxTree, EngineError> {
    match grammar.parse(text) {
        Ok(parse) => Ok(SyntaxTree::new(parse.green, parse.errors)),
        Err(failure) => Err(EngineError::ParseFailure {
            language: grammar.language(),
            message: failure.message,
        }),
    }
}

/// Attempt the splice path. `None` means "do a full parse instead"; every
/// guard below exists to keep incremental output bit-identical to a full
/// reparse, never to rescue a doomed parse.
fn try_restricted_reparse(
    grammar: &dyn GrammarCapability,
    old_tree: &SyntaxTree,
    old_text: &str,
    new_text: &str,
    dirty: DirtyRange,
) -> Option<SyntaxTree> {
    // Splicing into a tree that holds error nodes could revive stale
    // diagnostics with shifted offsets
    if !old_tree.ok() {
        return None;
    }

    let start = to_text_size(text::char_to_byte(old_text, dirty.start)?)?;
    let old_end = to_text_size(text::char_to_byte(old_text, dirty.old_end)?)?;
    let new_end_byte = text::char_to_byte(new_text, dirty.new_end)?;

    let root = old_tree.syntax();
    let dirty_range = TextRange::new(start, old_end);
    if !root.text_range().contains_range(dirty_range) {
        return None;
    }

    let node = boundary_node(grammar, &root, dirty_range)?;
    let node_range = node.text_range();

    // The region grows/shrinks by the edit delta; everything after it is
    // untouched suffix
    let delta = new_end_byte as i64 - i64::from(u32::from(old_end));
    let new_node_end = i64::from(u32::from(node_range.end())) + delta;
    let new_node_start = usize::from(node_range.start());
    if new_node_end < new_node_start as i64 {
        return None;
    }
    let slice = new_text.get(new_node_start..new_node_end as usize)?;

    let sub = grammar.parse_node(node.kind(), slice)?;
    let green = node.replace_with(sub.green.clone());
    let tree = SyntaxTree::new(green, Vec::new());

    // Offset bookkeeping guard: the spliced tree must reproduce the buffer
    if tree.text() != new_text {
        return None;
    }
    Some(tree)
}

/// Expand a dirty span to the nearest enclosing node the grammar can
/// re-parse in isolation.
fn boundary_node(
    grammar: &dyn GrammarCapability,
    root: &SyntaxNode,
    dirty_range: TextRange,
) -> Option<SyntaxNode> {
    let mut node = match root.covering_element(dirty_range) {
        NodeOrToken::Node(node) => node,
        NodeOrToken::Token(token) => token.parent()?,
    };
    loop {
        if node.parent().is_some() && grammar.reparse_boundary(node.kind()) {
            return Some(node);
        }
        node = node.parent()?;
    }
}

fn to_text_size(byte: usize) -> Option<TextSize> {
    u32::try_from(byte).ok().map(TextSize::new)
}
