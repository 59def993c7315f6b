//! Incremental editing end to end: every spliced tree must be
//! structurally identical to a from-scratch parse of the post-edit buffer.
//!
//! Run with: `cargo test --test test_editing_integration`

use rstest::rstest;

use graft::grammar::GrammarCapability;
use graft::grammar::json::{JsonGrammar, JsonKind};
use graft::host::{FnPredicate, HostBridge, TypePredicate};
use graft::{
    EngineError, Handle, HostSession, Language, Runtime, StringSource, SyntaxTree,
};

fn parse_text(text: &str) -> SyntaxTree {
    let parse = JsonGrammar.parse(text).unwrap();
    SyntaxTree::new(parse.green, parse.errors)
}

/// Mutate the buffer and record the matching edit, the way a host editor
/// reports a replacement of `[start, old_end)` with `replacement`.
fn apply_edit(
    runtime: &mut Runtime,
    parser: Handle,
    source: &mut StringSource,
    start: usize,
    old_end: usize,
    replacement: &str,
) {
    source.splice(start, old_end, replacement);
    let new_end = start + replacement.chars().count();
    runtime.record_edit(parser, start, old_end, new_end).unwrap();
}

/// Feed and check the incremental/full equivalence property.
fn feed_and_check(runtime: &mut Runtime, parser: Handle, source: &StringSource) {
    let tree_handle = runtime.feed(parser, source).unwrap();
    let tree = runtime.tree(tree_handle).unwrap();
    assert_eq!(tree.text(), source.text(), "tree must reproduce the buffer");
    assert!(
        tree.structurally_equal(&parse_text(source.text())),
        "incremental result diverged from a from-scratch parse of {:?}",
        source.text()
    );
}

// =============================================================================
// Incremental / full equivalence
// =============================================================================

#[rstest]
// replace a scalar inside a nested array
#[case("[[1,2],[3,4]]", 2, 3, "100")]
// insert an element
#[case("[[1,2],[3,4]]", 5, 5, ",7")]
// delete an element
#[case("[[1,2],[3,4]]", 3, 5, "")]
// grow a string literal
#[case(r#"{"k": "v", "n": [1]}"#, 8, 8, "alue")]
// edit inside an object member value
#[case(r#"{"a": {"b": 1}, "c": 2}"#, 12, 13, "42")]
// edit that erases a closing bracket (forces full-parse fallback)
#[case("[[1,2],[3,4]]", 5, 6, "")]
// edit spanning two siblings (dirty range crosses node boundaries)
#[case("[[1,2],[3,4]]", 4, 9, "9],[8")]
// touch the very first character
#[case("[1]", 0, 1, "[ ")]
// empty out the document body
#[case("[1]", 0, 3, "")]
fn test_single_edit_equivalence(
    #[case] initial: &str,
    #[case] start: usize,
    #[case] old_end: usize,
    #[case] replacement: &str,
) {
    let mut runtime = Runtime::init();
    let mut source = StringSource::new(initial);
    let parser = runtime.create_parser(Language::JSON).unwrap();
    runtime.feed(parser, &source).unwrap();

    apply_edit(&mut runtime, parser, &mut source, start, old_end, replacement);
    feed_and_check(&mut runtime, parser, &source);
}

#[test]
fn test_long_edit_session() {
    // A realistic typing session: many small edits, feed after each
    let mut runtime = Runtime::init();
    let mut source = StringSource::new("{}");
    let parser = runtime.create_parser(Language::JSON).unwrap();
    runtime.feed(parser, &source).unwrap();

    let script: &[(usize, usize, &str)] = &[
        (1, 1, "\"list\": []"),       // {"list": []}
        (10, 10, "1"),                // {"list": [1]}
        (11, 11, ", 2, 3"),           // {"list": [1, 2, 3]}
        (16, 17, "30"),               // {"list": [1, 2, 30]}
        (19, 19, ", \"done\": true"), // {"list": [1, 2, 30], "done": true}
        (1, 7, "\"xs\""),             // {"xs": [1, 2, 30], "done": true}
        (7, 17, "[]"),                // {"xs": [], "done": true}
    ];
    for &(start, old_end, replacement) in script {
        apply_edit(&mut runtime, parser, &mut source, start, old_end, replacement);
        feed_and_check(&mut runtime, parser, &source);
    }
    assert_eq!(source.text(), r#"{"xs": [], "done": true}"#);
}

#[test]
fn test_multiple_edits_coalesce_before_feed() {
    // Several edits, one feed: the coalesced dirty range must still
    // resynchronize exactly
    let mut runtime = Runtime::init();
    let mut source = StringSource::new("[[1,2],[3,4]]");
    let parser = runtime.create_parser(Language::JSON).unwrap();
    runtime.feed(parser, &source).unwrap();

    apply_edit(&mut runtime, parser, &mut source, 2, 3, "9");
    apply_edit(&mut runtime, parser, &mut source, 10, 11, "77");
    apply_edit(&mut runtime, parser, &mut source, 1, 1, " ");
    feed_and_check(&mut runtime, parser, &source);
    assert_eq!(source.text(), "[ [9,2],[3,77]]");
}

#[test]
fn test_spec_coalescing_example() {
    // Edits [2,5)->[2,6) then [4,6)->[4,7) must leave one dirty range
    // covering at least [2,7) before the next feed
    let mut runtime = Runtime::init();
    let parser = runtime.create_parser(Language::JSON).unwrap();
    runtime.feed(parser, &StringSource::new("[0,1,2,3]")).unwrap();

    runtime.record_edit(parser, 2, 5, 6).unwrap();
    runtime.record_edit(parser, 4, 6, 7).unwrap();

    let dirty = runtime.parser(parser).unwrap().dirty().unwrap();
    assert!(dirty.start <= 2);
    assert!(dirty.new_end >= 7);
}

#[test]
fn test_edit_offsets_are_characters_not_bytes() {
    let mut runtime = Runtime::init();
    let mut source = StringSource::new(r#"["é",1]"#);
    let parser = runtime.create_parser(Language::JSON).unwrap();
    runtime.feed(parser, &source).unwrap();

    // Char position 5 is the `1`, past the two-byte é
    apply_edit(&mut runtime, parser, &mut source, 5, 6, "22");
    feed_and_check(&mut runtime, parser, &source);
    assert_eq!(source.text(), r#"["é",22]"#);
}

// =============================================================================
// Splicing reuses untouched nodes
// =============================================================================

#[test]
fn test_splice_reuses_untouched_green_tokens() {
    let mut runtime = Runtime::init();
    let mut source = StringSource::new("[[1,2],[3,4]]");
    let parser = runtime.create_parser(Language::JSON).unwrap();
    let before = runtime.feed(parser, &source).unwrap();

    // Edit confined to the first inner array
    apply_edit(&mut runtime, parser, &mut source, 2, 3, "100");
    let after = runtime.feed(parser, &source).unwrap();

    let find_number = |tree: &SyntaxTree, text: &str| {
        tree.syntax()
            .descendants_with_tokens()
            .filter_map(|el| el.into_token())
            .find(|t| t.kind() == JsonKind::NUMBER.into() && t.text() == text)
            .unwrap()
    };

    let old_tree = runtime.tree(before).unwrap().clone();
    let new_tree = runtime.tree(after).unwrap().clone();

    // The second inner array was untouched: its tokens are the same green
    // data, shared by reference, not re-lexed copies
    let old_token = find_number(&old_tree, "3");
    let new_token = find_number(&new_tree, "3");
    assert!(std::ptr::eq(old_token.green(), new_token.green()));

    // The edited region was rebuilt
    assert_eq!(find_number(&new_tree, "100").text(), "100");
}

#[test]
fn test_feed_without_edits_reparses_fully() {
    // No recorded edits means the engine may not assume anything about the
    // buffer; a silently changed source must still produce the right tree
    let mut runtime = Runtime::init();
    let parser = runtime.create_parser(Language::JSON).unwrap();
    runtime.feed(parser, &StringSource::new("[1]")).unwrap();

    let replaced = StringSource::new(r#"{"entirely": "different"}"#);
    let tree_handle = runtime.feed(parser, &replaced).unwrap();
    let tree = runtime.tree(tree_handle).unwrap();
    assert!(tree.structurally_equal(&parse_text(replaced.text())));
}

#[test]
fn test_edits_recorded_before_first_parse() {
    // Dirty range with no previous tree: just a full parse
    let mut runtime = Runtime::init();
    let parser = runtime.create_parser(Language::JSON).unwrap();
    runtime.record_edit(parser, 0, 0, 3).unwrap();

    let source = StringSource::new("[1]");
    let tree_handle = runtime.feed(parser, &source).unwrap();
    assert!(runtime.tree(tree_handle).unwrap().ok());
    // Consumed on success
    assert!(runtime.parser(parser).unwrap().dirty().is_none());
}

#[test]
fn test_invalid_edit_is_rejected_before_commit() {
    let mut runtime = Runtime::init();
    let parser = runtime.create_parser(Language::JSON).unwrap();
    runtime.feed(parser, &StringSource::new("[1,2]")).unwrap();

    assert!(matches!(
        runtime.record_edit(parser, 5, 3, 6),
        Err(EngineError::InvalidEdit { .. })
    ));
    // Nothing was recorded
    assert!(runtime.parser(parser).unwrap().dirty().is_none());
}

// =============================================================================
// Host session: signaling and type assertions
// =============================================================================

/// Records everything the core pushes across the bridge.
#[derive(Default)]
struct MockBridge {
    signaled: Vec<EngineError>,
    wrong_types: Vec<String>,
}

impl HostBridge for MockBridge {
    type Value = String;

    fn assert_type(
        &mut self,
        value: &String,
        predicate: &dyn TypePredicate<String>,
    ) -> bool {
        if predicate.validate(value) {
            true
        } else {
            self.wrong_types
                .push(format!("{}: {}", predicate.expected(), value));
            false
        }
    }

    fn signal_error(&mut self, error: &EngineError) {
        self.signaled.push(error.clone());
    }
}

#[test]
fn test_session_signals_and_returns_immediately() {
    let mut runtime = Runtime::init();
    let mut bridge = MockBridge::default();
    let mut session = HostSession::new(&mut runtime, &mut bridge);

    assert!(session.create_parser(Language::new("cobol")).is_none());
    let parser = session.create_parser(Language::JSON).unwrap();
    let stale = parser;
    assert!(session.release(stale));
    assert!(session.feed(stale, &StringSource::new("[]")).is_none());

    assert_eq!(bridge.signaled.len(), 2);
    assert!(matches!(bridge.signaled[0], EngineError::UnknownLanguage { .. }));
    assert!(matches!(bridge.signaled[1], EngineError::InvalidHandle { .. }));
}

#[test]
fn test_session_type_assertion_gate() {
    let mut runtime = Runtime::init();
    let mut bridge = MockBridge::default();
    let mut session = HostSession::new(&mut runtime, &mut bridge);

    let symbolp = FnPredicate::new("symbolp", |v: &String| !v.contains(' '));
    assert!(session.assert_type(&"json".to_string(), &symbolp));
    assert!(!session.assert_type(&"not a symbol".to_string(), &symbolp));

    drop(session);
    assert_eq!(bridge.wrong_types, vec!["symbolp: not a symbol"]);
}
