//! Tests for automaton tracing and DOT dumps.

use std::sync::Arc;

use folio_style::prelude::*;
use tracing::Level;

fn rules() -> Vec<StyleRule> {
    let mut sheet = StyleSheet::author();
    sheet.add_rule(Selector::element("p"), Declaration::new("color", "red"));
    sheet.add_rule(
        Selector::element("div").descendant(Selector::element("p").with_class("note")),
        Declaration::new("color", "blue"),
    );
    sheet.add_rule(
        Selector::element("h1").adjacent(Selector::element("p")),
        Declaration::new("margin-top", "0"),
    );
    sheet.iter().cloned().collect()
}

#[test]
fn test_trace_run_matches_untraced_run() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_test_writer()
        .finish();

    let traced = EngineConfig::new().with_trace(true);
    let plain = EngineConfig::new();

    let outcome = |config: &EngineConfig| {
        let automaton = Arc::new(StyleAutomaton::compile(rules(), config));
        let mut matcher = StreamMatcher::new(automaton, config);
        matcher.start_element(&Element::new("div"));
        matcher.start_element(&Element::new("h1"));
        matcher.end_element().unwrap();
        matcher.start_element(&Element::new("p").with_class("note"));
        matcher
            .declarations()
            .unwrap()
            .iter()
            .map(|decl| decl.to_string())
            .collect::<Vec<_>>()
    };

    let with_trace = tracing::subscriber::with_default(subscriber, || outcome(&traced));
    let without = outcome(&plain);

    assert_eq!(with_trace, without);
    assert_eq!(with_trace, ["color: red", "color: blue", "margin-top: 0"]);
}

#[test]
fn test_dot_dumps() {
    let config = EngineConfig::default();
    let nfa = StyleAutomaton::<Nfa>::compile_nfa(rules(), &config);
    let dfa = StyleAutomaton::compile(rules(), &config);

    let nfa_dot = nfa.to_dot();
    let dfa_dot = dfa.to_dot();

    assert!(nfa_dot.starts_with("digraph nfa {"));
    assert!(dfa_dot.starts_with("digraph dfa {"));
    assert!(nfa_dot.contains("SIBLING"));
    assert!(dfa_dot.contains("SIBLING"));
    assert!(dfa_dot.contains("margin-top: 0"));
}
