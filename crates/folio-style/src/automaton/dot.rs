//! Graphviz rendering of compiled automata, for tracing and debugging.

use std::fmt::{self, Write};

use super::compile::StyleAutomaton;
use super::dfa::Dfa;
use super::label::DeclarationId;
use super::nfa::{Event, Nfa};

impl StyleAutomaton<Nfa> {
    /// Emit a Graphviz DOT representation of the NFA.
    pub fn to_dot(&self) -> String {
        let mut buffer = String::new();
        // Writing into a String cannot fail
        let _ = self.write_dot(&mut buffer);
        buffer
    }

    /// Write a Graphviz DOT representation of the NFA.
    pub fn write_dot(&self, buffer: &mut impl Write) -> fmt::Result {
        let nfa = self.machine();
        writeln!(buffer, "digraph nfa {{")?;
        writeln!(buffer, "\trankdir=LR;")?;
        writeln!(buffer, "\t{} [shape=box];", nfa.start())?;
        writeln!(buffer, "\t{} [peripheries=2];", nfa.accept())?;

        for (id, state) in nfa.states() {
            self.write_accepts(buffer, id, &state.declarations, &state.pseudo_declarations)?;
            for (event, target) in &state.edges {
                let label = match event {
                    Event::Name(symbol) => escape(self.labels().name(*symbol)),
                    Event::Sibling => "SIBLING".to_string(),
                    Event::Condition(condition) => {
                        escape(&self.labels().condition(*condition).to_string())
                    }
                    Event::Epsilon => "ε".to_string(),
                };
                writeln!(buffer, "\t{} -> {} [label=\"{}\"];", id, target, label)?;
            }
        }
        writeln!(buffer, "}}")
    }
}

impl StyleAutomaton<Dfa> {
    /// Emit a Graphviz DOT representation of the DFA.
    pub fn to_dot(&self) -> String {
        let mut buffer = String::new();
        let _ = self.write_dot(&mut buffer);
        buffer
    }

    /// Write a Graphviz DOT representation of the DFA.
    pub fn write_dot(&self, buffer: &mut impl Write) -> fmt::Result {
        let dfa = self.machine();
        writeln!(buffer, "digraph dfa {{")?;
        writeln!(buffer, "\trankdir=LR;")?;
        writeln!(buffer, "\t{} [shape=box];", dfa.start())?;

        for (id, state) in dfa.states() {
            self.write_accepts(buffer, id, &state.declarations, &state.pseudo_declarations)?;

            // Sorted so that dumps of the same sheet are identical
            let mut transitions: Vec<_> = state.transitions.iter().collect();
            transitions.sort();
            for (label, target) in transitions {
                let label = escape(&self.labels().describe(*label));
                writeln!(buffer, "\t{} -> {} [label=\"{}\"];", id, target, label)?;
            }
            for (condition, target) in &state.conditions {
                let label = escape(&self.labels().condition(*condition).to_string());
                writeln!(
                    buffer,
                    "\t{} -> {} [label=\"{}\", style=dashed];",
                    id, target, label
                )?;
            }
        }
        writeln!(buffer, "}}")
    }
}

impl<A> StyleAutomaton<A> {
    fn write_accepts(
        &self,
        buffer: &mut impl Write,
        id: impl fmt::Display,
        declarations: &[DeclarationId],
        pseudo_declarations: &[DeclarationId],
    ) -> fmt::Result {
        for decl in declarations.iter().chain(pseudo_declarations) {
            let declaration = self.declaration(*decl);
            let text = match declaration.pseudo_element {
                Some(pseudo) => format!("::{} {}", pseudo, declaration),
                None => declaration.to_string(),
            };
            writeln!(buffer, "\t// [{}] {}", id, text)?;
        }
        Ok(())
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use crate::automaton::StyleAutomaton;
    use crate::config::EngineConfig;
    use crate::rules::{Declaration, StyleRule};
    use crate::selector::Selector;

    fn rules() -> Vec<StyleRule> {
        vec![
            StyleRule::new(
                Selector::element("div").child(Selector::element("p").with_class("note")),
                Declaration::new("color", "blue"),
            ),
            StyleRule::new(
                Selector::element("h1").adjacent(Selector::element("p")),
                Declaration::new("margin-top", "0"),
            ),
        ]
    }

    #[test]
    fn nfa_dot_lists_all_event_kinds() {
        let compiled = StyleAutomaton::compile_nfa(rules(), &EngineConfig::default());
        let dot = compiled.to_dot();

        assert!(dot.starts_with("digraph nfa {"));
        assert!(dot.contains("[label=\"*|div\"]"));
        assert!(dot.contains("[label=\".note\"]"));
        assert!(dot.contains("[label=\"SIBLING\"]"));
        assert!(dot.contains("[label=\"ε\"]"));
        assert!(dot.contains("// ["));
        assert!(dot.contains("color: blue"));
    }

    #[test]
    fn dfa_dot_is_deterministic() {
        let first = StyleAutomaton::compile(rules(), &EngineConfig::default()).to_dot();
        let second = StyleAutomaton::compile(rules(), &EngineConfig::default()).to_dot();

        assert!(first.starts_with("digraph dfa {"));
        assert!(first.contains("style=dashed"));
        assert_eq!(first, second);
    }
}
