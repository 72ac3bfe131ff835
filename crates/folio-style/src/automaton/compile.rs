//! Compilation of style rules into a shareable automaton.

use super::dfa::Dfa;
use super::label::{DeclarationId, Labels};
use super::nfa::{Nfa, NfaBuilder};
use crate::config::EngineConfig;
use crate::rules::{Declaration, StyleRule};

/// A compiled set of style rules.
///
/// Holds the automaton together with the label tables and declarations its
/// states refer to. Built once per style-sheet compilation and immutable
/// afterwards, so one instance can back any number of matchers via `Arc`.
#[derive(Debug, Clone)]
pub struct StyleAutomaton<A = Dfa> {
    labels: Labels,
    declarations: Vec<Declaration>,
    machine: A,
    skipped: usize,
}

impl StyleAutomaton<Dfa> {
    /// Compile rules into a deterministic automaton.
    pub fn compile(rules: impl IntoIterator<Item = StyleRule>, config: &EngineConfig) -> Self {
        let nfa = StyleAutomaton::<Nfa>::compile_nfa(rules, config);
        let dfa = Dfa::from_nfa(&nfa.machine);

        tracing::debug!(
            rules = nfa.declarations.len(),
            skipped = nfa.skipped,
            nfa_states = nfa.machine.len(),
            dfa_states = dfa.len(),
            "compiled style automaton"
        );

        let compiled = Self {
            labels: nfa.labels,
            declarations: nfa.declarations,
            machine: dfa,
            skipped: nfa.skipped,
        };
        if config.trace {
            tracing::trace!("selector DFA:\n{}", compiled.to_dot());
        }
        compiled
    }
}

impl StyleAutomaton<Nfa> {
    /// Compile rules into the non-deterministic automaton only.
    pub fn compile_nfa(rules: impl IntoIterator<Item = StyleRule>, config: &EngineConfig) -> Self {
        let mut labels = Labels::new();
        let mut declarations = Vec::new();
        let mut skipped = 0;

        let mut builder = NfaBuilder::new(&mut labels);
        for rule in rules {
            let id = DeclarationId::new(declarations.len());
            let pseudo = rule.declaration.pseudo_element.is_some();
            if builder.add_rule(&rule.selector, id, pseudo) {
                declarations.push(rule.declaration);
            } else {
                tracing::debug!("Skipping unsupported selector: {}", rule.selector);
                skipped += 1;
            }
        }
        let nfa = builder.build();

        let compiled = Self {
            labels,
            declarations,
            machine: nfa,
            skipped,
        };
        if config.trace {
            tracing::trace!("selector NFA:\n{}", compiled.to_dot());
        }
        compiled
    }
}

impl<A> StyleAutomaton<A> {
    /// Interned labels and conditions.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// The underlying automaton.
    pub fn machine(&self) -> &A {
        &self.machine
    }

    /// All compiled declarations, indexed by [`DeclarationId`].
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Look up one declaration.
    pub fn declaration(&self, id: DeclarationId) -> &Declaration {
        &self.declarations[id.idx()]
    }

    /// Number of rules that made it into the automaton.
    pub fn rule_count(&self) -> usize {
        self.declarations.len()
    }

    /// Number of rules left out because their selector is unsupported.
    pub fn skipped_rules(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{PseudoElement, Selector};

    fn rules() -> Vec<StyleRule> {
        vec![
            StyleRule::for_element("p", Declaration::new("color", "red")),
            StyleRule::new(Selector::unsupported("p ~ p"), Declaration::new("color", "green")),
            StyleRule::new(
                Selector::element("p").pseudo(PseudoElement::After),
                Declaration::new("content", "\".\""),
            ),
        ]
    }

    #[test]
    fn unsupported_rules_are_counted_and_dropped() {
        let compiled = StyleAutomaton::compile(rules(), &EngineConfig::default());
        assert_eq!(compiled.rule_count(), 2);
        assert_eq!(compiled.skipped_rules(), 1);
        assert_eq!(compiled.declaration(DeclarationId::new(1)).property, "content");
    }

    #[test]
    fn pseudo_declarations_land_in_pseudo_lists() {
        let compiled = StyleAutomaton::compile_nfa(rules(), &EngineConfig::default());
        let nfa = compiled.machine();
        let pseudo: Vec<_> = nfa
            .states()
            .flat_map(|(_, state)| state.pseudo_declarations.iter().copied())
            .collect();
        assert_eq!(pseudo, vec![DeclarationId::new(1)]);
    }

    #[test]
    fn empty_rule_set_compiles() {
        let compiled = StyleAutomaton::compile(Vec::new(), &EngineConfig::default());
        assert_eq!(compiled.rule_count(), 0);
        assert_eq!(compiled.machine().len(), 1);
    }
}
