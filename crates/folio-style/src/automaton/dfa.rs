//! Subset construction of the selector DFA.

use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

use indexmap::IndexSet;

use super::label::{ConditionId, DeclarationId, DfaStateId, Label, NfaStateId};
use super::nfa::{Event, Nfa};

/// A single DFA state.
///
/// Declaration lists are the union of the lists of every NFA state in the
/// subset this state stands for.
#[derive(Debug, Clone)]
pub struct DfaState {
    /// Transitions on element-name labels and the sibling sentinel.
    pub transitions: HashMap<Label, DfaStateId>,
    /// Guarded transitions, tried independently, sorted by condition.
    pub conditions: Vec<(ConditionId, DfaStateId)>,
    /// Declarations for the element itself.
    pub declarations: Vec<DeclarationId>,
    /// Declarations for pseudo-elements.
    pub pseudo_declarations: Vec<DeclarationId>,
    /// The NFA states this state subsumes, sorted.
    pub subset: Box<[NfaStateId]>,
}

/// A deterministic selector automaton. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dfa {
    states: Vec<DfaState>,
    start: DfaStateId,
}

impl Dfa {
    /// Determinize an NFA.
    ///
    /// Outgoing edges of each subset are grouped by label (names and the
    /// sibling sentinel) or by condition; the epsilon closure of each group's
    /// targets becomes a state, unified with any earlier subset holding the
    /// same NFA states.
    pub fn from_nfa(nfa: &Nfa) -> Self {
        let mut subsets: IndexSet<Box<[NfaStateId]>> = IndexSet::new();
        let mut states = Vec::new();

        subsets.insert(nfa.epsilon_closure([nfa.start()]).into_boxed_slice());

        let mut next = 0;
        while next < subsets.len() {
            let subset = subsets[next].clone();
            next += 1;

            let mut by_label: BTreeMap<Label, Vec<NfaStateId>> = BTreeMap::new();
            let mut by_condition: BTreeMap<ConditionId, Vec<NfaStateId>> = BTreeMap::new();
            let mut declarations = Vec::new();
            let mut pseudo_declarations = Vec::new();

            for id in subset.iter() {
                let state = &nfa[*id];
                declarations.extend_from_slice(&state.declarations);
                pseudo_declarations.extend_from_slice(&state.pseudo_declarations);

                for (event, target) in &state.edges {
                    match event {
                        Event::Name(symbol) => {
                            by_label.entry(Label::Name(*symbol)).or_default().push(*target)
                        }
                        Event::Sibling => by_label.entry(Label::Sibling).or_default().push(*target),
                        Event::Condition(condition) => {
                            by_condition.entry(*condition).or_default().push(*target)
                        }
                        Event::Epsilon => {}
                    }
                }
            }

            let mut intern = |targets: Vec<NfaStateId>| {
                let closure = nfa.epsilon_closure(targets).into_boxed_slice();
                let (idx, _) = subsets.insert_full(closure);
                DfaStateId::new(idx)
            };

            let transitions: HashMap<_, _> = by_label
                .into_iter()
                .map(|(label, targets)| (label, intern(targets)))
                .collect();
            let conditions: Vec<_> = by_condition
                .into_iter()
                .map(|(condition, targets)| (condition, intern(targets)))
                .collect();

            declarations.sort_unstable();
            declarations.dedup();
            pseudo_declarations.sort_unstable();
            pseudo_declarations.dedup();

            states.push(DfaState {
                transitions,
                conditions,
                declarations,
                pseudo_declarations,
                subset,
            });
        }

        Self {
            states,
            start: DfaStateId::new(0),
        }
    }

    /// The start state.
    pub fn start(&self) -> DfaStateId {
        self.start
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the automaton has no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate over states with their ids.
    pub fn states(&self) -> impl Iterator<Item = (DfaStateId, &DfaState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(idx, state)| (DfaStateId::new(idx), state))
    }

    /// Follow the transition on `label`, if any.
    pub fn step(&self, from: DfaStateId, label: Label) -> Option<DfaStateId> {
        self[from].transitions.get(&label).copied()
    }
}

impl Index<DfaStateId> for Dfa {
    type Output = DfaState;

    #[inline]
    fn index(&self, id: DfaStateId) -> &DfaState {
        &self.states[id.idx()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::label::Labels;
    use crate::automaton::nfa::NfaBuilder;
    use crate::selector::Selector;

    fn determinize(selectors: &[Selector]) -> (Dfa, Labels) {
        let mut labels = Labels::new();
        let mut builder = NfaBuilder::new(&mut labels);
        for (idx, selector) in selectors.iter().enumerate() {
            builder.add_rule(selector, DeclarationId::new(idx), false);
        }
        let nfa = builder.build();
        (Dfa::from_nfa(&nfa), labels)
    }

    #[test]
    fn shared_prefix_merges_states() {
        let (dfa, labels) = determinize(&[
            Selector::element("p"),
            Selector::element("p").with_class("note"),
        ]);
        let p = Label::Name(labels.symbol("*|p").unwrap());

        let after_p = dfa.step(dfa.start(), p).unwrap();
        // Both fragments moved on `p`: one accepts, one waits on its condition
        assert_eq!(dfa[after_p].declarations, vec![DeclarationId::new(0)]);
        assert_eq!(dfa[after_p].conditions.len(), 1);

        let (_, guarded) = dfa[after_p].conditions[0];
        assert_eq!(dfa[guarded].declarations, vec![DeclarationId::new(1)]);
    }

    #[test]
    fn equal_subsets_unify() {
        let (dfa, labels) = determinize(&[Selector::element("div").descendant(Selector::element("p"))]);
        let div = Label::Name(labels.symbol("*|div").unwrap());
        let any = Label::Name(labels.symbol("*|*").unwrap());

        let inside = dfa.step(dfa.start(), div).unwrap();
        let deeper = dfa.step(inside, any).unwrap();
        // Going one level further lands on the same subset again
        assert_eq!(dfa.step(deeper, any), Some(deeper));
    }

    #[test]
    fn declarations_are_unioned() {
        let (dfa, labels) = determinize(&[
            Selector::element("p"),
            Selector::universal(),
            Selector::element("div").child(Selector::element("p")),
        ]);
        let div = Label::Name(labels.symbol("*|div").unwrap());
        let p = Label::Name(labels.symbol("*|p").unwrap());
        let any = Label::Name(labels.symbol("*|*").unwrap());

        let in_div = dfa.step(dfa.start(), div).unwrap();
        let p_in_div = dfa.step(in_div, p).unwrap();
        assert_eq!(dfa[p_in_div].declarations, vec![DeclarationId::new(2)]);

        let top_any = dfa.step(dfa.start(), any).unwrap();
        assert_eq!(dfa[top_any].declarations, vec![DeclarationId::new(1)]);
    }

    #[test]
    fn empty_nfa_gives_single_state() {
        let (dfa, _) = determinize(&[]);
        assert_eq!(dfa.len(), 1);
        assert!(dfa[dfa.start()].transitions.is_empty());
    }
}
