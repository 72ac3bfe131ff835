//! Selector automata: Thompson NFA, subset-construction DFA and the compiled
//! style automaton the stream matcher runs on.
//!
//! # Pipeline
//!
//! ```text
//! StyleRule*  ──NfaBuilder──>  Nfa  ──Dfa::from_nfa──>  Dfa
//! ```
//!
//! Both automata implement [`Automaton`], so the stream matcher can run on
//! either. Matching normally uses the DFA; the NFA is kept available for
//! diagnostics and for checking that determinization preserved reachability.

mod compile;
mod dfa;
mod dot;
mod label;
mod nfa;

pub use compile::StyleAutomaton;
pub use dfa::{Dfa, DfaState};
pub use label::{
    ConditionId, DeclarationId, DfaStateId, Label, Labels, NfaStateId, Symbol, WILDCARD,
    element_labels, name_label,
};
pub use nfa::{Event, Nfa, NfaBuilder, NfaState};

use std::fmt;

/// Operations the stream matcher needs from a selector automaton.
pub trait Automaton {
    /// A state the matcher can hold in a live set.
    type State: Copy + Eq + Ord + fmt::Debug;

    /// States live before any element has been consumed.
    fn initial_states(&self) -> Vec<Self::State>;

    /// Consume `label` from every state in `from`, appending the targets.
    fn step(&self, from: &[Self::State], label: Label, into: &mut Vec<Self::State>);

    /// Follow every guarded edge out of `state` whose condition holds.
    fn fire_conditions(
        &self,
        state: Self::State,
        holds: &mut dyn FnMut(ConditionId) -> bool,
        into: &mut Vec<Self::State>,
    );

    /// Declarations accepted in `state` for the element itself.
    fn declarations(&self, state: Self::State) -> &[DeclarationId];

    /// Declarations accepted in `state` for pseudo-elements.
    fn pseudo_declarations(&self, state: Self::State) -> &[DeclarationId];
}

impl Automaton for Dfa {
    type State = DfaStateId;

    fn initial_states(&self) -> Vec<DfaStateId> {
        vec![self.start()]
    }

    fn step(&self, from: &[DfaStateId], label: Label, into: &mut Vec<DfaStateId>) {
        into.extend(from.iter().filter_map(|state| Dfa::step(self, *state, label)));
    }

    fn fire_conditions(
        &self,
        state: DfaStateId,
        holds: &mut dyn FnMut(ConditionId) -> bool,
        into: &mut Vec<DfaStateId>,
    ) {
        for (condition, target) in &self[state].conditions {
            if holds(*condition) {
                into.push(*target);
            }
        }
    }

    fn declarations(&self, state: DfaStateId) -> &[DeclarationId] {
        &self[state].declarations
    }

    fn pseudo_declarations(&self, state: DfaStateId) -> &[DeclarationId] {
        &self[state].pseudo_declarations
    }
}

impl Automaton for Nfa {
    type State = NfaStateId;

    fn initial_states(&self) -> Vec<NfaStateId> {
        self.epsilon_closure([self.start()])
    }

    fn step(&self, from: &[NfaStateId], label: Label, into: &mut Vec<NfaStateId>) {
        into.extend(Nfa::step(self, from, label));
    }

    fn fire_conditions(
        &self,
        state: NfaStateId,
        holds: &mut dyn FnMut(ConditionId) -> bool,
        into: &mut Vec<NfaStateId>,
    ) {
        for (event, target) in &self[state].edges {
            if let Event::Condition(condition) = event {
                if holds(*condition) {
                    into.extend(self.epsilon_closure([*target]));
                }
            }
        }
    }

    fn declarations(&self, state: NfaStateId) -> &[DeclarationId] {
        &self[state].declarations
    }

    fn pseudo_declarations(&self, state: NfaStateId) -> &[DeclarationId] {
        &self[state].pseudo_declarations
    }
}
