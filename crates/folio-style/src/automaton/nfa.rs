//! Thompson construction of the selector NFA.
//!
//! Every selector compiles to a fragment with one start and one end state.
//! Fragments are built by structural induction over [`Selector`]:
//!
//! ```text
//! element test   s ──ns|name──> e
//! conditional    [inner] ──condition──> e
//! A > B          [A] ──ε──> [B]
//! A B            [A] ──ε──> [*|*]* ──ε──> [B]
//! A + B          [A] ──ε──> ○ ──SIBLING──> ○ ──ε──> [B]
//! ```
//!
//! All fragments hang off one shared start state and feed one shared accept
//! state. The declarations of a rule are attached to the end state of its
//! selector's fragment; rules with equal selectors share that fragment.

use std::collections::HashMap;
use std::ops::Index;

use super::label::{ConditionId, DeclarationId, Label, Labels, NfaStateId, Symbol, WILDCARD, name_label};
use crate::selector::Selector;

/// Event on an NFA edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Consume an element with this name label.
    Name(Symbol),
    /// Move to the next sibling.
    Sibling,
    /// Guard evaluated against the current element.
    Condition(ConditionId),
    /// Follow without consuming anything.
    Epsilon,
}

impl Event {
    /// The consuming label of this event, if it is one.
    pub fn label(&self) -> Option<Label> {
        match self {
            Event::Name(symbol) => Some(Label::Name(*symbol)),
            Event::Sibling => Some(Label::Sibling),
            Event::Condition(_) | Event::Epsilon => None,
        }
    }
}

/// A single NFA state.
#[derive(Debug, Clone, Default)]
pub struct NfaState {
    /// Outgoing edges.
    pub edges: Vec<(Event, NfaStateId)>,
    /// Declarations accepted here for the element itself.
    pub declarations: Vec<DeclarationId>,
    /// Declarations accepted here for a pseudo-element.
    pub pseudo_declarations: Vec<DeclarationId>,
}

/// A compiled selector NFA.
///
/// States live in one flat table; edges refer to targets by ordinal.
#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<NfaState>,
    start: NfaStateId,
    accept: NfaStateId,
}

impl Nfa {
    /// The shared start state.
    pub fn start(&self) -> NfaStateId {
        self.start
    }

    /// The shared accept state.
    pub fn accept(&self) -> NfaStateId {
        self.accept
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
    pub fn states(&self) -> impl Iterator<Item = (NfaStateId, &NfaState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(idx, state)| (NfaStateId::new(idx), state))
    }

    /// Epsilon closure of a set of states, sorted and deduplicated.
    pub fn epsilon_closure(&self, seeds: impl IntoIterator<Item = NfaStateId>) -> Vec<NfaStateId> {
        let mut visited = vec![false; self.states.len()];
        let mut stack: Vec<NfaStateId> = seeds.into_iter().collect();
        let mut closure = Vec::new();

        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut visited[id.idx()], true) {
                continue;
            }
            closure.push(id);
            for (event, target) in &self[id].edges {
                if *event == Event::Epsilon && !visited[target.idx()] {
                    stack.push(*target);
                }
            }
        }

        closure.sort_unstable();
        closure
    }

    /// Targets of all edges out of `from` consuming `label`, epsilon-closed.
    pub fn step(&self, from: &[NfaStateId], label: Label) -> Vec<NfaStateId> {
        let targets = from.iter().flat_map(|id| {
            self[*id]
                .edges
                .iter()
                .filter(move |(event, _)| event.label() == Some(label))
                .map(|(_, target)| *target)
        });
        self.epsilon_closure(targets.collect::<Vec<_>>())
    }
}

impl Index<NfaStateId> for Nfa {
    type Output = NfaState;

    #[inline]
    fn index(&self, id: NfaStateId) -> &NfaState {
        &self.states[id.idx()]
    }
}

/// A partially-built fragment: entry and exit state.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: NfaStateId,
    end: NfaStateId,
}

impl Fragment {
    fn new(start: NfaStateId, end: NfaStateId) -> Self {
        Self { start, end }
    }
}

/// Incremental NFA construction, one rule at a time.
#[derive(Debug)]
pub struct NfaBuilder<'a> {
    labels: &'a mut Labels,
    states: Vec<NfaState>,
    start: NfaStateId,
    accept: NfaStateId,
    /// End state of each selector compiled so far.
    selector_ends: HashMap<Selector, NfaStateId>,
}

impl<'a> NfaBuilder<'a> {
    /// Create a builder with the shared start and accept states.
    pub fn new(labels: &'a mut Labels) -> Self {
        let mut builder = Self {
            labels,
            states: Vec::new(),
            start: NfaStateId::new(0),
            accept: NfaStateId::new(0),
            selector_ends: HashMap::new(),
        };
        builder.start = builder.add_state();
        builder.accept = builder.add_state();
        builder
    }

    /// Add a rule: attach `declaration` to the accept state of `selector`.
    ///
    /// Returns `false` when the selector cannot be compiled; the rule is then
    /// left out of the automaton and can never match.
    pub fn add_rule(&mut self, selector: &Selector, declaration: DeclarationId, pseudo: bool) -> bool {
        let end = match self.selector_ends.get(selector) {
            Some(end) => *end,
            None => {
                if !selector.is_supported() {
                    return false;
                }
                let Some(fragment) = self.fragment(selector) else {
                    return false;
                };
                self.epsilon(self.start, fragment.start);
                self.epsilon(fragment.end, self.accept);
                self.selector_ends.insert(selector.clone(), fragment.end);
                fragment.end
            }
        };

        let state = &mut self.states[end.idx()];
        if pseudo {
            state.pseudo_declarations.push(declaration);
        } else {
            state.declarations.push(declaration);
        }
        true
    }

    /// Finish construction.
    pub fn build(self) -> Nfa {
        Nfa {
            states: self.states,
            start: self.start,
            accept: self.accept,
        }
    }

    fn add_state(&mut self) -> NfaStateId {
        let id = NfaStateId::new(self.states.len());
        self.states.push(NfaState::default());
        id
    }

    fn edge(&mut self, from: NfaStateId, event: Event, to: NfaStateId) {
        self.states[from.idx()].edges.push((event, to));
    }

    fn epsilon(&mut self, from: NfaStateId, to: NfaStateId) {
        self.edge(from, Event::Epsilon, to);
    }

    /// Two states joined by one edge.
    fn single(&mut self, event: Event) -> Fragment {
        let start = self.add_state();
        let end = self.add_state();
        self.edge(start, event, end);
        Fragment::new(start, end)
    }

    fn name_fragment(&mut self, namespace: Option<&str>, local_name: Option<&str>) -> Fragment {
        let symbol = self.labels.intern_name(name_label(namespace, local_name));
        self.single(Event::Name(symbol))
    }

    /// `left` followed by `right` through an epsilon edge.
    fn concat(&mut self, left: Fragment, right: Fragment) -> Fragment {
        self.epsilon(left.end, right.start);
        Fragment::new(left.start, right.end)
    }

    /// Zero or more elements of any name.
    fn any_depth(&mut self) -> Fragment {
        let start = self.add_state();
        let direct = self.add_state();
        let join = self.add_state();
        let end = self.add_state();
        let any = self.labels.intern_name(WILDCARD.to_string());

        self.epsilon(start, direct);
        self.epsilon(start, end);
        self.edge(direct, Event::Name(any), join);
        self.epsilon(join, start);
        Fragment::new(start, end)
    }

    fn fragment(&mut self, selector: &Selector) -> Option<Fragment> {
        match selector {
            Selector::Element(test) => {
                Some(self.name_fragment(test.namespace.as_deref(), test.local_name.as_deref()))
            }
            Selector::Conditional(inner, condition) => {
                let inner = self.fragment(inner)?;
                let id = self.labels.intern_condition(condition.clone());
                let end = self.add_state();
                self.edge(inner.end, Event::Condition(id), end);
                Some(Fragment::new(inner.start, end))
            }
            // A pseudo-element is never traversed: the chain ends at its owner
            Selector::Child(left, right)
            | Selector::Descendant(left, right)
            | Selector::AdjacentSibling(left, right)
                if matches!(**right, Selector::PseudoElement(_)) =>
            {
                self.fragment(left)
            }
            Selector::Child(left, right) => {
                let left = self.fragment(left)?;
                let right = self.fragment(right)?;
                Some(self.concat(left, right))
            }
            Selector::Descendant(left, right) => {
                let left = self.fragment(left)?;
                let between = self.any_depth();
                let right = self.fragment(right)?;
                let head = self.concat(left, between);
                Some(self.concat(head, right))
            }
            Selector::AdjacentSibling(left, right) => {
                let left = self.fragment(left)?;
                let sibling = self.single(Event::Sibling);
                let right = self.fragment(right)?;
                let head = self.concat(left, sibling);
                Some(self.concat(head, right))
            }
            Selector::PseudoElement(_) => Some(self.name_fragment(None, None)),
            Selector::Unsupported(_) => None,
        }
    }
}
