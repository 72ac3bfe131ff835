//! Single-pass matching of an element event stream.

use std::sync::Arc;

use indexmap::IndexMap;

use super::condition::ConditionContext;
use super::element::Element;
use crate::automaton::{Automaton, ConditionId, Dfa, Label, Labels, StyleAutomaton};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::resolve::{collect_declarations, winning_declarations};
use crate::rules::Declaration;
use crate::selector::PseudoElement;

/// Context kept for one open element (or for the document itself).
#[derive(Debug, Clone)]
struct Frame<S> {
    language: String,
    position: usize,
    children: usize,
    live: Vec<S>,
    last_child: Option<Vec<S>>,
}

impl<S> Frame<S> {
    fn document(language: String) -> Self {
        Self {
            language,
            position: 0,
            children: 0,
            live: Vec::new(),
            last_child: None,
        }
    }
}

/// Walks element start/end events against a compiled style automaton.
///
/// One matcher serves one event stream. The automaton is shared and never
/// mutated; all per-document state lives in the matcher's element stack,
/// which holds, for every open element, its resolved language, its position
/// among its siblings, its live automaton states and the live states of the
/// child that closed last.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use folio_style::prelude::*;
///
/// let rules = vec![
///     StyleRule::for_element("p", Declaration::new("color", "red").at_position(0)),
///     StyleRule::new(
///         Selector::element("p").with_class("note"),
///         Declaration::new("color", "blue").at_position(1),
///     ),
/// ];
/// let config = EngineConfig::default();
/// let automaton = Arc::new(StyleAutomaton::compile(rules, &config));
///
/// let mut matcher = StreamMatcher::new(automaton, &config);
/// matcher.start_element(&Element::new("p").with_class("note"));
/// let values: Vec<_> = matcher
///     .declarations()?
///     .iter()
///     .map(|decl| decl.value.as_str())
///     .collect();
/// assert_eq!(values, ["red", "blue"]);
/// matcher.end_element()?;
/// # Ok::<(), folio_style::Error>(())
/// ```
pub struct StreamMatcher<A: Automaton = Dfa> {
    automaton: Arc<StyleAutomaton<A>>,
    trace: bool,
    default_language: String,
    document: Frame<A::State>,
    stack: Vec<Frame<A::State>>,
}

impl<A: Automaton> StreamMatcher<A> {
    /// Create a matcher positioned before the first element.
    pub fn new(automaton: Arc<StyleAutomaton<A>>, config: &EngineConfig) -> Self {
        Self {
            automaton,
            trace: config.trace,
            default_language: config.default_language.clone(),
            document: Frame::document(config.default_language.clone()),
            stack: Vec::new(),
        }
    }

    /// The automaton this matcher runs on.
    pub fn automaton(&self) -> &Arc<StyleAutomaton<A>> {
        &self.automaton
    }

    /// Consume an element start event.
    ///
    /// Computes the element's live state set from its parent's live states,
    /// from the automaton's initial states and, when a previous sibling has
    /// closed, from that sibling's live states stepped over `SIBLING`. All of
    /// them are stepped on the element's name labels; condition edges are
    /// then followed until no new state is reached.
    pub fn start_element(&mut self, element: &Element) {
        let machine = self.automaton.machine();
        let labels = self.automaton.labels();
        let parent = self.stack.last_mut().unwrap_or(&mut self.document);

        let position = parent.children;
        parent.children += 1;
        let language = match element.declared_language() {
            Some(language) => language.to_string(),
            None => parent.language.clone(),
        };

        let mut seeds = parent.live.clone();
        seeds.extend(machine.initial_states());
        if let Some(previous) = &parent.last_child {
            machine.step(previous, Label::Sibling, &mut seeds);
        }
        seeds.sort_unstable();
        seeds.dedup();

        let mut live = Vec::new();
        for symbol in labels.element_symbols(element.namespace.as_deref(), &element.local_name) {
            machine.step(&seeds, Label::Name(symbol), &mut live);
        }
        live.sort_unstable();
        live.dedup();

        let context = ConditionContext::new(element, position, &language);
        close_conditions(machine, labels, &context, &mut live);

        if self.trace {
            tracing::trace!(
                element = %element.local_name,
                depth = self.stack.len() + 1,
                position,
                language = %language,
                live = ?live,
                "element started"
            );
        }

        self.stack.push(Frame {
            language,
            position,
            children: 0,
            live,
            last_child: None,
        });
    }

    /// Consume an element end event.
    ///
    /// The closed element's live states become the "previous sibling" of the
    /// next element started under the same parent.
    pub fn end_element(&mut self) -> Result<()> {
        let frame = self.stack.pop().ok_or(Error::UnbalancedEnd)?;
        let parent = self.stack.last_mut().unwrap_or(&mut self.document);
        parent.last_child = Some(frame.live);
        Ok(())
    }

    /// Declarations for the current element, in cascade order.
    pub fn declarations(&self) -> Result<Vec<&Declaration>> {
        let frame = self.current("declarations")?;
        let automaton: &StyleAutomaton<A> = &self.automaton;
        Ok(collect_declarations(automaton, &frame.live, None))
    }

    /// Declarations for one pseudo-element of the current element, in
    /// cascade order.
    pub fn pseudo_declarations(&self, pseudo: PseudoElement) -> Result<Vec<&Declaration>> {
        let frame = self.current("pseudo_declarations")?;
        let automaton: &StyleAutomaton<A> = &self.automaton;
        Ok(collect_declarations(automaton, &frame.live, Some(pseudo)))
    }

    /// The winning declaration per property for the current element.
    pub fn computed(&self) -> Result<IndexMap<&str, &Declaration>> {
        Ok(winning_declarations(self.declarations()?))
    }

    /// Resolved language of the current element.
    pub fn language(&self) -> Result<&str> {
        Ok(&self.current("language")?.language)
    }

    /// Zero-based position of the current element among its siblings.
    pub fn position(&self) -> Result<usize> {
        Ok(self.current("position")?.position)
    }

    /// Live automaton states of the current element.
    pub fn live_states(&self) -> Result<&[A::State]> {
        Ok(&self.current("live_states")?.live)
    }

    /// Number of open elements.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Drop all element state so the matcher can walk another document.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.document = Frame::document(self.default_language.clone());
    }

    fn current(&self, operation: &'static str) -> Result<&Frame<A::State>> {
        self.stack
            .last()
            .ok_or_else(|| Error::no_open_element(operation))
    }
}

/// Follow condition edges out of `live` until no new state is reached.
///
/// Targets reached through one condition may carry further condition edges
/// (e.g. `p.a.b`), so newly added states are processed as well. Each
/// condition is evaluated at most once per element.
fn close_conditions<A: Automaton>(
    machine: &A,
    labels: &Labels,
    context: &ConditionContext<'_>,
    live: &mut Vec<A::State>,
) {
    if labels.condition_count() == 0 {
        return;
    }

    let mut results: Vec<Option<bool>> = vec![None; labels.condition_count()];
    let mut holds = |id: ConditionId| {
        *results[id.idx()].get_or_insert_with(|| context.matches(labels.condition(id)))
    };

    let mut pending = live.clone();
    let mut fired = Vec::new();
    while let Some(state) = pending.pop() {
        machine.fire_conditions(state, &mut holds, &mut fired);
        for target in fired.drain(..) {
            if !live.contains(&target) {
                live.push(target);
                pending.push(target);
            }
        }
    }
    live.sort_unstable();
}
