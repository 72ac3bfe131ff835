//! Selector automaton and cascade resolver for Folio document styling.
//!
//! This crate decides which style declarations apply to every element of a
//! document that is read as a stream of start/end events, featuring:
//!
//! - **Selectors**: CSS2 element, attribute, class, ID, `:lang`,
//!   `:first-child` and pseudo-class tests, joined by the child, descendant
//!   and adjacent-sibling combinators
//! - **Automata**: rules are compiled into a Thompson NFA and determinized
//!   into a DFA, so matching costs one table walk per element
//! - **Streaming**: elements are matched as they start, with no document tree
//! - **Cascading**: matched declarations come out ordered by importance,
//!   specificity and source position, for the element and its
//!   `::before`/`::after`/`::first-line`/`::first-letter` pseudo-elements
//!
//! # Example
//!
//! ```
//! use folio_style::prelude::*;
//!
//! let mut sheet = StyleSheet::author();
//! sheet.add_rule(Selector::element("p"), Declaration::new("color", "red"));
//! sheet.add_rule(
//!     Selector::element("div").child(Selector::element("p")),
//!     Declaration::new("color", "blue"),
//! );
//!
//! let mut engine = StyleEngine::default();
//! engine.add_stylesheet(sheet);
//!
//! let mut matcher = engine.matcher();
//! matcher.start_element(&Element::new("div"));
//! matcher.start_element(&Element::new("p"));
//! assert_eq!(matcher.computed()?["color"].value, "blue");
//! matcher.end_element()?;
//! matcher.end_element()?;
//! # Ok::<(), folio_style::Error>(())
//! ```

pub mod automaton;
pub mod config;
pub mod matcher;
pub mod resolve;
pub mod rules;
pub mod selector;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::automaton::{Automaton, Dfa, Nfa, StyleAutomaton};
    pub use crate::config::EngineConfig;
    pub use crate::matcher::{Attribute, AttributeType, Element, StreamMatcher};
    pub use crate::resolve::{StyleEngine, winning_declarations};
    pub use crate::rules::{Declaration, Origin, StyleRule, StyleSheet};
    pub use crate::selector::{
        AttributeName, Condition, ElementTest, PseudoElement, Selector, Specificity,
    };
}
