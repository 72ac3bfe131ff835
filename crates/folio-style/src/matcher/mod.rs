//! Stream matching of element events against a compiled style automaton.

mod condition;
mod element;
mod stream;

pub use condition::ConditionContext;
pub use element::{Attribute, AttributeType, Element, XML_NAMESPACE};
pub use stream::StreamMatcher;
