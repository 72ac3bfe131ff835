//! Selector model: structural selectors, conditions and specificity.

mod condition;
mod specificity;
mod types;

pub use condition::{AttributeName, Condition};
pub use specificity::Specificity;
pub use types::*;
