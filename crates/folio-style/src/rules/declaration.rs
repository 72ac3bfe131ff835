//! Atomic property declarations.

use std::fmt;

use crate::selector::{PseudoElement, Specificity};

/// One atomic `property: value` pair, already split from any shorthand.
///
/// Specificity and position are stamped when the declaration is added to a
/// style sheet and compiled; together with `important` they fully determine
/// its place in the cascade.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// Property name (e.g. `color`).
    pub property: String,
    /// Property value, never a shorthand.
    pub value: String,
    /// `!important` flag.
    pub important: bool,
    /// Specificity of the selector this declaration came with.
    pub specificity: Specificity,
    /// Source position; strictly increasing within one compilation.
    pub position: i64,
    /// Pseudo-element the declaration applies to, `None` for the element.
    pub pseudo_element: Option<PseudoElement>,
}

impl Declaration {
    /// Create a normal declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
            specificity: Specificity::ZERO,
            position: 0,
            pseudo_element: None,
        }
    }

    /// Mark as `!important`.
    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    /// Set the specificity.
    pub fn with_specificity(mut self, specificity: Specificity) -> Self {
        self.specificity = specificity;
        self
    }

    /// Set the source position.
    pub fn at_position(mut self, position: i64) -> Self {
        self.position = position;
        self
    }

    /// Attach to a pseudo-element.
    pub fn for_pseudo(mut self, pseudo: PseudoElement) -> Self {
        self.pseudo_element = Some(pseudo);
        self
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            write!(f, " !important")?;
        }
        Ok(())
    }
}
