//! Single style rule definition.

use crate::rules::Declaration;
use crate::selector::{Selector, Specificity};

/// A style rule pairing one selector with one atomic declaration.
///
/// Each rule has:
/// - A selector that determines which elements it applies to
/// - A declaration whose specificity is pre-computed from the selector
/// - The pseudo-element the selector targets, copied onto the declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleRule {
    /// The selector for matching elements.
    pub selector: Selector,
    /// The declaration to apply.
    pub declaration: Declaration,
}

impl StyleRule {
    /// Create a new style rule.
    ///
    /// The declaration's specificity is taken from the selector, and so is
    /// its pseudo-element unless the declaration already names one.
    pub fn new(selector: Selector, mut declaration: Declaration) -> Self {
        declaration.specificity = Specificity::of_selector(&selector);
        if declaration.pseudo_element.is_none() {
            declaration.pseudo_element = selector.pseudo_element();
        }
        Self {
            selector,
            declaration,
        }
    }

    /// Create a rule with a type selector.
    pub fn for_element(local_name: impl Into<String>, declaration: Declaration) -> Self {
        Self::new(Selector::element(local_name), declaration)
    }

    /// Create a rule with a class selector.
    pub fn for_class(class: impl Into<String>, declaration: Declaration) -> Self {
        Self::new(Selector::class(class), declaration)
    }

    /// Create a rule with an ID selector.
    pub fn for_id(id: impl Into<String>, declaration: Declaration) -> Self {
        Self::new(Selector::id(id), declaration)
    }

    /// Get the specificity of this rule.
    pub fn specificity(&self) -> Specificity {
        self.declaration.specificity
    }

    /// Whether the declaration targets a pseudo-element.
    pub fn is_pseudo(&self) -> bool {
        self.declaration.pseudo_element.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::PseudoElement;

    #[test]
    fn rule_creation() {
        let rule = StyleRule::for_element("p", Declaration::new("color", "red"));

        assert_eq!(rule.specificity(), Specificity(0, 0, 1));
        assert!(!rule.is_pseudo());
    }

    #[test]
    fn rule_specificity_comparison() {
        let decl = Declaration::new("color", "red");

        let type_rule = StyleRule::for_element("p", decl.clone());
        let class_rule = StyleRule::for_class("note", decl.clone());
        let id_rule = StyleRule::for_id("intro", decl);

        assert!(id_rule.specificity() > class_rule.specificity());
        assert!(class_rule.specificity() > type_rule.specificity());
    }

    #[test]
    fn pseudo_element_taken_from_selector() {
        let selector = Selector::element("p").pseudo(PseudoElement::Before);
        let rule = StyleRule::new(selector, Declaration::new("content", "\"*\""));

        assert!(rule.is_pseudo());
        assert_eq!(rule.declaration.pseudo_element, Some(PseudoElement::Before));
        assert_eq!(rule.specificity(), Specificity(0, 0, 2));
    }
}
