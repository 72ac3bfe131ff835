//! CSS specificity calculation.

use super::{Condition, Selector};

/// CSS specificity as (a, b, c) tuple.
///
/// - a: ID conditions
/// - b: Class, attribute, language, positional and pseudo-class conditions
/// - c: Type selectors, pseudo-elements
///
/// Compared lexicographically: (1,0,0) > (0,99,99)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Zero specificity (universal selector).
    pub const ZERO: Self = Self(0, 0, 0);

    /// Calculate specificity of a selector.
    pub fn of_selector(selector: &Selector) -> Self {
        let mut a = 0u32;
        let mut b = 0u32;
        let mut c = 0u32;
        Self::add_selector(selector, &mut a, &mut b, &mut c);
        Self(a, b, c)
    }

    /// Calculate specificity of a single condition.
    pub fn of_condition(condition: &Condition) -> Self {
        let mut a = 0u32;
        let mut b = 0u32;
        let mut c = 0u32;
        Self::add_condition(condition, &mut a, &mut b, &mut c);
        Self(a, b, c)
    }

    fn add_selector(selector: &Selector, a: &mut u32, b: &mut u32, c: &mut u32) {
        match selector {
            Selector::Element(test) => {
                // * has no specificity
                if test.local_name.is_some() {
                    *c += 1;
                }
            }
            Selector::Conditional(inner, condition) => {
                Self::add_selector(inner, a, b, c);
                Self::add_condition(condition, a, b, c);
            }
            Selector::Child(left, right)
            | Selector::Descendant(left, right)
            | Selector::AdjacentSibling(left, right) => {
                Self::add_selector(left, a, b, c);
                Self::add_selector(right, a, b, c);
            }
            Selector::PseudoElement(_) => *c += 1,
            Selector::Unsupported(_) => {}
        }
    }

    fn add_condition(condition: &Condition, a: &mut u32, b: &mut u32, c: &mut u32) {
        match condition {
            Condition::Id(_) => *a += 1,
            Condition::Class(_)
            | Condition::Attribute { .. }
            | Condition::OneOf { .. }
            | Condition::BeginsHyphen { .. }
            | Condition::Lang(_)
            | Condition::Positional(_)
            | Condition::PseudoClass(_) => *b += 1,
            // Negation weighs as its argument
            Condition::Negative(inner) => Self::add_condition(inner, a, b, c),
            Condition::And(left, right) => {
                Self::add_condition(left, a, b, c);
                Self::add_condition(right, a, b, c);
            }
            Condition::Or(left, right) => {
                let heavier = Self::of_condition(left).max(Self::of_condition(right));
                *a += heavier.0;
                *b += heavier.1;
                *c += heavier.2;
            }
            Condition::Unsupported(_) => {}
        }
    }

    /// Get the ID condition count.
    pub fn ids(&self) -> u32 {
        self.0
    }

    /// Get the class/attribute/pseudo-class count.
    pub fn attributes(&self) -> u32 {
        self.1
    }

    /// Get the type selector count.
    pub fn types(&self) -> u32 {
        self.2
    }
}

impl std::fmt::Display for Specificity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::PseudoElement;

    #[test]
    fn specificity_calculation() {
        // * -> (0,0,0)
        let sel = Selector::universal();
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 0, 0));

        // p -> (0,0,1)
        let sel = Selector::element("p");
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 0, 1));

        // .note -> (0,1,0)
        let sel = Selector::class("note");
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 1, 0));

        // #intro -> (1,0,0)
        let sel = Selector::id("intro");
        assert_eq!(Specificity::of_selector(&sel), Specificity(1, 0, 0));

        // div > p.note -> (0,1,2)
        let sel = Selector::element("div").child(Selector::element("p").with_class("note"));
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 1, 2));

        // h1 + p::before -> (0,0,3)
        let sel = Selector::element("h1")
            .adjacent(Selector::element("p"))
            .pseudo(PseudoElement::Before);
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 0, 3));
    }

    #[test]
    fn first_child_counts_as_attribute() {
        let sel = Selector::element("li").first_child();
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 1, 1));
    }

    #[test]
    fn composed_condition_specificity() {
        let cond = Condition::Id("a".into()).and(Condition::Class("b".into()));
        assert_eq!(Specificity::of_condition(&cond), Specificity(1, 1, 0));

        let cond = Condition::Class("b".into()).negate();
        assert_eq!(Specificity::of_condition(&cond), Specificity(0, 1, 0));

        let cond = Condition::Class("b".into()).or(Condition::Id("a".into()));
        assert_eq!(Specificity::of_condition(&cond), Specificity(1, 0, 0));
    }

    #[test]
    fn specificity_comparison() {
        // ID > class > type
        assert!(Specificity(1, 0, 0) > Specificity(0, 99, 99));
        assert!(Specificity(0, 1, 0) > Specificity(0, 0, 99));
        assert!(Specificity(0, 0, 1) > Specificity(0, 0, 0));

        // Same level, higher count wins
        assert!(Specificity(0, 2, 0) > Specificity(0, 1, 0));
    }
}
