//! Cascade ordering of matched declarations.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::automaton::{Automaton, DeclarationId, StyleAutomaton};
use crate::rules::Declaration;
use crate::selector::PseudoElement;

/// Total cascade order: property, then importance (normal before
/// `!important`), then specificity, then source position.
///
/// Within one property the winning declaration sorts last.
pub fn cascade_order(a: &Declaration, b: &Declaration) -> Ordering {
    a.property
        .cmp(&b.property)
        .then_with(|| a.important.cmp(&b.important))
        .then_with(|| a.specificity.cmp(&b.specificity))
        .then_with(|| a.position.cmp(&b.position))
}

/// Sort declarations into cascade order.
pub fn sort_cascade(declarations: &mut [&Declaration]) {
    declarations.sort_by(|a, b| cascade_order(a, b));
}

/// Collect the declarations accepted by a live state set, in cascade order.
///
/// With `pseudo` unset the states' normal lists are read; otherwise their
/// pseudo lists, keeping only declarations for that pseudo-element. A
/// declaration reached through several states appears once.
pub fn collect_declarations<'a, A: Automaton>(
    automaton: &'a StyleAutomaton<A>,
    live: &[A::State],
    pseudo: Option<PseudoElement>,
) -> Vec<&'a Declaration> {
    let machine = automaton.machine();
    let mut ids: Vec<DeclarationId> = live
        .iter()
        .flat_map(|state| match pseudo {
            None => machine.declarations(*state),
            Some(_) => machine.pseudo_declarations(*state),
        })
        .copied()
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let mut declarations: Vec<&Declaration> = ids
        .into_iter()
        .map(|id| automaton.declaration(id))
        .filter(|declaration| declaration.pseudo_element == pseudo)
        .collect();
    sort_cascade(&mut declarations);
    declarations
}

/// Project cascade-ordered declarations to the winner per property.
///
/// Later entries override earlier ones, so feeding the output of
/// [`collect_declarations`] yields the cascaded value of every property.
pub fn winning_declarations<'a>(
    ordered: impl IntoIterator<Item = &'a Declaration>,
) -> IndexMap<&'a str, &'a Declaration> {
    let mut winners = IndexMap::new();
    for declaration in ordered {
        winners.insert(declaration.property.as_str(), declaration);
    }
    winners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Specificity;

    fn decl(property: &str, value: &str, specificity: Specificity, position: i64) -> Declaration {
        Declaration::new(property, value)
            .with_specificity(specificity)
            .at_position(position)
    }

    #[test]
    fn specificity_beats_position() {
        let early_specific = decl("color", "blue", Specificity(0, 1, 1), 0);
        let late_plain = decl("color", "red", Specificity(0, 0, 1), 1);

        let mut ordered = vec![&early_specific, &late_plain];
        sort_cascade(&mut ordered);
        assert_eq!(ordered[1].value, "blue");
    }

    #[test]
    fn importance_beats_specificity() {
        let important = decl("color", "red", Specificity(0, 0, 1), 0).important();
        let specific = decl("color", "blue", Specificity(1, 0, 0), 1);

        let mut ordered = vec![&important, &specific];
        sort_cascade(&mut ordered);
        assert_eq!(ordered[1].value, "red");
    }

    #[test]
    fn position_breaks_ties() {
        let first = decl("color", "red", Specificity(0, 0, 1), 3);
        let second = decl("color", "blue", Specificity(0, 0, 1), 7);

        let mut ordered = vec![&second, &first];
        sort_cascade(&mut ordered);
        assert_eq!(ordered[0].value, "red");
        assert_eq!(ordered[1].value, "blue");
    }

    #[test]
    fn winners_keep_last_write_per_property() {
        let a = decl("color", "red", Specificity::ZERO, 0);
        let b = decl("color", "blue", Specificity::ZERO, 1);
        let c = decl("margin", "0", Specificity::ZERO, 2);

        let mut ordered = vec![&c, &b, &a];
        sort_cascade(&mut ordered);
        let winners = winning_declarations(ordered);

        assert_eq!(winners.len(), 2);
        assert_eq!(winners["color"].value, "blue");
        assert_eq!(winners["margin"].value, "0");
    }
}
