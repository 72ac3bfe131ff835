//! Tests for cascade ordering of matched declarations.

use folio_style::prelude::*;

fn values(matcher: &StreamMatcher, property: &str) -> Vec<String> {
    matcher
        .declarations()
        .unwrap()
        .iter()
        .filter(|decl| decl.property == property)
        .map(|decl| decl.value.clone())
        .collect()
}

#[test]
fn test_specificity_orders_declarations() {
    let mut sheet = StyleSheet::author();
    sheet.add_rule(Selector::id("intro"), Declaration::new("color", "green"));
    sheet.add_rule(Selector::element("p").with_class("lead"), Declaration::new("color", "blue"));
    sheet.add_rule(Selector::element("p"), Declaration::new("color", "red"));

    let mut engine = StyleEngine::default();
    engine.add_stylesheet(sheet);
    let mut matcher = engine.matcher();

    matcher.start_element(&Element::new("p").with_class("lead").with_id("intro"));
    assert_eq!(values(&matcher, "color"), ["red", "blue", "green"]);
    assert_eq!(matcher.computed().unwrap()["color"].value, "green");
}

#[test]
fn test_important_overrides_specificity() {
    let mut sheet = StyleSheet::author();
    sheet.add_rule(Selector::element("p"), Declaration::new("color", "red").important());
    sheet.add_rule(Selector::id("intro"), Declaration::new("color", "green"));

    let mut engine = StyleEngine::default();
    engine.add_stylesheet(sheet);
    let mut matcher = engine.matcher();

    matcher.start_element(&Element::new("p").with_id("intro"));
    assert_eq!(values(&matcher, "color"), ["green", "red"]);

    let computed = matcher.computed().unwrap();
    assert_eq!(computed["color"].value, "red");
    assert!(computed["color"].important);
}

#[test]
fn test_later_position_wins_ties() {
    let mut sheet = StyleSheet::author();
    sheet.add_rule(Selector::element("p"), Declaration::new("color", "red"));
    sheet.add_rule(Selector::element("p"), Declaration::new("color", "blue"));
    sheet.add_rule(Selector::element("p"), Declaration::new("color", "green"));

    let mut engine = StyleEngine::default();
    engine.add_stylesheet(sheet);
    let mut matcher = engine.matcher();

    matcher.start_element(&Element::new("p"));
    assert_eq!(values(&matcher, "color"), ["red", "blue", "green"]);
}

#[test]
fn test_properties_are_grouped() {
    let mut sheet = StyleSheet::author();
    sheet.add_block(
        Selector::element("p"),
        [
            Declaration::new("margin", "0"),
            Declaration::new("color", "red"),
            Declaration::new("font-size", "10pt"),
        ],
    );

    let mut engine = StyleEngine::default();
    engine.add_stylesheet(sheet);
    let mut matcher = engine.matcher();

    matcher.start_element(&Element::new("p"));
    let properties: Vec<_> = matcher
        .declarations()
        .unwrap()
        .iter()
        .map(|decl| decl.property.clone())
        .collect();
    assert_eq!(properties, ["color", "font-size", "margin"]);
}

#[test]
fn test_origins_order_equal_specificity() {
    let mut author = StyleSheet::author().with_source("author.css");
    author.add_rule(Selector::element("p"), Declaration::new("color", "blue"));

    let mut user_agent = StyleSheet::user_agent().with_source("ua.css");
    user_agent.add_rule(Selector::element("p"), Declaration::new("color", "black"));
    user_agent.add_rule(Selector::element("p"), Declaration::new("display", "block"));

    let mut engine = StyleEngine::default();
    engine.add_stylesheet(author);
    engine.add_stylesheet(user_agent);
    let mut matcher = engine.matcher();

    matcher.start_element(&Element::new("p"));
    assert_eq!(values(&matcher, "color"), ["black", "blue"]);

    let computed = matcher.computed().unwrap();
    assert_eq!(computed["color"].value, "blue");
    assert_eq!(computed["display"].value, "block");
}

#[test]
fn test_duplicate_reachability_reports_once() {
    // Nested divs reach the descendant rule along two paths
    let mut sheet = StyleSheet::author();
    sheet.add_rule(
        Selector::element("p").with_condition(
            Condition::Class("a".into()).or(Condition::Class("b".into())),
        ),
        Declaration::new("color", "red"),
    );
    sheet.add_rule(
        Selector::element("div").descendant(Selector::element("p")),
        Declaration::new("margin", "0"),
    );

    let mut engine = StyleEngine::default();
    engine.add_stylesheet(sheet);
    let mut matcher = engine.matcher();

    matcher.start_element(&Element::new("div"));
    matcher.start_element(&Element::new("div"));
    matcher.start_element(&Element::new("p").with_class("a b"));
    assert_eq!(values(&matcher, "color"), ["red"]);
    assert_eq!(values(&matcher, "margin"), ["0"]);
}
