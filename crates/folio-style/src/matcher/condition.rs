//! Condition evaluation against the current element.

use super::element::Element;
use crate::selector::{AttributeName, Condition};

/// What a condition can see: the element, its position and its language.
#[derive(Debug, Clone, Copy)]
pub struct ConditionContext<'a> {
    /// The element being started.
    pub element: &'a Element,
    /// Zero-based position among the parent's children started so far.
    pub position: usize,
    /// Resolved language of the element.
    pub language: &'a str,
}

impl<'a> ConditionContext<'a> {
    /// Create a context.
    pub fn new(element: &'a Element, position: usize, language: &'a str) -> Self {
        Self {
            element,
            position,
            language,
        }
    }

    /// Check whether a condition holds for this element.
    pub fn matches(&self, condition: &Condition) -> bool {
        match condition {
            Condition::Id(id) => self
                .element
                .attributes
                .iter()
                .any(|attr| attr.is_id() && attr.value == *id),
            Condition::Class(class) => self
                .element
                .attribute(None, "class")
                .is_some_and(|attr| contains_token(&attr.value, class)),
            Condition::Attribute { name, value } => {
                self.attribute_value(name)
                    .is_some_and(|actual| value.as_deref().is_none_or(|expected| actual == expected))
            }
            Condition::OneOf { name, value } => self
                .attribute_value(name)
                .is_some_and(|actual| contains_token(actual, value)),
            Condition::BeginsHyphen { name, value } => self
                .attribute_value(name)
                .is_some_and(|actual| hyphen_prefix(actual, value)),
            Condition::Lang(tag) => hyphen_prefix_ignore_case(self.language, tag),
            Condition::Negative(inner) => !self.matches(inner),
            Condition::And(left, right) => self.matches(left) && self.matches(right),
            Condition::Or(left, right) => self.matches(left) || self.matches(right),
            Condition::Positional(index) => self.position == *index,
            Condition::PseudoClass(name) => self.element.has_pseudo_class(name),
            Condition::Unsupported(_) => false,
        }
    }

    fn attribute_value(&self, name: &AttributeName) -> Option<&'a str> {
        self.element
            .attribute(name.namespace.as_deref(), &name.local_name)
            .map(|attr| attr.value.as_str())
    }
}

/// Whole-token match in a whitespace separated list.
fn contains_token(list: &str, token: &str) -> bool {
    !token.is_empty() && list.split_ascii_whitespace().any(|item| item == token)
}

/// `value` equals `prefix` or starts with `prefix` followed by `-`.
fn hyphen_prefix(value: &str, prefix: &str) -> bool {
    match value.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('-'),
        None => false,
    }
}

fn hyphen_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    match value.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => {
            let rest = &value[prefix.len()..];
            rest.is_empty() || rest.starts_with('-')
        }
        _ => false,
    }
}
