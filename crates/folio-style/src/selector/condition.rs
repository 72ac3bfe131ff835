//! Selector conditions: guards evaluated against a single element.

use std::fmt;

/// Namespace-qualified attribute name used by attribute conditions.
///
/// A `None` namespace selects attributes in no namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeName {
    /// Namespace URI.
    pub namespace: Option<String>,
    /// Local name.
    pub local_name: String,
}

impl AttributeName {
    /// An attribute in no namespace.
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// A namespace-qualified attribute.
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}|{}", namespace, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// A predicate over one element and its position among its siblings.
///
/// Conditions become edge labels in the selector automaton; they are
/// interned by value, so equal conditions share one label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// `#id`: an ID-typed attribute with this value.
    Id(String),
    /// `.name`: whole-token match in the `class` attribute.
    Class(String),
    /// `[name]` (value `None`) or `[name="value"]`.
    Attribute {
        name: AttributeName,
        value: Option<String>,
    },
    /// `[name~="value"]`: whole-token match in a space separated list.
    OneOf { name: AttributeName, value: String },
    /// `[name|="value"]`: exact value or value followed by `-`.
    BeginsHyphen { name: AttributeName, value: String },
    /// `:lang(tag)` against the resolved element language.
    Lang(String),
    /// Negation of the inner condition.
    Negative(Box<Condition>),
    /// Both conditions hold.
    And(Box<Condition>, Box<Condition>),
    /// Either condition holds.
    Or(Box<Condition>, Box<Condition>),
    /// Zero-based position among the parent's children.
    Positional(usize),
    /// A named pseudo-class such as `:link`.
    PseudoClass(String),
    /// Condition syntax beyond what this engine evaluates.
    Unsupported(String),
}

impl Condition {
    /// `:first-child`.
    pub fn first_child() -> Self {
        Self::Positional(0)
    }

    /// `[name]` in no namespace.
    pub fn has_attribute(local_name: impl Into<String>) -> Self {
        Self::Attribute {
            name: AttributeName::local(local_name),
            value: None,
        }
    }

    /// `[name="value"]` in no namespace.
    pub fn attribute_equals(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Attribute {
            name: AttributeName::local(local_name),
            value: Some(value.into()),
        }
    }

    /// `[name~="value"]` in no namespace.
    pub fn one_of(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::OneOf {
            name: AttributeName::local(local_name),
            value: value.into(),
        }
    }

    /// `[name|="value"]` in no namespace.
    pub fn begins_hyphen(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::BeginsHyphen {
            name: AttributeName::local(local_name),
            value: value.into(),
        }
    }

    /// `:lang(tag)`.
    pub fn lang(tag: impl Into<String>) -> Self {
        Self::Lang(tag.into())
    }

    /// `:name` pseudo-class.
    pub fn pseudo_class(name: impl Into<String>) -> Self {
        Self::PseudoClass(name.into())
    }

    /// Condition syntax this engine does not support.
    pub fn unsupported(text: impl Into<String>) -> Self {
        Self::Unsupported(text.into())
    }

    /// Negate this condition.
    pub fn negate(self) -> Self {
        Self::Negative(Box::new(self))
    }

    /// Conjunction of both conditions.
    pub fn and(self, other: Condition) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Disjunction of both conditions.
    pub fn or(self, other: Condition) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Whether this condition (and every nested condition) can be evaluated.
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Unsupported(_) => false,
            Self::Negative(inner) => inner.is_supported(),
            Self::And(left, right) | Self::Or(left, right) => {
                left.is_supported() && right.is_supported()
            }
            _ => true,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{}", id),
            Self::Class(name) => write!(f, ".{}", name),
            Self::Attribute { name, value: None } => write!(f, "[{}]", name),
            Self::Attribute {
                name,
                value: Some(value),
            } => write!(f, "[{}=\"{}\"]", name, value),
            Self::OneOf { name, value } => write!(f, "[{}~=\"{}\"]", name, value),
            Self::BeginsHyphen { name, value } => write!(f, "[{}|=\"{}\"]", name, value),
            Self::Lang(tag) => write!(f, ":lang({})", tag),
            Self::Negative(inner) => write!(f, ":not({})", inner),
            Self::And(left, right) => write!(f, "{}{}", left, right),
            Self::Or(left, right) => write!(f, ":or({}, {})", left, right),
            Self::Positional(0) => write!(f, ":first-child"),
            Self::Positional(index) => write!(f, ":nth-child({})", index + 1),
            Self::PseudoClass(name) => write!(f, ":{}", name),
            Self::Unsupported(text) => write!(f, "{}", text),
        }
    }
}
