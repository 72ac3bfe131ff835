//! Selector type definitions.

use std::fmt;
use std::str::FromStr;

use super::Condition;
use crate::Error;

/// A structural selector (e.g. `div > p.note + p::before`).
///
/// Selectors are immutable trees. Combinators hold the ancestor (or preceding
/// sibling) on the left and the simple selector for the subject on the right,
/// the way a CSS2 parser hands them over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Element type test (`ns|name`, `*`, `|name`, ...).
    Element(ElementTest),
    /// Inner selector further restricted by a condition (`p.note`).
    Conditional(Box<Selector>, Condition),
    /// Child combinator (`A > B`).
    Child(Box<Selector>, Box<Selector>),
    /// Descendant combinator (`A B`).
    Descendant(Box<Selector>, Box<Selector>),
    /// Adjacent sibling combinator (`A + B`).
    AdjacentSibling(Box<Selector>, Box<Selector>),
    /// Pseudo-element subject (`::before`). Only meaningful on the right
    /// side of a combinator; it is never traversed itself.
    PseudoElement(PseudoElement),
    /// Selector syntax beyond what this engine matches. Never matches.
    Unsupported(String),
}

impl Selector {
    /// Create a type selector in any namespace.
    pub fn element(local_name: impl Into<String>) -> Self {
        Self::Element(ElementTest::local(local_name))
    }

    /// Create a namespace-qualified type selector.
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self::Element(ElementTest::new(Some(namespace.into()), Some(local_name.into())))
    }

    /// Create a universal selector (`*`).
    pub fn universal() -> Self {
        Self::Element(ElementTest::universal())
    }

    /// Create a class selector (`.name`), i.e. `*.name`.
    pub fn class(class_name: impl Into<String>) -> Self {
        Self::universal().with_class(class_name)
    }

    /// Create an ID selector (`#id`), i.e. `*#id`.
    pub fn id(id: impl Into<String>) -> Self {
        Self::universal().with_id(id)
    }

    /// Create a selector for syntax this engine does not support.
    pub fn unsupported(text: impl Into<String>) -> Self {
        Self::Unsupported(text.into())
    }

    /// Restrict this selector by a condition.
    pub fn with_condition(self, condition: Condition) -> Self {
        Self::Conditional(Box::new(self), condition)
    }

    /// Add a class condition.
    pub fn with_class(self, class_name: impl Into<String>) -> Self {
        self.with_condition(Condition::Class(class_name.into()))
    }

    /// Add an ID condition.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_condition(Condition::Id(id.into()))
    }

    /// Add a `:first-child` condition.
    pub fn first_child(self) -> Self {
        self.with_condition(Condition::first_child())
    }

    /// Combine as `self > subject`.
    pub fn child(self, subject: Selector) -> Self {
        Self::Child(Box::new(self), Box::new(subject))
    }

    /// Combine as `self subject`.
    pub fn descendant(self, subject: Selector) -> Self {
        Self::Descendant(Box::new(self), Box::new(subject))
    }

    /// Combine as `self + subject`.
    pub fn adjacent(self, subject: Selector) -> Self {
        Self::AdjacentSibling(Box::new(self), Box::new(subject))
    }

    /// Target a pseudo-element of the elements this selector matches.
    pub fn pseudo(self, pseudo: PseudoElement) -> Self {
        self.child(Self::PseudoElement(pseudo))
    }

    /// The pseudo-element this selector targets, if any.
    pub fn pseudo_element(&self) -> Option<PseudoElement> {
        match self {
            Self::PseudoElement(pseudo) => Some(*pseudo),
            Self::Child(_, subject)
            | Self::Descendant(_, subject)
            | Self::AdjacentSibling(_, subject) => subject.pseudo_element(),
            Self::Element(_) | Self::Conditional(..) | Self::Unsupported(_) => None,
        }
    }

    /// Whether every component of this selector can be matched.
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Element(_) | Self::PseudoElement(_) => true,
            Self::Conditional(inner, condition) => {
                inner.is_supported() && condition.is_supported()
            }
            Self::Child(left, right)
            | Self::Descendant(left, right)
            | Self::AdjacentSibling(left, right) => left.is_supported() && right.is_supported(),
            Self::Unsupported(_) => false,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(test) => write!(f, "{}", test),
            Self::Conditional(inner, condition) => write!(f, "{}{}", inner, condition),
            Self::Child(left, right) | Self::Descendant(left, right)
                if matches!(**right, Self::PseudoElement(_)) =>
            {
                write!(f, "{}{}", left, right)
            }
            Self::Child(left, right) => write!(f, "{} > {}", left, right),
            Self::Descendant(left, right) => write!(f, "{} {}", left, right),
            Self::AdjacentSibling(left, right) => write!(f, "{} + {}", left, right),
            Self::PseudoElement(pseudo) => write!(f, "::{}", pseudo),
            Self::Unsupported(text) => write!(f, "{}", text),
        }
    }
}

/// Element type test. `None` components are wildcards.
///
/// A namespace of `Some("")` selects elements in no namespace (`|name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ElementTest {
    /// Namespace URI, or `None` for any namespace.
    pub namespace: Option<String>,
    /// Local name, or `None` for any name.
    pub local_name: Option<String>,
}

impl ElementTest {
    /// Create an element test.
    pub fn new(namespace: Option<String>, local_name: Option<String>) -> Self {
        Self {
            namespace,
            local_name,
        }
    }

    /// Match a local name in any namespace.
    pub fn local(local_name: impl Into<String>) -> Self {
        Self::new(None, Some(local_name.into()))
    }

    /// Match every element.
    pub fn universal() -> Self {
        Self::default()
    }
}

impl fmt::Display for ElementTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = &self.namespace {
            write!(f, "{}|", namespace)?;
        }
        match &self.local_name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "*"),
        }
    }
}

/// Pseudo-elements that receive their own declaration set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PseudoElement {
    /// `::before` generated content.
    Before,
    /// `::after` generated content.
    After,
    /// `::first-line` of the element's text.
    FirstLine,
    /// `::first-letter` of the element's text.
    FirstLetter,
}

impl PseudoElement {
    /// All supported pseudo-elements.
    pub const ALL: [PseudoElement; 4] = [
        PseudoElement::Before,
        PseudoElement::After,
        PseudoElement::FirstLine,
        PseudoElement::FirstLetter,
    ];

    /// CSS name without colons.
    pub fn as_str(&self) -> &'static str {
        match self {
            PseudoElement::Before => "before",
            PseudoElement::After => "after",
            PseudoElement::FirstLine => "first-line",
            PseudoElement::FirstLetter => "first-letter",
        }
    }
}

impl FromStr for PseudoElement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches(':').to_ascii_lowercase().as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "first-line" => Ok(Self::FirstLine),
            "first-letter" => Ok(Self::FirstLetter),
            _ => Err(Error::unknown_pseudo_element(s)),
        }
    }
}

impl fmt::Display for PseudoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display() {
        let sel = Selector::element("div").child(Selector::element("p").with_class("note"));
        assert_eq!(sel.to_string(), "div > p.note");

        let sel = Selector::element("h1").adjacent(Selector::element("p"));
        assert_eq!(sel.to_string(), "h1 + p");

        let sel = Selector::element("ol").descendant(Selector::universal().first_child());
        assert_eq!(sel.to_string(), "ol *:first-child");

        let sel = Selector::element("p").pseudo(PseudoElement::Before);
        assert_eq!(sel.to_string(), "p::before");

        let sel = Selector::namespaced("", "para");
        assert_eq!(sel.to_string(), "|para");
    }

    #[test]
    fn pseudo_element_of_selector() {
        let sel = Selector::element("div")
            .descendant(Selector::element("p"))
            .pseudo(PseudoElement::After);
        assert_eq!(sel.pseudo_element(), Some(PseudoElement::After));

        let sel = Selector::element("div").descendant(Selector::element("p"));
        assert_eq!(sel.pseudo_element(), None);
    }

    #[test]
    fn unsupported_components_propagate() {
        let sel = Selector::element("div").child(Selector::unsupported("p ~ q"));
        assert!(!sel.is_supported());

        let sel = Selector::element("p").with_condition(Condition::unsupported(":nth-child(2n)"));
        assert!(!sel.is_supported());

        let sel = Selector::element("p").with_class("note");
        assert!(sel.is_supported());
    }

    #[test]
    fn pseudo_element_parsing() {
        assert_eq!("before".parse::<PseudoElement>().unwrap(), PseudoElement::Before);
        assert_eq!("::first-line".parse::<PseudoElement>().unwrap(), PseudoElement::FirstLine);
        assert_eq!(":First-Letter".parse::<PseudoElement>().unwrap(), PseudoElement::FirstLetter);
        assert!(matches!(
            "marker".parse::<PseudoElement>(),
            Err(Error::UnknownPseudoElement { .. })
        ));
    }
}
