//! Error types for the styling engine.

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the style engine.
///
/// Selector constructs this engine does not understand are not errors: they
/// compile to nothing and simply never match.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An element end event arrived with no element open.
    #[error("Unbalanced element end: no element is open")]
    UnbalancedEnd,

    /// A per-element query was made while no element is open.
    #[error("No open element for '{operation}'")]
    NoOpenElement { operation: &'static str },

    /// A pseudo-element name outside the supported set.
    #[error("Unknown pseudo-element '{name}'")]
    UnknownPseudoElement { name: String },
}

impl Error {
    /// Create a no-open-element error.
    pub fn no_open_element(operation: &'static str) -> Self {
        Self::NoOpenElement { operation }
    }

    /// Create an unknown pseudo-element error.
    pub fn unknown_pseudo_element(name: impl Into<String>) -> Self {
        Self::UnknownPseudoElement { name: name.into() }
    }
}
