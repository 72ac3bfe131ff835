//! Stylesheet collection and cascade origins.

use crate::rules::{Declaration, StyleRule};
use crate::selector::Selector;

/// Origin of a style sheet.
///
/// Each origin owns a band of source positions so that positions keep the
/// origins' overall precedence when sheets are merged into one automaton:
/// user-agent defaults sit in a negative band, author styles in a positive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Origin {
    /// User-agent defaults (lowest precedence).
    UserAgent = 0,
    /// User preferences.
    User = 1,
    /// Document author style (embedded or linked).
    Author = 2,
}

impl Origin {
    /// Width of one origin's position band.
    pub const BAND_WIDTH: i64 = 1 << 40;

    /// First source position of this origin's band.
    pub fn position_band(&self) -> i64 {
        (*self as i64 - 1) * Self::BAND_WIDTH
    }
}

/// A style sheet: an ordered list of (selector, declaration) rules.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    /// The rules in this stylesheet, in source order.
    pub rules: Vec<StyleRule>,
    /// Cascade origin.
    pub origin: Origin,
    /// Identity of the sheet's source (URL or name), used as a cache key.
    pub source: Option<String>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new(origin: Origin) -> Self {
        Self {
            rules: vec![],
            origin,
            source: None,
        }
    }

    /// Create a user-agent stylesheet (lowest precedence).
    pub fn user_agent() -> Self {
        Self::new(Origin::UserAgent)
    }

    /// Create a user stylesheet.
    pub fn user() -> Self {
        Self::new(Origin::User)
    }

    /// Create an author stylesheet.
    pub fn author() -> Self {
        Self::new(Origin::Author)
    }

    /// Set the source identity.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a rule to the stylesheet.
    ///
    /// The declaration's position is set to the rule's index in this sheet;
    /// the engine rebases it into the origin's band when compiling.
    pub fn add_rule(&mut self, selector: Selector, declaration: Declaration) {
        let position = self.rules.len() as i64;
        self.rules
            .push(StyleRule::new(selector, declaration.at_position(position)));
    }

    /// Add one rule per declaration, all sharing the selector.
    pub fn add_block(
        &mut self,
        selector: Selector,
        declarations: impl IntoIterator<Item = Declaration>,
    ) {
        for declaration in declarations {
            self.add_rule(selector.clone(), declaration);
        }
    }

    /// Add a pre-built rule to the stylesheet.
    pub fn add_style_rule(&mut self, mut rule: StyleRule) {
        rule.declaration.position = self.rules.len() as i64;
        self.rules.push(rule);
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }

    /// Clear all rules.
    pub fn clear(&mut self) {
        self.rules.clear();
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::author()
    }
}
