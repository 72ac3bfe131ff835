//! Style engine: style-sheet registry, compilation and matcher factory.

use std::sync::Arc;

use crate::automaton::StyleAutomaton;
use crate::config::EngineConfig;
use crate::matcher::StreamMatcher;
use crate::resolve::cache::{AutomatonCache, AutomatonCacheKey};
use crate::rules::{Origin, StyleRule, StyleSheet};

/// The main style engine.
///
/// The engine collects style sheets from all origins, merges them into one
/// rule list with globally increasing positions, compiles that list into a
/// shared automaton and hands out stream matchers running on it. Compiled
/// automata are cached by sheet content, so an unchanged sheet set is
/// compiled once.
pub struct StyleEngine {
    /// All registered stylesheets, sorted by origin.
    stylesheets: Vec<StyleSheet>,
    /// Compiled automata.
    cache: AutomatonCache,
    config: EngineConfig,
}

impl StyleEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            stylesheets: vec![],
            cache: AutomatonCache::with_capacity(config.cache_capacity),
            config,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Add a stylesheet.
    ///
    /// Sheets of the same origin keep their registration order.
    pub fn add_stylesheet(&mut self, stylesheet: StyleSheet) {
        self.stylesheets.push(stylesheet);
        self.stylesheets.sort_by_key(|s| s.origin);
    }

    /// Remove stylesheets from a specific source and drop automata built
    /// from them.
    pub fn remove_stylesheet_by_source(&mut self, source: &str) {
        self.stylesheets
            .retain(|s| s.source.as_deref() != Some(source));
        self.cache.invalidate(source);
    }

    /// Clear all stylesheets.
    pub fn clear_stylesheets(&mut self) {
        self.stylesheets.clear();
    }

    /// All rules of all sheets with positions rebased into their origin's
    /// band, in cascade order of origin then registration.
    pub fn rules(&self) -> Vec<StyleRule> {
        let mut next = [0i64; 3];
        let mut rules = Vec::with_capacity(self.rule_count());

        for sheet in &self.stylesheets {
            let counter = &mut next[sheet.origin as usize];
            for rule in &sheet.rules {
                let mut rule = rule.clone();
                rule.declaration.position = sheet.origin.position_band() + *counter;
                *counter += 1;
                rules.push(rule);
            }
        }
        rules
    }

    /// Compile the registered sheets, reusing a cached automaton when the
    /// sheet set is unchanged.
    pub fn compile(&self) -> Arc<StyleAutomaton> {
        let key = AutomatonCacheKey::new(&self.stylesheets);
        self.cache.get_or_insert_with(key, || {
            tracing::debug!(
                sheets = self.stylesheets.len(),
                rules = self.rule_count(),
                "compiling style sheets"
            );
            StyleAutomaton::compile(self.rules(), &self.config)
        })
    }

    /// Create a matcher for one document over the current sheets.
    pub fn matcher(&self) -> StreamMatcher {
        StreamMatcher::new(self.compile(), &self.config)
    }

    /// Invalidate all compiled automata.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Get the number of loaded stylesheets.
    pub fn stylesheet_count(&self) -> usize {
        self.stylesheets.len()
    }

    /// Get the number of stylesheets from one origin.
    pub fn stylesheet_count_for(&self, origin: Origin) -> usize {
        self.stylesheets
            .iter()
            .filter(|s| s.origin == origin)
            .count()
    }

    /// Get the total number of rules across all stylesheets.
    pub fn rule_count(&self) -> usize {
        self.stylesheets.iter().map(|s| s.len()).sum()
    }

    /// Get the number of cached automata.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
