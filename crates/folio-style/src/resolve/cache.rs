//! Caching of compiled automata.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::automaton::StyleAutomaton;
use crate::rules::StyleSheet;

/// Cache key for a compiled set of style sheets.
///
/// The key combines every sheet's origin and source identity with a hash of
/// its rules, so editing a sheet in place yields a new key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AutomatonCacheKey {
    sources: Vec<Option<String>>,
    content_hash: u64,
}

impl AutomatonCacheKey {
    /// Create the key for a sheet set.
    pub fn new(sheets: &[StyleSheet]) -> Self {
        let mut hasher = DefaultHasher::new();
        for sheet in sheets {
            sheet.origin.hash(&mut hasher);
            sheet.rules.hash(&mut hasher);
        }

        Self {
            sources: sheets.iter().map(|sheet| sheet.source.clone()).collect(),
            content_hash: hasher.finish(),
        }
    }

    /// Whether any sheet in the set came from `source`.
    pub fn involves(&self, source: &str) -> bool {
        self.sources.iter().any(|s| s.as_deref() == Some(source))
    }
}

/// Bounded cache of compiled automata shared between threads.
pub struct AutomatonCache {
    entries: RwLock<HashMap<AutomatonCacheKey, Arc<StyleAutomaton>>>,
    max_size: usize,
}

impl AutomatonCache {
    /// Create a cache holding at most `max_size` automata.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(max_size)),
            max_size,
        }
    }

    /// Get a cached automaton.
    pub fn get(&self, key: &AutomatonCacheKey) -> Option<Arc<StyleAutomaton>> {
        self.entries.read().get(key).cloned()
    }

    /// Insert a compiled automaton.
    pub fn insert(&self, key: AutomatonCacheKey, automaton: Arc<StyleAutomaton>) {
        if self.max_size == 0 {
            return;
        }
        let mut entries = self.entries.write();
        // Simple eviction: clear half when full
        if entries.len() >= self.max_size && !entries.contains_key(&key) {
            evict_half(&mut entries);
        }
        entries.insert(key, automaton);
    }

    /// Return the cached automaton for `key`, compiling it on a miss.
    pub fn get_or_insert_with(
        &self,
        key: AutomatonCacheKey,
        compile: impl FnOnce() -> StyleAutomaton,
    ) -> Arc<StyleAutomaton> {
        if let Some(cached) = self.get(&key) {
            tracing::trace!("automaton cache hit");
            return cached;
        }
        let automaton = Arc::new(compile());
        self.insert(key, Arc::clone(&automaton));
        automaton
    }

    /// Drop every entry compiled from the given source.
    pub fn invalidate(&self, source: &str) {
        self.entries.write().retain(|key, _| !key.involves(source));
    }

    /// Drop all entries.
    pub fn invalidate_all(&self) {
        self.entries.write().clear();
    }

    /// Get the number of cached automata.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for AutomatonCache {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

/// Evict half the entries, rounding up.
fn evict_half(entries: &mut HashMap<AutomatonCacheKey, Arc<StyleAutomaton>>) {
    let target = entries.len().div_ceil(2);
    let keys: Vec<_> = entries.keys().take(target).cloned().collect();
    for key in keys {
        entries.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::rules::Declaration;
    use crate::selector::Selector;

    fn sheet(source: &str, element: &str) -> StyleSheet {
        let mut sheet = StyleSheet::author().with_source(source);
        sheet.add_rule(Selector::element(element), Declaration::new("color", "red"));
        sheet
    }

    fn compiled() -> Arc<StyleAutomaton> {
        Arc::new(StyleAutomaton::compile(Vec::new(), &EngineConfig::default()))
    }

    #[test]
    fn key_tracks_content() {
        let a = AutomatonCacheKey::new(&[sheet("a.css", "p")]);
        let same = AutomatonCacheKey::new(&[sheet("a.css", "p")]);
        let edited = AutomatonCacheKey::new(&[sheet("a.css", "div")]);

        assert_eq!(a, same);
        assert_ne!(a, edited);
        assert!(a.involves("a.css"));
        assert!(!a.involves("b.css"));
    }

    #[test]
    fn compile_runs_once_per_key() {
        let cache = AutomatonCache::default();
        let key = AutomatonCacheKey::new(&[sheet("a.css", "p")]);
        let mut compilations = 0;

        for _ in 0..3 {
            cache.get_or_insert_with(key.clone(), || {
                compilations += 1;
                StyleAutomaton::compile(Vec::new(), &EngineConfig::default())
            });
        }
        assert_eq!(compilations, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn full_cache_evicts_half() {
        let cache = AutomatonCache::with_capacity(4);
        for i in 0..4 {
            cache.insert(AutomatonCacheKey::new(&[sheet(&format!("{i}.css"), "p")]), compiled());
        }
        assert_eq!(cache.len(), 4);

        cache.insert(AutomatonCacheKey::new(&[sheet("new.css", "p")]), compiled());
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn invalidation() {
        let cache = AutomatonCache::default();
        cache.insert(AutomatonCacheKey::new(&[sheet("a.css", "p")]), compiled());
        cache.insert(AutomatonCacheKey::new(&[sheet("b.css", "p")]), compiled());

        cache.invalidate("a.css");
        assert_eq!(cache.len(), 1);

        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_capacity_never_stores() {
        let cache = AutomatonCache::with_capacity(0);
        cache.insert(AutomatonCacheKey::new(&[]), compiled());
        assert!(cache.is_empty());
    }
}
