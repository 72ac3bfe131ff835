//! Engine configuration.

/// Configuration threaded into the compiler, the matcher and the engine.
///
/// There is no process-wide state: every component that logs automaton
/// structure or resolves languages takes its settings from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Emit `trace`-level dumps of the automata and of per-element live states.
    pub trace: bool,
    /// Language tag used when neither the element nor an ancestor declares one.
    pub default_language: String,
    /// Maximum number of compiled automata kept by the engine's cache.
    pub cache_capacity: usize,
}

impl EngineConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable automaton tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Set the fallback language tag.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Set the compiled-automaton cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trace: false,
            default_language: "en".to_string(),
            cache_capacity: 64,
        }
    }
}
