//! Cascade resolution and the style engine.

mod cache;
mod cascade;
mod engine;

pub use cache::{AutomatonCache, AutomatonCacheKey};
pub use cascade::{cascade_order, collect_declarations, sort_cascade, winning_declarations};
pub use engine::StyleEngine;
