//! Style rules and stylesheets.

mod declaration;
mod rule;
mod stylesheet;

pub use declaration::Declaration;
pub use rule::StyleRule;
pub use stylesheet::{Origin, StyleSheet};
