//! Name resolution passes.
//!
//! Mixins are resolved first and variables second. Spliced copies are walked
//! by the variable pass at their splice site, and so are the definition blocks
//! they were copied from.

pub mod mixins;
pub mod variables;

pub use mixins::resolve_mixins;
pub use variables::{resolve_variables, substitute, MAX_SUBSTITUTIONS};
