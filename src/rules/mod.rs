//! Pattern rules: compilation, parsing, per-directory sets, and the
//! per-traversal stack.

pub mod compiler;
pub mod document;
pub mod factory;
pub mod ruleset;
pub mod stack;

// Re-export main types for easier access
pub use compiler::{Pattern, PatternSource, compile};
pub use document::{PatternLine, ProfileDocument};
pub use factory::RuleSetFactory;
pub use ruleset::RuleSet;
pub use stack::PatternStack;
