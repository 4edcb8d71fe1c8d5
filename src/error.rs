//! Error types for the filtering engine
//!
//! Nothing here is fatal to a traversal: a pattern that fails to compile is
//! dropped from its rule set, an unreadable ignore file contributes zero
//! patterns, and an unlistable directory is treated as childless. These types
//! exist so the recovery points are explicit rather than stringly-typed.

use thiserror::Error;

/// Failure to compile a single pattern line into a [`Pattern`].
///
/// Rule set construction drops the offending line and keeps the rest of the
/// file, so this error never propagates past the compiler.
///
/// [`Pattern`]: crate::rules::Pattern
#[derive(Debug, Error)]
pub enum PatternError {
    /// The line was empty once the `!` prefix and trailing `/` were stripped
    #[error("pattern is empty after stripping prefix and suffix markers")]
    Empty,

    /// A `[...]` character class was opened but never closed
    #[error("unterminated character class in pattern")]
    UnterminatedClass,

    /// The line ended in the middle of a `\` escape
    #[error("trailing escape at end of pattern")]
    TrailingEscape,

    /// The translated glob did not compile to a valid regex
    #[error("pattern translation produced an invalid regex: {0}")]
    Regex(#[from] regex::Error),
}
