//! Traversal observer hooks
//!
//! Surrounding tooling that wants visibility into a walk (or a veto over
//! parts of it) implements this capability set and injects it per traversal.
//! Match-decision tracing stays here and in `tracing` events rather than in
//! any process-wide state.

use std::path::Path;

/// Callbacks invoked by a [`Walk`] as it descends. All methods default to
/// no-ops / unconditional acceptance, so implementors override only what
/// they need.
///
/// [`Walk`]: crate::walk::Walk
pub trait WalkObserver {
    /// A directory is about to have its children filtered.
    fn on_enter(&mut self, _dir: &Path) {}

    /// A directory's subtree is complete.
    fn on_leave(&mut self, _dir: &Path) {}

    /// A file passed every filter and is about to be yielded.
    fn on_file(&mut self, _file: &Path) {}

    /// Veto hook consulted before any rule evaluation for a file.
    fn should_visit_file(&mut self, _file: &Path) -> bool {
        true
    }

    /// Veto hook consulted before any rule evaluation for a subdirectory.
    /// Returning false prunes the whole subtree.
    fn should_visit_directory(&mut self, _dir: &Path) -> bool {
        true
    }
}
