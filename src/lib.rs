//! # Scopewalk - Scoped, profile-aware ignore filtering
//!
//! Scopewalk walks a directory tree and decides, for every file and
//! directory, whether it belongs in the result, using gitignore-like pattern
//! rules that can be declared at any directory depth:
//!
//! - **Gitignore-style patterns**: anchoring, `**` globs, `!` negation, and
//!   trailing-`/` directory-only rules, compiled per line
//! - **Profile sections**: `[name]` sections inside ignore files, selected
//!   by an active profile for the whole traversal
//! - **Include-only mode**: inverted allow-list files that keep only
//!   explicitly matched paths
//! - **Early pruning**: excluded subtrees are skipped before their contents
//!   are ever listed
//! - **Flat list filters**: walker-wide blacklist/whitelist glob lists on
//!   top of the per-directory files
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use scopewalk::{DirectoryWalker, WalkOptions};
//!
//! let walker = DirectoryWalker::new(WalkOptions::default())?;
//! for file in walker.walk("my/project") {
//!     println!("{}", file.display());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Ignore file grammar
//!
//! Ignore files and include-only files share one grammar: blank lines and
//! `#` comments are skipped, `[profile]` opens a named section, and every
//! other line is a glob pattern, optionally `!`-prefixed (negation) and/or
//! `/`-suffixed (directory-only). A pattern containing a `/` is anchored to
//! the directory that declares it.
//!
//! ```text
//! *.log
//! build/
//! !keep.log
//!
//! [dev]
//! *.tmp
//! ```
//!
//! ## Precedence across depths
//!
//! Each directory's ignore file is evaluated independently and the verdicts
//! combine by logical OR: a deeper file's `!` negation re-admits only what
//! that same file excluded, never what an ancestor excluded. Include-only
//! mode is inactive until some directory carries a non-empty include-only
//! file; once active, the nearest enclosing file decides.
//!
//! Traversal is single-threaded, synchronous, and lazy; every `walk` call
//! starts fresh, and nothing in the engine aborts a walk: malformed pattern
//! lines are dropped, unreadable ignore files contribute no patterns, and
//! unlistable directories are treated as childless.

pub mod config;
pub mod error;
pub mod fs;
pub mod rules;
pub mod walk;

// Re-export main types for easier access
pub use config::WalkOptions;
pub use error::PatternError;
pub use fs::{DirEntry, Filesystem, OsFilesystem};
pub use rules::{Pattern, PatternStack, ProfileDocument, RuleSet, RuleSetFactory};
pub use walk::observer::WalkObserver;
pub use walk::{DirectoryWalker, Walk};
