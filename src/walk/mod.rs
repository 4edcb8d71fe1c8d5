//! Depth-first filtered directory traversal
//!
//! The walker drives the per-directory state machine: enter a directory,
//! build and push its rule sets, filter its children against the current
//! stack state, yield the accepted files, recurse into the accepted
//! subdirectories, pop on leave. Subdirectories are filtered with the
//! parent's stack state, before their own ignore files are ever read, which
//! is what lets a wholly excluded subtree be skipped without listing it.

pub mod filters;
pub mod observer;

use crate::config::WalkOptions;
use crate::fs::{Filesystem, OsFilesystem};
use crate::rules::ruleset::normalize_rel;
use crate::rules::{PatternStack, RuleSetFactory};
use anyhow::Result;
use filters::ListFilter;
use observer::WalkObserver;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Filtered traversal driver.
///
/// Construction compiles the flat blacklist/whitelist globs and fails only
/// on malformed configured patterns; per-directory ignore files are read
/// lazily during each walk. A walker is reusable: every [`walk`] call starts
/// a fresh traversal.
///
/// [`walk`]: DirectoryWalker::walk
pub struct DirectoryWalker<F: Filesystem = OsFilesystem> {
    options: WalkOptions,
    list_filter: ListFilter,
    fs: F,
}

impl DirectoryWalker<OsFilesystem> {
    pub fn new(options: WalkOptions) -> Result<Self> {
        Self::with_filesystem(options, OsFilesystem)
    }
}

impl<F: Filesystem> DirectoryWalker<F> {
    pub fn with_filesystem(options: WalkOptions, fs: F) -> Result<Self> {
        let list_filter = ListFilter::new(&options.blacklist, &options.whitelist)?;
        Ok(Self {
            options,
            list_filter,
            fs,
        })
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Lazily walk the tree under `root`, yielding accepted file paths.
    pub fn walk(&self, root: impl AsRef<Path>) -> Walk<'_, F> {
        self.walk_inner(root.as_ref().to_path_buf(), None)
    }

    /// Like [`walk`], with an injected observer receiving traversal events.
    ///
    /// [`walk`]: DirectoryWalker::walk
    pub fn walk_with_observer<'w>(
        &'w self,
        root: impl AsRef<Path>,
        observer: &'w mut dyn WalkObserver,
    ) -> Walk<'w, F> {
        self.walk_inner(root.as_ref().to_path_buf(), Some(observer))
    }

    fn walk_inner<'w>(
        &'w self,
        root: PathBuf,
        observer: Option<&'w mut dyn WalkObserver>,
    ) -> Walk<'w, F> {
        Walk {
            walker: self,
            root,
            frames: Vec::new(),
            ignore_stack: PatternStack::new(),
            include_stack: PatternStack::new(),
            visited: HashSet::new(),
            observer,
            started: false,
        }
    }
}

/// One in-flight traversal. Exclusively owns its stacks and visited set;
/// dropping it mid-walk leaks nothing (every read is scoped to one call).
pub struct Walk<'w, F: Filesystem> {
    walker: &'w DirectoryWalker<F>,
    root: PathBuf,
    frames: Vec<Frame>,
    ignore_stack: PatternStack,
    include_stack: PatternStack,
    visited: HashSet<PathBuf>,
    observer: Option<&'w mut dyn WalkObserver>,
    started: bool,
}

/// Pending work for one entered directory.
struct Frame {
    dir: PathBuf,
    files: VecDeque<PathBuf>,
    dirs: VecDeque<PathBuf>,
}

impl<F: Filesystem> Walk<'_, F> {
    /// Enter a directory: push its rule sets, list it, and filter children
    /// against the now-current stack state. An already-visited directory
    /// (symlink cycle) is skipped silently; an unlistable one is entered
    /// but childless.
    fn enter(&mut self, dir: PathBuf) {
        let walker = self.walker;
        let key = walker
            .fs
            .canonicalize(&dir)
            .unwrap_or_else(|_| dir.clone());
        if !self.visited.insert(key) {
            tracing::trace!(path = %dir.display(), "skipping already-visited directory");
            return;
        }

        let factory = RuleSetFactory::new(&walker.fs, &walker.options);
        self.ignore_stack.push(factory.ignore_rules(&dir));
        self.include_stack.push(Some(factory.include_rules(&dir)));
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.on_enter(&dir);
        }

        let entries = match walker.fs.read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(
                    path = %dir.display(),
                    "directory unlistable, treating as childless: {err}"
                );
                Vec::new()
            }
        };

        let mut frame = Frame {
            dir: dir.clone(),
            files: VecDeque::new(),
            dirs: VecDeque::new(),
        };
        for entry in entries {
            let path = dir.join(&entry.name);
            if entry.is_file {
                if self.accepts_file(&path) {
                    frame.files.push_back(path);
                }
            } else if entry.is_dir && self.accepts_directory(&path) {
                frame.dirs.push_back(path);
            }
        }
        self.frames.push(frame);
    }

    /// A file is accepted iff not-ignored, not blacklisted, whitelisted
    /// (when a whitelist exists), and included.
    fn accepts_file(&mut self, path: &Path) -> bool {
        if let Some(obs) = self.observer.as_deref_mut() {
            if !obs.should_visit_file(path) {
                return false;
            }
        }
        if self.ignore_stack.ignored(path, false) {
            tracing::trace!(path = %path.display(), "file excluded by ignore rules");
            return false;
        }
        let rel = self.root_relative(path);
        if self.walker.list_filter.is_blacklisted(&rel) {
            tracing::trace!(path = %path.display(), "file excluded by blacklist");
            return false;
        }
        if !self.walker.list_filter.passes_whitelist(&rel) {
            tracing::trace!(path = %path.display(), "file not on whitelist");
            return false;
        }
        if !self.include_stack.included(path, false) {
            tracing::trace!(path = %path.display(), "file not in include-only set");
            return false;
        }
        true
    }

    /// A subdirectory is accepted for recursion iff not-ignored and
    /// included, evaluated with the parent's stack state. The whitelist
    /// does not constrain directories.
    fn accepts_directory(&mut self, path: &Path) -> bool {
        if let Some(obs) = self.observer.as_deref_mut() {
            if !obs.should_visit_directory(path) {
                return false;
            }
        }
        if self.ignore_stack.ignored(path, true) {
            tracing::trace!(path = %path.display(), "directory pruned by ignore rules");
            return false;
        }
        if self.walker.list_filter.is_blacklisted(&self.root_relative(path)) {
            tracing::trace!(path = %path.display(), "directory pruned by blacklist");
            return false;
        }
        if !self.include_stack.included(path, true) {
            tracing::trace!(path = %path.display(), "directory not in include-only set");
            return false;
        }
        true
    }

    fn root_relative(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => normalize_rel(rel),
            Err(_) => normalize_rel(path),
        }
    }

    /// Apply ignore files declared above the walk root: find the nearest
    /// ancestor carrying a root marker and push a stack level for every
    /// directory between it (inclusive) and the root (exclusive).
    fn seed_ancestors(&mut self) {
        let Some(marker_root) = self.find_marker_root() else {
            return;
        };
        let Ok(rel) = self.root.strip_prefix(&marker_root) else {
            return;
        };

        let mut levels = vec![marker_root.clone()];
        let mut level = marker_root;
        for component in rel.components() {
            level = level.join(component);
            levels.push(level.clone());
        }
        // the walk root's own level is pushed when it is entered
        levels.pop();

        let walker = self.walker;
        let factory = RuleSetFactory::new(&walker.fs, &walker.options);
        for dir in levels {
            tracing::debug!(path = %dir.display(), "seeding rule sets from ancestor");
            self.ignore_stack.push(factory.ignore_rules(&dir));
            self.include_stack.push(Some(factory.include_rules(&dir)));
        }
    }

    /// Nearest ancestor of the walk root (the root itself included) whose
    /// listing contains one of the configured marker names.
    fn find_marker_root(&self) -> Option<PathBuf> {
        let walker = self.walker;
        if walker.options.root_markers.is_empty() {
            return None;
        }
        for dir in self.root.ancestors() {
            let Ok(entries) = walker.fs.read_dir(dir) else {
                continue;
            };
            let marked = entries
                .iter()
                .any(|e| walker.options.root_markers.iter().any(|m| *m == e.name));
            if marked {
                return Some(dir.to_path_buf());
            }
        }
        None
    }
}

impl<F: Filesystem> Iterator for Walk<'_, F> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if !self.started {
            self.started = true;
            self.seed_ancestors();
            let root = self.root.clone();
            self.enter(root);
        }

        loop {
            enum Step {
                File(PathBuf),
                Descend(PathBuf),
                Ascend,
            }

            let step = match self.frames.last_mut() {
                None => return None,
                Some(frame) => {
                    if let Some(file) = frame.files.pop_front() {
                        Step::File(file)
                    } else if let Some(dir) = frame.dirs.pop_front() {
                        Step::Descend(dir)
                    } else {
                        Step::Ascend
                    }
                }
            };

            match step {
                Step::File(file) => {
                    if let Some(obs) = self.observer.as_deref_mut() {
                        obs.on_file(&file);
                    }
                    return Some(file);
                }
                Step::Descend(dir) => self.enter(dir),
                Step::Ascend => {
                    if let Some(frame) = self.frames.pop() {
                        self.ignore_stack.pop();
                        self.include_stack.pop();
                        if let Some(obs) = self.observer.as_deref_mut() {
                            obs.on_leave(&frame.dir);
                        }
                    }
                }
            }
        }
    }
}
