//! Per-traversal stack of rule sets, one level per directory depth
//!
//! The walker pushes a level on entering a directory and pops it on leaving.
//! The stack is exclusively owned by one in-flight traversal; it is never
//! shared across sibling branches or threads.

use crate::rules::ruleset::RuleSet;
use std::path::Path;

/// Rule sets indexed by directory depth.
///
/// Ignore stacks may hold empty levels (directories without ignore files);
/// include-only stacks hold a rule set at every level, explicit or the
/// implicit accept-all substitute.
/// Cloning yields the deep-copied snapshot a forked traversal would need;
/// a live stack itself is never shared.
#[derive(Debug, Clone, Default)]
pub struct PatternStack {
    levels: Vec<Option<RuleSet>>,
}

impl PatternStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rules: Option<RuleSet>) {
        self.levels.push(rules);
    }

    pub fn pop(&mut self) {
        self.levels.pop();
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Ignore verdict: each level's rule set is evaluated independently and
    /// the results combine by logical OR, scanning deepest to shallowest.
    ///
    /// A level returning false never short-circuits the scan, so a closer
    /// file's negation can only re-admit what that same file excluded; it
    /// cannot override an ancestor level's verdict.
    pub fn ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.levels
            .iter()
            .rev()
            .flatten()
            .any(|rules| rules.matches(path, is_dir))
    }

    /// Include-only verdict. Inactive (accepting everything) unless some
    /// level was built from an explicit include-only file; when active, only
    /// the nearest enclosing level decides.
    pub fn included(&self, path: &Path, is_dir: bool) -> bool {
        let active = self.levels.iter().flatten().any(RuleSet::is_explicit);
        if !active {
            return true;
        }
        match self.levels.last() {
            Some(Some(rules)) => rules.matches(path, is_dir),
            // include stacks always carry a rule set per level
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::document::PatternLine;

    fn set(base: &str, texts: &[&str]) -> RuleSet {
        let lines: Vec<PatternLine> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| PatternLine {
                text: t.to_string(),
                line: i + 1,
            })
            .collect();
        RuleSet::build(base, &lines, None)
    }

    #[test]
    fn test_or_across_levels() {
        let mut stack = PatternStack::new();
        stack.push(Some(set("/r", &["*.log"])));
        stack.push(None);
        stack.push(Some(set("/r/a/b", &["*.tmp"])));

        // deeper level matches, shallower does not
        assert!(stack.ignored(Path::new("/r/a/b/x.tmp"), false));
        // shallower level matches, deeper does not
        assert!(stack.ignored(Path::new("/r/a/b/x.log"), false));
        assert!(!stack.ignored(Path::new("/r/a/b/x.py"), false));
    }

    #[test]
    fn test_closer_negation_cannot_override_ancestor() {
        let mut stack = PatternStack::new();
        stack.push(Some(set("/r", &["*.log"])));
        stack.push(Some(set("/r/a", &["!keep.log"])));

        // the ancestor's verdict stands even though the closer file negates
        assert!(stack.ignored(Path::new("/r/a/keep.log"), false));
    }

    #[test]
    fn test_negation_within_same_level_readmits() {
        let mut stack = PatternStack::new();
        stack.push(Some(set("/r", &["*.log", "!keep.log"])));
        stack.push(None);

        assert!(!stack.ignored(Path::new("/r/keep.log"), false));
        assert!(stack.ignored(Path::new("/r/other.log"), false));
    }

    #[test]
    fn test_include_inactive_when_all_levels_implicit() {
        let mut stack = PatternStack::new();
        stack.push(Some(RuleSet::accept_all("/r")));
        stack.push(Some(RuleSet::accept_all("/r/a")));

        assert!(stack.included(Path::new("/r/a/whatever.bin"), false));
    }

    #[test]
    fn test_include_active_consults_nearest_level() {
        let mut stack = PatternStack::new();
        stack.push(Some(set("/r", &["*.py"])));

        assert!(stack.included(Path::new("/r/main.py"), false));
        assert!(!stack.included(Path::new("/r/readme.md"), false));

        // a deeper implicit level is the one consulted once pushed
        stack.push(Some(RuleSet::accept_all("/r/sub")));
        assert!(stack.included(Path::new("/r/sub/readme.md"), false));
        stack.pop();
        assert!(!stack.included(Path::new("/r/readme.md"), false));
    }

    #[test]
    fn test_push_pop_depth() {
        let mut stack = PatternStack::new();
        assert_eq!(stack.depth(), 0);
        stack.push(None);
        stack.push(Some(RuleSet::accept_all("/r")));
        assert_eq!(stack.depth(), 2);
        stack.pop();
        stack.pop();
        assert_eq!(stack.depth(), 0);
    }
}
