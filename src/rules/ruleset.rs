//! Ordered pattern rules bound to one directory
//!
//! A rule set owns the compiled patterns declared by one directory's ignore
//! (or include-only) files and evaluates a single path against them. The
//! verdict is "last matching pattern wins": a later `!` negation re-admits a
//! path an earlier pattern excluded, but only within this rule set.

use crate::rules::compiler::{self, Pattern, PatternSource};
use crate::rules::document::PatternLine;
use std::path::{Component, Path, PathBuf};

/// Ordered compiled patterns for one base directory.
#[derive(Debug, Clone)]
pub struct RuleSet {
    base_dir: PathBuf,
    patterns: Vec<Pattern>,
    /// Substituted accept-all entry, not read from an explicit file
    implicit: bool,
}

impl RuleSet {
    /// Compile pattern lines in order, dropping lines that fail to compile.
    pub fn build(
        base_dir: impl Into<PathBuf>,
        lines: &[PatternLine],
        file: Option<&Path>,
    ) -> Self {
        let base_dir = base_dir.into();
        let mut patterns = Vec::with_capacity(lines.len());

        for line in lines {
            let source = match file {
                Some(path) => PatternSource::in_file(path, line.line),
                None => PatternSource::inline(line.line),
            };
            match compiler::compile(&line.text, source) {
                Ok(pattern) => patterns.push(pattern),
                Err(err) => {
                    tracing::debug!(
                        pattern = %line.text,
                        line = line.line,
                        file = ?file,
                        "dropping pattern that failed to compile: {err}"
                    );
                }
            }
        }

        Self {
            base_dir,
            patterns,
            implicit: false,
        }
    }

    /// Build from already-compiled patterns (used by the factory when one
    /// directory concatenates several ignore files).
    pub fn from_patterns(base_dir: impl Into<PathBuf>, patterns: Vec<Pattern>) -> Self {
        Self {
            base_dir: base_dir.into(),
            patterns,
            implicit: false,
        }
    }

    /// The implicit single-wildcard rule set substituted for a directory
    /// without an explicit include-only file.
    pub fn accept_all(base_dir: impl Into<PathBuf>) -> Self {
        let mut set = Self::build(
            base_dir,
            &[PatternLine {
                text: "*".to_string(),
                line: 0,
            }],
            None,
        );
        set.implicit = true;
        set
    }

    /// Evaluate a path against the patterns, in order, honoring anchoring,
    /// directory-only participation, and negation. Pure and deterministic.
    ///
    /// Paths outside `base_dir` (and `base_dir` itself) never match.
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        let Ok(rel) = path.strip_prefix(&self.base_dir) else {
            return false;
        };
        let rel = normalize_rel(rel);
        if rel.is_empty() {
            return false;
        }

        let mut verdict = false;
        for pattern in &self.patterns {
            if pattern.matches(&rel, is_dir) {
                verdict = !pattern.negated();
            }
        }
        tracing::trace!(
            path = %rel,
            base = %self.base_dir.display(),
            verdict,
            "rule set evaluated"
        );
        verdict
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True when this set was read from an explicit file rather than
    /// substituted as an accept-all placeholder.
    pub fn is_explicit(&self) -> bool {
        !self.implicit
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

/// Join normal path components with `/`, discarding any root or prefix.
pub(crate) fn normalize_rel(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}
