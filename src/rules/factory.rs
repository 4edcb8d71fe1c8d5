//! Rule set construction for one directory
//!
//! Given a directory, the configured filenames, and the active profile, the
//! factory reads and parses whatever ignore and include-only files exist
//! there and compiles them into rule sets. Unreadable files contribute zero
//! patterns; a directory with no include-only patterns gets the implicit
//! accept-all substitute.

use crate::config::WalkOptions;
use crate::fs::Filesystem;
use crate::rules::compiler::{self, Pattern, PatternSource};
use crate::rules::document::ProfileDocument;
use crate::rules::ruleset::RuleSet;
use std::io;
use std::path::Path;

pub struct RuleSetFactory<'a, F: Filesystem> {
    fs: &'a F,
    options: &'a WalkOptions,
}

impl<'a, F: Filesystem> RuleSetFactory<'a, F> {
    pub fn new(fs: &'a F, options: &'a WalkOptions) -> Self {
        Self { fs, options }
    }

    /// The ignore rule set for `dir`, or `None` when no configured ignore
    /// file contributed a pattern (the stack treats both the same).
    pub fn ignore_rules(&self, dir: &Path) -> Option<RuleSet> {
        let patterns = self.collect(dir, &self.options.ignore_filenames);
        if patterns.is_empty() {
            None
        } else {
            Some(RuleSet::from_patterns(dir, patterns))
        }
    }

    /// The include-only rule set for `dir`. Always non-empty: either the
    /// explicit file contents or the implicit accept-all substitute. An
    /// include-only file with no effective patterns does not activate the
    /// feature and also gets the substitute.
    pub fn include_rules(&self, dir: &Path) -> RuleSet {
        let patterns = self.collect(dir, &self.options.include_only_filenames);
        if patterns.is_empty() {
            RuleSet::accept_all(dir)
        } else {
            RuleSet::from_patterns(dir, patterns)
        }
    }

    /// Parse each configured filename that exists in `dir`, in the fixed
    /// configured order, concatenating the surviving compiled patterns.
    fn collect(&self, dir: &Path, filenames: &[String]) -> Vec<Pattern> {
        let mut patterns = Vec::new();

        for name in filenames {
            let path = dir.join(name);
            let text = match self.fs.read_text_file(&path) {
                Ok(text) => text,
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        "ignore file unreadable, contributing zero patterns: {err}"
                    );
                    continue;
                }
            };

            let document = ProfileDocument::parse(&text);
            let lines = document.patterns_for(self.options.profile.as_deref());
            for line in &lines {
                let source = PatternSource::in_file(&path, line.line);
                match compiler::compile(&line.text, source) {
                    Ok(pattern) => patterns.push(pattern),
                    Err(err) => {
                        tracing::debug!(
                            pattern = %line.text,
                            line = line.line,
                            path = %path.display(),
                            "dropping pattern that failed to compile: {err}"
                        );
                    }
                }
            }
        }

        patterns
    }
}
