//! Ignore-file document parsing
//!
//! One ignore file holds an ordered list of global pattern lines, optionally
//! interleaved with `[name]` profile sections. The same grammar serves both
//! the ignore files and the include-only files.

use std::collections::HashMap;

/// One pattern line with its position in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternLine {
    pub text: String,
    /// One-based line number in the originating file
    pub line: usize,
}

/// Parsed contents of a single ignore file.
#[derive(Debug, Clone, Default)]
pub struct ProfileDocument {
    global_patterns: Vec<PatternLine>,
    profiles: HashMap<String, Vec<PatternLine>>,
}

impl ProfileDocument {
    /// Parse an ignore file's text.
    ///
    /// Blank lines and `#` comments are skipped. A `[name]` line opens (or
    /// reopens) a named section; repeated headers with the same name append
    /// rather than replace. Lines before the first header are global.
    pub fn parse(text: &str) -> Self {
        let mut doc = ProfileDocument::default();
        let mut current: Option<String> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
                let name = line[1..line.len() - 1].to_string();
                doc.profiles.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let entry = PatternLine {
                text: line.to_string(),
                line: idx + 1,
            };
            match &current {
                // section vec was inserted when the header was seen
                Some(name) => {
                    if let Some(section) = doc.profiles.get_mut(name) {
                        section.push(entry);
                    }
                }
                None => doc.global_patterns.push(entry),
            }
        }

        doc
    }

    /// Pattern lines in effect for the given profile: the global lines
    /// followed by the selected section's lines, in file order.
    pub fn patterns_for(&self, profile: Option<&str>) -> Vec<PatternLine> {
        let mut lines = self.global_patterns.clone();
        if let Some(name) = profile {
            if let Some(section) = self.profiles.get(name) {
                lines.extend(section.iter().cloned());
            }
        }
        lines
    }

    pub fn global_patterns(&self) -> &[PatternLine] {
        &self.global_patterns
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.global_patterns.is_empty() && self.profiles.values().all(Vec::is_empty)
    }
}
