//! Pattern compilation
//!
//! Responsibilities:
//! - Turn one raw ignore-file line into a compiled [`Pattern`]
//! - Strip and record the `!` negation prefix and trailing `/` directory marker
//! - Detect anchoring (any interior or leading `/`)
//! - Translate glob syntax (`**`, `*`, `?`, `[...]`, `\` escapes) into a regex
//!
//! Matching is performed against paths normalized to forward slashes with no
//! leading separator. A line that fails to compile yields an error the caller
//! drops; it never aborts the containing file.

use crate::error::PatternError;
use regex::Regex;
use std::path::PathBuf;

/// Where a pattern line came from, for diagnostics.
#[derive(Debug, Clone)]
pub struct PatternSource {
    /// Ignore file the line was read from, `None` for directly supplied lines
    pub file: Option<PathBuf>,
    /// One-based line number within the source
    pub line: usize,
}

impl PatternSource {
    /// A pattern supplied directly by the caller rather than read from a file
    pub fn inline(line: usize) -> Self {
        Self { file: None, line }
    }

    pub fn in_file(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: Some(file.into()),
            line,
        }
    }
}

/// One compiled ignore pattern. Immutable once built.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// The original line, before any stripping
    raw: String,
    /// Compiled matcher for the translated glob
    regex: Regex,
    /// `!`-prefixed: a match re-admits the path instead of excluding it
    negated: bool,
    /// Trailing `/`: only matches directories and anything beneath them
    directory_only: bool,
    /// Contains a `/`: must match starting at the rule set's base directory
    anchored: bool,
    source: PatternSource,
}

/// Compile a single non-blank, non-comment line.
///
/// The caller is expected to have trimmed whitespace and filtered out blank
/// and `#`-comment lines already.
pub fn compile(line: &str, source: PatternSource) -> Result<Pattern, PatternError> {
    let raw = line.to_string();

    let (negated, mut text) = match line.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, line),
    };
    if text.is_empty() {
        return Err(PatternError::Empty);
    }

    let directory_only = text.ends_with('/') && !ends_with_escaped_slash(text);
    if directory_only {
        text = &text[..text.len() - 1];
    }

    let anchored = text.contains('/');
    let text = text.strip_prefix('/').unwrap_or(text);
    if text.is_empty() {
        return Err(PatternError::Empty);
    }

    let translated = translate(text)?;
    let regex = Regex::new(&format!("^(?:{translated})$"))?;

    Ok(Pattern {
        raw,
        regex,
        negated,
        directory_only,
        anchored,
        source,
    })
}

impl Pattern {
    /// Test the pattern against a normalized relative path.
    ///
    /// `rel_path` must use `/` separators and carry no leading separator;
    /// `is_dir` says whether the path is known to be a directory, which
    /// directory-only patterns require for a final-segment match.
    ///
    /// Anchored patterns match from the first segment; unanchored patterns
    /// are segment-local and test the final segment (directory-only patterns
    /// additionally cover everything beneath a matching directory segment).
    pub fn matches(&self, rel_path: &str, is_dir: bool) -> bool {
        if rel_path.is_empty() {
            return false;
        }

        if self.anchored {
            if self.regex.is_match(rel_path) && (!self.directory_only || is_dir) {
                return true;
            }
            if self.directory_only {
                // A matching enclosing directory covers everything below it
                for (pos, ch) in rel_path.char_indices() {
                    if ch == '/' && self.regex.is_match(&rel_path[..pos]) {
                        return true;
                    }
                }
            }
            false
        } else {
            let last = rel_path.rsplit('/').next().unwrap_or(rel_path);
            if self.regex.is_match(last) && (!self.directory_only || is_dir) {
                return true;
            }
            if self.directory_only {
                let mut segments = rel_path.split('/').peekable();
                while let Some(segment) = segments.next() {
                    // final segment was already tested above
                    if segments.peek().is_none() {
                        break;
                    }
                    if self.regex.is_match(segment) {
                        return true;
                    }
                }
            }
            false
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn negated(&self) -> bool {
        self.negated
    }

    pub fn directory_only(&self) -> bool {
        self.directory_only
    }

    pub fn anchored(&self) -> bool {
        self.anchored
    }

    pub fn source(&self) -> &PatternSource {
        &self.source
    }
}

/// A trailing `/` preceded by an odd number of backslashes is escaped and
/// does not mark a directory-only pattern.
fn ends_with_escaped_slash(text: &str) -> bool {
    let before_slash = &text[..text.len() - 1];
    let backslashes = before_slash
        .chars()
        .rev()
        .take_while(|&c| c == '\\')
        .count();
    backslashes % 2 == 1
}

/// Translate a stripped glob into a regex fragment.
///
/// `**` spans zero or more path segments when it sits on a segment boundary
/// and degrades to `*` elsewhere; `*` and `?` never cross a `/`.
fn translate(glob: &str) -> Result<String, PatternError> {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let Some(&next) = chars.get(i + 1) else {
                    return Err(PatternError::TrailingEscape);
                };
                push_literal(&mut out, next);
                i += 2;
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                let on_boundary = i == 0 || chars[i - 1] == '/';
                match (on_boundary, chars.get(i + 2)) {
                    // leading or interior `**/` spans zero or more segments
                    (true, Some('/')) => {
                        out.push_str("(?:.*/)?");
                        i += 3;
                    }
                    // trailing `**` swallows the rest of the path
                    (true, None) => {
                        out.push_str(".*");
                        i += 2;
                    }
                    _ => {
                        out.push_str("[^/]*");
                        i += 2;
                    }
                }
            }
            '*' => {
                out.push_str("[^/]*");
                i += 1;
            }
            '?' => {
                out.push_str("[^/]");
                i += 1;
            }
            '[' => {
                i = translate_class(&chars, i, &mut out)?;
            }
            '/' => {
                out.push('/');
                i += 1;
            }
            c => {
                push_literal(&mut out, c);
                i += 1;
            }
        }
    }

    Ok(out)
}

/// Copy a `[...]` character class, mapping a leading `!` to regex `^`.
/// Returns the index just past the closing `]`.
fn translate_class(chars: &[char], open: usize, out: &mut String) -> Result<usize, PatternError> {
    let mut class = String::from("[");
    let mut j = open + 1;

    if let Some(&c) = chars.get(j) {
        if c == '!' || c == '^' {
            class.push('^');
            j += 1;
        }
    }
    // a `]` right after the opening (or the negation) is a literal member
    if chars.get(j) == Some(&']') {
        class.push_str("\\]");
        j += 1;
    }

    let mut closed = false;
    while j < chars.len() {
        let c = chars[j];
        if c == ']' {
            closed = true;
            j += 1;
            break;
        }
        match c {
            '\\' => {
                let Some(&next) = chars.get(j + 1) else {
                    return Err(PatternError::TrailingEscape);
                };
                class.push('\\');
                class.push(next);
                j += 2;
                continue;
            }
            '[' => class.push_str("\\["),
            other => class.push(other),
        }
        j += 1;
    }
    if !closed {
        return Err(PatternError::UnterminatedClass);
    }

    class.push(']');
    out.push_str(&class);
    Ok(j)
}

fn push_literal(out: &mut String, c: char) {
    if ".+*?()|[]{}^$\\".contains(c) {
        out.push('\\');
    }
    out.push(c);
}
