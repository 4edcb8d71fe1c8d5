//! Walker configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a [`DirectoryWalker`].
///
/// [`DirectoryWalker`]: crate::walk::DirectoryWalker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Ignore filenames looked up in every directory, in priority order;
    /// when several exist in one directory their patterns concatenate in
    /// this order
    pub ignore_filenames: Vec<String>,

    /// Include-only (allow-list) filenames, same ordering rules
    pub include_only_filenames: Vec<String>,

    /// Active profile: selects `[name]` sections in every parsed file
    pub profile: Option<String>,

    /// Flat glob blacklist matched against walk-root-relative paths;
    /// matching files and directories are excluded outright
    pub blacklist: Vec<String>,

    /// Flat glob whitelist; when non-empty, only matching files are
    /// yielded (directories are unaffected so nested matches stay reachable)
    pub whitelist: Vec<String>,

    /// Entry names that mark an ignore root above the walk root; ignore
    /// files between that root and the walk root are applied before entry
    pub root_markers: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            ignore_filenames: vec![".gitignore".to_string(), ".scopeignore".to_string()],
            include_only_filenames: vec![".scopeinclude".to_string()],
            profile: None,
            blacklist: Vec::new(),
            whitelist: Vec::new(),
            root_markers: vec![".git".to_string()],
        }
    }
}

impl WalkOptions {
    /// Load options from a TOML file. Missing keys fall back to defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }
}
