//! Flat blacklist / whitelist filtering
//!
//! Alongside the per-directory ignore files, a walker carries two flat glob
//! lists configured up front. Both match against the walk-root-relative path
//! with `/` separators, compiled once into `GlobSet`s.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiled blacklist and whitelist for one walker.
#[derive(Debug)]
pub struct ListFilter {
    blacklist: GlobSet,
    /// `None` when no whitelist is configured (all files pass)
    whitelist: Option<GlobSet>,
}

impl ListFilter {
    pub fn new(blacklist: &[String], whitelist: &[String]) -> Result<Self> {
        let blacklist = build_globset(blacklist).context("invalid blacklist pattern")?;
        let whitelist = if whitelist.is_empty() {
            None
        } else {
            Some(build_globset(whitelist).context("invalid whitelist pattern")?)
        };
        Ok(Self {
            blacklist,
            whitelist,
        })
    }

    /// Blacklisted paths are excluded outright; applies to files and
    /// directories, so blacklisted subtrees prune early.
    pub fn is_blacklisted(&self, rel_path: &str) -> bool {
        !rel_path.is_empty() && self.blacklist.is_match(rel_path)
    }

    /// Whitelist check for files. Directories are not constrained by the
    /// whitelist so the walk can still reach nested matches.
    pub fn passes_whitelist(&self, rel_path: &str) -> bool {
        match &self.whitelist {
            Some(set) => set.is_match(rel_path),
            None => true,
        }
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid glob pattern '{pattern}'"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
