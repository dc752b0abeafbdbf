// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiled include/exclude globs for the watched tree.
///
/// The patterns are evaluated against paths relative to the project
/// root, with forward slashes (e.g. `"src/main/clojure/app/core.clj"`).
#[derive(Clone)]
pub struct WatchProfile {
    include_set: GlobSet,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for WatchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchProfile").finish_non_exhaustive()
    }
}

impl WatchProfile {
    /// Returns true if the given path (relative to the project root)
    /// belongs to the watched set.
    pub fn matches(&self, rel_path: &str) -> bool {
        if !self.include_set.is_match(rel_path) {
            return false;
        }
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

/// Build the watch profile for a project.
///
/// Source roots contribute `<root>/**/*.<ext>` (only compilable sources
/// trigger recompilation); resource roots contribute `<root>/**/*`
/// (every file under them is a resource). User `exclude` globs are
/// applied on top of both.
pub fn build_watch_profile(
    source_roots: &[String],
    resource_roots: &[String],
    source_ext: &str,
    exclude: &[String],
) -> Result<WatchProfile> {
    let mut include = Vec::with_capacity(source_roots.len() + resource_roots.len());
    for root in source_roots {
        include.push(format!("{}/**/*.{}", root.trim_end_matches('/'), source_ext));
    }
    for root in resource_roots {
        include.push(format!("{}/**/*", root.trim_end_matches('/')));
    }

    let include_set = build_globset(&include).context("building watch globset")?;

    let exclude_set = if exclude.is_empty() {
        None
    } else {
        Some(build_globset(exclude).context("building exclude globset")?)
    };

    Ok(WatchProfile {
        include_set,
        exclude_set,
    })
}

/// Build a GlobSet from simple string patterns.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
