// src/watch/poller.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::errors::Result;
use crate::watch::patterns::WatchProfile;

/// Last observed modification time for every watched file.
///
/// Threaded explicitly through each [`poll`] call and replaced wholesale
/// each cycle; there is no hidden singleton behind it.
pub type WatchState = BTreeMap<PathBuf, SystemTime>;

/// Paths observed as new, newer or gone in one poll cycle, sorted.
pub type ChangeSet = Vec<PathBuf>;

/// Poll the watched roots once.
///
/// Pure with respect to `state`: walks every root, keeps paths matching
/// `profile`, and returns the replacement state plus the set of paths
/// whose recorded timestamp increased or that were previously unknown.
/// The first call against an empty state is the baseline: it seeds the
/// timestamps and reports no changes, no matter how many files match.
///
/// A path recorded in `state` that no longer exists on disk is reported
/// as changed and dropped from the new state, so deletions trigger a
/// build too.
pub fn poll(
    project_root: &Path,
    roots: &[PathBuf],
    profile: &WatchProfile,
    state: &WatchState,
) -> Result<(WatchState, ChangeSet)> {
    let baseline = state.is_empty();
    let mut next = WatchState::new();
    let mut changed: ChangeSet = Vec::new();

    for root in roots {
        if !root.is_dir() {
            continue;
        }
        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let Some(rel) = relative_str(project_root, path) else {
                continue;
            };
            if !profile.matches(&rel) {
                continue;
            }
            // A file deleted between the walk and the stat just drops
            // out; the next cycle reports it as gone.
            let Ok(meta) = entry.metadata() else { continue };
            let Ok(mtime) = meta.modified() else { continue };

            let is_change = match state.get(path) {
                Some(prev) => mtime > *prev,
                None => true,
            };
            if is_change && !baseline {
                changed.push(path.to_path_buf());
            }
            next.insert(path.to_path_buf(), mtime);
        }
    }

    // Disappeared paths: known last cycle, not seen in this one.
    for path in state.keys() {
        if !next.contains_key(path) {
            changed.push(path.clone());
        }
    }

    changed.sort();
    changed.dedup();
    Ok((next, changed))
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Returns `None` if the path is not under `root` and cannot be
/// relativized.
pub(crate) fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let s = rel.to_string_lossy().replace('\\', "/");
    Some(s)
}
