// src/compile/resources.rs

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::compile::scanner;
use crate::errors::Result;

/// Mirror non-compiled files from `source_root` into `target_root`.
///
/// Files with the source extension whose logical name is in
/// `done_units` were produced by the compiler and are skipped; every
/// other file is copied to the equivalent relative path, creating
/// intermediate directories as needed. A file is rewritten only when
/// the target copy is missing or older than the source, so re-running
/// on an unchanged tree touches nothing.
///
/// Returns the number of files copied.
pub fn mirror(
    source_root: &Path,
    target_root: &Path,
    done_units: &BTreeSet<String>,
    source_ext: &str,
) -> Result<usize> {
    let mut copied = 0;
    if !source_root.is_dir() {
        return Ok(copied);
    }

    for entry in WalkDir::new(source_root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) == Some(source_ext) {
            if let Some(name) = scanner::unit_name(source_root, path) {
                if done_units.contains(&name) {
                    continue;
                }
            }
        }

        let Ok(rel) = path.strip_prefix(source_root) else {
            continue;
        };
        let dest = target_root.join(rel);

        if up_to_date(path, &dest) {
            continue;
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
        debug!(from = %path.display(), to = %dest.display(), "mirrored resource");
        copied += 1;
    }

    Ok(copied)
}

fn up_to_date(source: &Path, dest: &Path) -> bool {
    let (Ok(src), Ok(dst)) = (fs::metadata(source), fs::metadata(dest)) else {
        return false;
    };
    match (src.modified(), dst.modified()) {
        (Ok(s), Ok(d)) => d >= s,
        _ => false,
    }
}
