// src/compile/scanner.rs

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::Result;

/// One logical namespace attributed to exactly one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Dotted namespace name, e.g. `app.core`.
    pub name: String,
    /// Source file the name was derived from.
    pub path: PathBuf,
}

/// Scan a source root for compilation units.
///
/// Every file with the source extension contributes one unit, named by
/// the dot-joined path segments from `root` to the file with the
/// extension stripped (`a/b/c.clj` becomes `a.b.c`). Other files are
/// the resource mirror's concern and are ignored here. Symbolic links
/// are not followed, so link cycles cannot recurse. A missing or empty
/// root yields an empty result, not an error.
pub fn scan(root: &Path, source_ext: &str) -> Result<Vec<CompilationUnit>> {
    let mut units = Vec::new();
    if !root.is_dir() {
        return Ok(units);
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
        if path.extension().and_then(|e| e.to_str()) != Some(source_ext) {
            continue;
        }
        if let Some(name) = unit_name(root, path) {
            units.push(CompilationUnit {
                name,
                path: path.to_path_buf(),
            });
        }
    }

    units.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(units)
}

/// Derive the dotted logical name for a source file under `root`.
///
/// Returns `None` when the path is not under `root` or a segment is not
/// valid UTF-8.
pub(crate) fn unit_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let stem = rel.file_stem()?.to_str()?;

    let mut segments: Vec<&str> = Vec::new();
    for component in rel.parent().into_iter().flat_map(|p| p.components()) {
        segments.push(component.as_os_str().to_str()?);
    }
    segments.push(stem);

    Some(segments.join("."))
}
