// src/config/validate.rs

use globset::Glob;

use crate::config::model::ProjectFile;
use crate::errors::{BuildError, Result};

/// Run basic semantic validation against a loaded project file.
///
/// This checks:
/// - at least one source root is configured
/// - the poll frequency is non-zero
/// - the target directory is non-empty
/// - dependency entries are non-empty strings
/// - exclude patterns are valid globs
///
/// It does **not** check that the roots exist on disk; a missing root is
/// tolerated by the scanner and the watcher alike.
pub fn validate_project(project: &ProjectFile) -> Result<()> {
    ensure_compile_roots(project)?;
    ensure_watch_settings(project)?;
    ensure_dependencies(project)?;
    Ok(())
}

fn ensure_compile_roots(project: &ProjectFile) -> Result<()> {
    if project.compile.source_roots.is_empty() {
        return Err(BuildError::Config(
            "[compile].source_roots must name at least one directory".to_string(),
        ));
    }
    if project.compile.target.trim().is_empty() {
        return Err(BuildError::Config(
            "[compile].target must not be empty".to_string(),
        ));
    }
    if project.compile.source_ext.trim().is_empty() {
        return Err(BuildError::Config(
            "[compile].source_ext must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn ensure_watch_settings(project: &ProjectFile) -> Result<()> {
    if project.watch.frequency_ms == 0 {
        return Err(BuildError::Config(
            "[watch].frequency_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    for pattern in &project.watch.exclude {
        Glob::new(pattern).map_err(|e| {
            BuildError::Config(format!("invalid [watch].exclude glob {pattern:?}: {e}"))
        })?;
    }
    Ok(())
}

fn ensure_dependencies(project: &ProjectFile) -> Result<()> {
    for artifact in &project.dependencies.artifacts {
        if artifact.trim().is_empty() {
            return Err(BuildError::Config(
                "[dependencies].artifacts contains an empty entry".to_string(),
            ));
        }
    }
    Ok(())
}
