// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::model::ProjectFile;
use crate::config::validate::validate_project;
use crate::errors::Result;

/// Load a project file from a given path and return the raw `ProjectFile`.
///
/// This only performs TOML deserialization; it does **not** perform
/// semantic validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ProjectFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading project file at {:?}", path))?;

    let project: ProjectFile = toml::from_str(&contents)?;

    Ok(project)
}

/// Load a project file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - empty source/resource root lists,
///   - a zero poll frequency,
///   - malformed dependency descriptors and exclude globs.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ProjectFile> {
    let project = load_from_path(&path)?;
    validate_project(&project)?;
    Ok(project)
}

/// Helper to resolve a default project file path.
///
/// Currently this just returns `Cljcc.toml` in the current working
/// directory; the CLI default points at the same place.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Cljcc.toml")
}
