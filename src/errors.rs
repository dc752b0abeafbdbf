// src/errors.rs

//! Crate-wide error taxonomy.
//!
//! Every fatal condition names the offending path, namespace or
//! dependency descriptor. Only [`BuildError::Config`] stops the watch
//! loop; the remaining variants are fatal for a single build cycle and
//! the loop resumes polling afterwards.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("duplicate namespace {unit}: defined by both {} and {}", .first.display(), .second.display())]
    Conflict {
        unit: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("compiler exited with status {code}:\n{output}")]
    Toolchain { code: i32, output: String },

    #[error("cannot resolve dependency {descriptor}: {reason}")]
    Resolution { descriptor: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BuildError {
    /// Whether this error must stop the watch loop rather than just the
    /// current build cycle.
    pub fn aborts_watch(&self) -> bool {
        matches!(self, BuildError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
