// src/config/mod.rs

//! Project configuration loading and validation for cljcc.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a project file from disk (`loader.rs`).
//! - Validate basic invariants like non-empty roots and sane poll
//!   frequency (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{
    CompileSection, DependenciesSection, ProjectFile, ProjectSection, ResourcesSection,
    WatchSection,
};
pub use validate::validate_project;
