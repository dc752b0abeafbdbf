// src/pipeline.rs

//! The per-change-batch build pipeline.
//!
//! Each detected change batch runs this as a plain function call:
//! scan, conflict-check, mirror resources, assemble the classpath,
//! invoke the compiler once, mirror the source-tree leftovers. There is
//! no task-completion memoization in between; units and classpath are
//! rebuilt fresh on every call.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::compile::{ArtifactResolver, CompilationUnit, CompileDriver, assemble, mirror, scan};
use crate::errors::Result;

/// Everything a build needs, resolved once from the project file and
/// the environment.
pub struct BuildPipeline {
    pub source_roots: Vec<PathBuf>,
    pub resource_roots: Vec<PathBuf>,
    pub target: PathBuf,
    pub source_ext: String,
    pub dependencies: Vec<String>,
    pub resolver: Box<dyn ArtifactResolver + Send + Sync>,
    pub driver: CompileDriver,
}

/// What a completed build did.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildSummary {
    pub units: usize,
    pub mirrored: usize,
}

impl BuildPipeline {
    /// Run one full build cycle.
    ///
    /// The duplicate-namespace check runs before anything is written to
    /// the target tree, so a conflicting build leaves prior output
    /// untouched.
    pub async fn run_build(&self) -> Result<BuildSummary> {
        let mut units: Vec<CompilationUnit> = Vec::new();
        for root in &self.source_roots {
            units.extend(scan(root, &self.source_ext)?);
        }
        debug!(units = units.len(), "scanned source roots");

        CompileDriver::check_conflicts(&units)?;

        // Resources step, ahead of compilation as the change handler
        // runs it upstream of the compile task.
        let no_units = BTreeSet::new();
        let mut mirrored = 0;
        for root in &self.resource_roots {
            mirrored += mirror(root, &self.target, &no_units, &self.source_ext)?;
        }

        let classpath = assemble(
            &self.dependencies,
            self.resolver.as_ref(),
            &self.source_roots,
            &self.driver.toolchain().runtime_jar(),
        )?;
        debug!(classpath = %classpath, "assembled classpath");

        let done: BTreeSet<String> = self
            .driver
            .compile(&units, &classpath)
            .await?
            .into_iter()
            .collect();

        // Non-unit files living under the source roots follow the
        // resources into the target tree.
        for root in &self.source_roots {
            mirrored += mirror(root, &self.target, &done, &self.source_ext)?;
        }

        info!(units = done.len(), mirrored, "build finished");
        Ok(BuildSummary {
            units: done.len(),
            mirrored,
        })
    }
}
