// src/lib.rs

pub mod cli;
pub mod compile;
pub mod config;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod watch;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::cli::CliArgs;
use crate::compile::{CompileDriver, LocalRepoResolver, Toolchain};
use crate::config::load_and_validate;
use crate::config::model::ProjectFile;
use crate::errors::Result;
use crate::pipeline::BuildPipeline;
use crate::watch::{WatchLoop, build_watch_profile};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - project file loading
/// - toolchain lookup from the environment (before any scan)
/// - the build pipeline
/// - (optional) the polling watch loop
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let project = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&project);
        return Ok(());
    }

    let toolchain = Toolchain::from_env()?;

    let root_dir = project_root_dir(&config_path);
    let source_roots: Vec<PathBuf> = project
        .compile
        .source_roots
        .iter()
        .map(|r| root_dir.join(r))
        .collect();
    let resource_roots: Vec<PathBuf> = project
        .resources
        .roots
        .iter()
        .map(|r| root_dir.join(r))
        .collect();
    let target = root_dir.join(&project.compile.target);

    let driver = CompileDriver::new(toolchain, target.clone(), project.compile.libs.clone());
    let resolver = LocalRepoResolver::new(
        project
            .dependencies
            .repository
            .as_ref()
            .map(|r| root_dir.join(r)),
    );

    let pipeline = BuildPipeline {
        source_roots: source_roots.clone(),
        resource_roots: resource_roots.clone(),
        target,
        source_ext: project.compile.source_ext.clone(),
        dependencies: project.dependencies.artifacts.clone(),
        resolver: Box::new(resolver),
        driver,
    };

    info!(project = %project.project.name, "cljcc started");

    if args.once {
        pipeline.run_build().await?;
        return Ok(());
    }

    let profile = build_watch_profile(
        &project.compile.source_roots,
        &project.resources.roots,
        &project.compile.source_ext,
        &project.watch.exclude,
    )?;

    let mut watch_roots = source_roots;
    watch_roots.extend(resource_roots);

    let watcher = WatchLoop::new(
        root_dir,
        watch_roots,
        profile,
        Duration::from_millis(project.watch.frequency_ms),
        project.compile.source_ext.clone(),
    );

    tokio::select! {
        res = watcher.run(&pipeline) => res,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted, shutting down");
            Ok(())
        }
    }
}

/// Figure out the project root directory.
/// Currently: directory containing the project file, or `.`.
fn project_root_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Simple dry-run output: print the resolved project settings.
fn print_dry_run(project: &ProjectFile) {
    println!("cljcc dry-run");
    println!("  project.name = {}", project.project.name);
    println!();

    println!("compile:");
    println!("  source_roots: {:?}", project.compile.source_roots);
    println!("  target: {}", project.compile.target);
    println!("  source_ext: {}", project.compile.source_ext);
    if !project.compile.libs.is_empty() {
        println!("  libs: {:?}", project.compile.libs);
    }

    println!("resources:");
    println!("  roots: {:?}", project.resources.roots);

    println!("watch:");
    println!("  frequency_ms: {}", project.watch.frequency_ms);
    if !project.watch.exclude.is_empty() {
        println!("  exclude: {:?}", project.watch.exclude);
    }

    if !project.dependencies.artifacts.is_empty() {
        println!("dependencies:");
        println!("  artifacts: {:?}", project.dependencies.artifacts);
        if let Some(ref repo) = project.dependencies.repository {
            println!("  repository: {repo}");
        }
    }
}
