// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::errors::Result;
use crate::pipeline::BuildPipeline;
use crate::watch::patterns::WatchProfile;
use crate::watch::poller::{self, WatchState, poll};

/// The serial poll/detect/build loop.
///
/// One long-lived task drives the whole cycle: sleep for the configured
/// interval, poll, and on a non-empty change set run exactly one build
/// to completion before polling again. There is never more than one
/// build in flight; the loop structure enforces it without locks.
pub struct WatchLoop {
    project_root: PathBuf,
    roots: Vec<PathBuf>,
    profile: WatchProfile,
    frequency: Duration,
    source_ext: String,
}

impl WatchLoop {
    pub fn new(
        project_root: PathBuf,
        roots: Vec<PathBuf>,
        profile: WatchProfile,
        frequency: Duration,
        source_ext: String,
    ) -> Self {
        Self {
            project_root,
            roots,
            profile,
            frequency,
            source_ext,
        }
    }

    /// Run until externally terminated (the caller races this future
    /// against a Ctrl-C signal).
    ///
    /// Build failures other than configuration errors are logged and
    /// watching continues; the loop itself only stops on a
    /// configuration error.
    pub async fn run(&self, pipeline: &BuildPipeline) -> Result<()> {
        // Establish baseline: seed timestamps without triggering a build.
        let (mut state, _) = poll(&self.project_root, &self.roots, &self.profile, &WatchState::new())?;

        self.monitoring_banner();

        loop {
            tokio::time::sleep(self.frequency).await;

            let (next, changed) = match poll(&self.project_root, &self.roots, &self.profile, &state)
            {
                Ok(polled) => polled,
                Err(err) => {
                    error!(error = %err, "poll cycle failed, retrying next interval");
                    continue;
                }
            };
            state = next;

            if changed.is_empty() {
                continue;
            }

            for path in &changed {
                info!("detected changes in {}", self.display_path(path));
            }

            match pipeline.run_build().await {
                Ok(summary) => {
                    debug!(units = summary.units, mirrored = summary.mirrored, "build cycle done");
                }
                Err(err) if err.aborts_watch() => return Err(err),
                Err(err) => {
                    error!(error = %err, "build failed, watching for further changes");
                }
            }
        }
    }

    /// Startup banner naming the watched directories.
    fn monitoring_banner(&self) {
        let names: Vec<String> = self
            .roots
            .iter()
            .map(|root| self.display_path(root))
            .collect();

        if let [only] = names.as_slice() {
            info!("monitoring directory: {only}");
        } else {
            info!("monitoring directories: [{}]", names.join(", "));
        }
        debug!("monitoring extension: {}", self.source_ext);
    }

    /// Render a path relative to the project root where possible.
    fn display_path(&self, path: &Path) -> String {
        poller::relative_str(&self.project_root, path)
            .unwrap_or_else(|| path.display().to_string())
    }
}
