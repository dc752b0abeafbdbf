// src/compile/driver.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info};

use crate::compile::classpath::Classpath;
use crate::compile::scanner::CompilationUnit;
use crate::errors::{BuildError, Result};

/// Environment variable naming the runtime installation root.
pub const CLOJURE_HOME_VAR: &str = "CLOJURE_HOME";

/// Class the JVM is started with; it AOT-compiles every namespace named
/// on its command line.
const COMPILER_ENTRYPOINT: &str = "clojure.lang.Compile";

/// Location of the managed runtime toolchain.
#[derive(Debug, Clone)]
pub struct Toolchain {
    home: PathBuf,
}

impl Toolchain {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Locate the toolchain from `CLOJURE_HOME`.
    ///
    /// Absence is a configuration error raised at startup, before any
    /// filesystem scan; there is no silent default.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(CLOJURE_HOME_VAR)
    }

    pub fn from_env_var(var: &str) -> Result<Self> {
        match std::env::var_os(var) {
            Some(home) if !home.is_empty() => Ok(Self::new(PathBuf::from(home))),
            _ => Err(BuildError::Config(format!(
                "{var} is not set; it must point at the runtime installation root"
            ))),
        }
    }

    /// The fixed runtime library every classpath ends with.
    pub fn runtime_jar(&self) -> PathBuf {
        self.home.join("clojure.jar")
    }
}

/// Drives the compile step of one build: conflict check, staleness
/// selection, and a single external compiler invocation.
///
/// The full stale namespace list is decided before anything is spawned,
/// so the external toolchain runs at most once per build no matter how
/// many units need recompiling.
pub struct CompileDriver {
    toolchain: Toolchain,
    target: PathBuf,
    /// Namespaces to force-compile; empty means infer from staleness.
    forced: Vec<String>,
}

impl CompileDriver {
    pub fn new(toolchain: Toolchain, target: PathBuf, forced: Vec<String>) -> Self {
        Self {
            toolchain,
            target,
            forced,
        }
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Reject builds where two source files produce the same namespace.
    ///
    /// Duplicates across source roots likely diverge in content, so a
    /// silent pick between them is unacceptable; the check runs before
    /// any compiler process starts.
    pub fn check_conflicts(units: &[CompilationUnit]) -> Result<()> {
        let mut seen: BTreeMap<&str, &Path> = BTreeMap::new();
        for unit in units {
            if let Some(first) = seen.insert(unit.name.as_str(), unit.path.as_path()) {
                return Err(BuildError::Conflict {
                    unit: unit.name.clone(),
                    first: first.to_path_buf(),
                    second: unit.path.clone(),
                });
            }
        }
        Ok(())
    }

    /// Expected compiled output for a namespace: the `__init.class`
    /// sentinel under the target tree.
    pub fn output_sentinel(target: &Path, unit: &str) -> PathBuf {
        let mut path = target.to_path_buf();
        let mut segments = unit.split('.').collect::<Vec<_>>();
        let last = segments.pop().unwrap_or(unit);
        for segment in segments {
            path.push(segment);
        }
        path.push(format!("{last}__init.class"));
        path
    }

    /// Units whose compiled output is missing or older than the source.
    pub fn stale_units<'a>(&self, units: &'a [CompilationUnit]) -> Vec<&'a CompilationUnit> {
        units.iter().filter(|u| self.is_stale(u)).collect()
    }

    fn is_stale(&self, unit: &CompilationUnit) -> bool {
        let sentinel = Self::output_sentinel(&self.target, &unit.name);
        let Ok(out_meta) = std::fs::metadata(&sentinel) else {
            return true;
        };
        let Ok(src_meta) = std::fs::metadata(&unit.path) else {
            return true;
        };
        match (src_meta.modified(), out_meta.modified()) {
            (Ok(src), Ok(out)) => src > out,
            _ => true,
        }
    }

    /// Compose the argument list for the single compiler invocation.
    ///
    /// The target directory goes onto the end of the classpath here, so
    /// namespaces compiled moments earlier in this same build resolve.
    pub fn command_args(&self, classpath: &Classpath, namespaces: &[String]) -> Vec<String> {
        let mut classpath = classpath.clone();
        classpath.push(self.target.clone());

        let mut args = vec![
            "-classpath".to_string(),
            classpath.to_arg(),
            format!("-Dclojure.compile.path={}", self.target.display()),
            COMPILER_ENTRYPOINT.to_string(),
        ];
        args.extend(namespaces.iter().cloned());
        args
    }

    /// Run the compile step for the scanned units.
    ///
    /// Returns the names of every unit that is now present in the target
    /// tree (compiled this build or already current), for the resource
    /// mirror to skip. Skips the invocation entirely when nothing is
    /// stale and no namespaces are forced.
    pub async fn compile(
        &self,
        units: &[CompilationUnit],
        classpath: &Classpath,
    ) -> Result<Vec<String>> {
        Self::check_conflicts(units)?;

        let namespaces: Vec<String> = if self.forced.is_empty() {
            self.stale_units(units)
                .iter()
                .map(|u| u.name.clone())
                .collect()
        } else {
            self.forced.clone()
        };

        let done: Vec<String> = units.iter().map(|u| u.name.clone()).collect();

        if namespaces.is_empty() {
            info!("all namespaces up to date, compiler not invoked");
            return Ok(done);
        }

        std::fs::create_dir_all(&self.target)?;

        let args = self.command_args(classpath, &namespaces);
        info!("compiling {} namespace(s)", namespaces.len());
        debug!(?args, "compiler invocation");

        let output = Command::new("java")
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .context("spawning the compiler process (is `java` on PATH?)")?;

        if !output.status.success() {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(BuildError::Toolchain {
                code: output.status.code().unwrap_or(-1),
                output: text,
            });
        }

        Ok(done)
    }
}
