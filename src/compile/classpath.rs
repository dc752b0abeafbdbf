// src/compile/classpath.rs

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{BuildError, Result};

/// Resolves a dependency descriptor to a concrete on-disk path.
///
/// Materializing the artifact (downloading, unpacking) is the
/// collaborator's business; from here it is a blocking call that either
/// yields a filesystem path or fails the current build.
pub trait ArtifactResolver {
    fn resolve(&self, descriptor: &str) -> Result<PathBuf>;
}

/// Resolver backed by a Maven-layout local repository.
///
/// `group:artifact:version` maps to
/// `<repository>/<group path>/<artifact>/<version>/<artifact>-<version>.jar`.
/// Entries that already name an existing file or directory pass through
/// untouched.
#[derive(Debug, Clone)]
pub struct LocalRepoResolver {
    repository: Option<PathBuf>,
}

impl LocalRepoResolver {
    pub fn new(repository: Option<PathBuf>) -> Self {
        Self { repository }
    }
}

impl ArtifactResolver for LocalRepoResolver {
    fn resolve(&self, descriptor: &str) -> Result<PathBuf> {
        let as_path = Path::new(descriptor);
        if as_path.exists() {
            return Ok(as_path.to_path_buf());
        }

        let mut parts = descriptor.split(':');
        let (Some(group), Some(artifact), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(BuildError::Resolution {
                descriptor: descriptor.to_string(),
                reason: "not an existing path and not a group:artifact:version descriptor"
                    .to_string(),
            });
        };

        let Some(repository) = &self.repository else {
            return Err(BuildError::Resolution {
                descriptor: descriptor.to_string(),
                reason: "no [dependencies].repository configured".to_string(),
            });
        };

        let jar = repository
            .join(group.replace('.', "/"))
            .join(artifact)
            .join(version)
            .join(format!("{artifact}-{version}.jar"));

        if jar.is_file() {
            debug!(descriptor, path = %jar.display(), "resolved dependency");
            Ok(jar)
        } else {
            Err(BuildError::Resolution {
                descriptor: descriptor.to_string(),
                reason: format!("artifact not present at {}", jar.display()),
            })
        }
    }
}

/// Ordered classpath; earlier entries shadow later ones at lookup time,
/// matching the runtime's semantics. Duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct Classpath {
    entries: Vec<PathBuf>,
}

impl Classpath {
    pub fn push(&mut self, entry: impl Into<PathBuf>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Render with the platform path-list separator.
    ///
    /// The result is meant to be passed as a single argv element, which
    /// keeps paths with spaces intact without any shell quoting.
    pub fn to_arg(&self) -> String {
        let sep = if cfg!(windows) { ";" } else { ":" };
        self.entries
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl fmt::Display for Classpath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_arg())
    }
}

/// Assemble the compile classpath.
///
/// Order: resolved dependencies, then the source roots (for in-tree
/// lookups), then the fixed runtime jar. The driver appends the target
/// directory last so classes compiled earlier in the same build stay
/// visible to later namespaces.
pub fn assemble(
    dependencies: &[String],
    resolver: &dyn ArtifactResolver,
    source_roots: &[PathBuf],
    runtime_jar: &Path,
) -> Result<Classpath> {
    let mut classpath = Classpath::default();

    for descriptor in dependencies {
        classpath.push(resolver.resolve(descriptor)?);
    }
    for root in source_roots {
        classpath.push(root.clone());
    }
    classpath.push(runtime_jar.to_path_buf());

    Ok(classpath)
}
