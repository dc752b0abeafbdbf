// src/config/model.rs

use serde::Deserialize;

/// Top-level project file as read from `Cljcc.toml`.
///
/// This is a direct mapping of the on-disk format:
///
/// ```toml
/// [project]
/// name = "myapp"
///
/// [compile]
/// source_roots = ["src/main/clojure"]
/// target = "target/classes"
/// libs = []
///
/// [resources]
/// roots = ["src/main/resources"]
///
/// [watch]
/// frequency_ms = 200
///
/// [dependencies]
/// artifacts = ["org.clojure:data.json:2.4.0", "lib/extra.jar"]
/// repository = ".repo"
/// ```
///
/// All sections except `[project]` are optional and have defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFile {
    /// Project identity from `[project]`.
    pub project: ProjectSection,

    /// Compilation settings from `[compile]`.
    #[serde(default)]
    pub compile: CompileSection,

    /// Resource roots from `[resources]`.
    #[serde(default)]
    pub resources: ResourcesSection,

    /// Watch loop settings from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,

    /// Dependency artifacts from `[dependencies]`.
    #[serde(default)]
    pub dependencies: DependenciesSection,
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    /// Project name, used in log output.
    pub name: String,
}

/// `[compile]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileSection {
    /// Directories scanned for compilation units. Order matters: these
    /// also end up on the classpath in this order.
    #[serde(default = "default_source_roots")]
    pub source_roots: Vec<String>,

    /// Output directory for compiled classes and mirrored resources.
    #[serde(default = "default_target")]
    pub target: String,

    /// Namespaces to force-compile on every build.
    ///
    /// When empty, the set is inferred by scanning the source roots and
    /// comparing modification times against the target tree.
    #[serde(default)]
    pub libs: Vec<String>,

    /// Extension of compilable source files.
    #[serde(default = "default_source_ext")]
    pub source_ext: String,
}

fn default_source_roots() -> Vec<String> {
    vec!["src/main/clojure".to_string()]
}

fn default_target() -> String {
    "target/classes".to_string()
}

fn default_source_ext() -> String {
    "clj".to_string()
}

impl Default for CompileSection {
    fn default() -> Self {
        Self {
            source_roots: default_source_roots(),
            target: default_target(),
            libs: Vec::new(),
            source_ext: default_source_ext(),
        }
    }
}

/// `[resources]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourcesSection {
    /// Directories whose files are mirrored verbatim into the target
    /// tree. Watched alongside the source roots.
    #[serde(default = "default_resource_roots")]
    pub roots: Vec<String>,
}

fn default_resource_roots() -> Vec<String> {
    vec!["src/main/resources".to_string()]
}

impl Default for ResourcesSection {
    fn default() -> Self {
        Self {
            roots: default_resource_roots(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Poll interval in milliseconds.
    #[serde(default = "default_frequency_ms")]
    pub frequency_ms: u64,

    /// Glob patterns (relative to the project root) excluded from
    /// watching, e.g. `["src/**/*_scratch.clj"]`.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_frequency_ms() -> u64 {
    200
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            frequency_ms: default_frequency_ms(),
            exclude: Vec::new(),
        }
    }
}

/// `[dependencies]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DependenciesSection {
    /// Classpath dependencies, in shadowing order. Each entry is either
    /// a filesystem path or a `group:artifact:version` descriptor to be
    /// resolved against `repository`.
    #[serde(default)]
    pub artifacts: Vec<String>,

    /// Local artifact repository root (Maven layout). Required when
    /// `artifacts` contains descriptors rather than plain paths.
    #[serde(default)]
    pub repository: Option<String>,
}
