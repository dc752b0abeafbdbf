use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use cljcc::compile::{Classpath, CompilationUnit, CompileDriver, Toolchain};
use cljcc::errors::BuildError;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

fn unit(name: &str, path: &str) -> CompilationUnit {
    CompilationUnit {
        name: name.to_string(),
        path: PathBuf::from(path),
    }
}

fn set_mtime(path: &Path, ahead: Duration) -> TestResult {
    let file = fs::File::options().write(true).open(path)?;
    file.set_modified(SystemTime::now() + ahead)?;
    Ok(())
}

#[test]
fn duplicate_namespace_across_roots_is_a_conflict() -> TestResult {
    let units = vec![
        unit("foo.bar", "/proj/src-a/foo/bar.clj"),
        unit("foo.bar", "/proj/src-b/foo/bar.clj"),
    ];

    let err = CompileDriver::check_conflicts(&units).expect_err("duplicate must be fatal");

    match err {
        BuildError::Conflict {
            unit,
            first,
            second,
        } => {
            assert_eq!(unit, "foo.bar");
            assert_eq!(first, PathBuf::from("/proj/src-a/foo/bar.clj"));
            assert_eq!(second, PathBuf::from("/proj/src-b/foo/bar.clj"));
        }
        other => panic!("expected Conflict error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn distinct_namespaces_pass_the_conflict_check() -> TestResult {
    let units = vec![
        unit("foo.bar", "/proj/src-a/foo/bar.clj"),
        unit("foo.baz", "/proj/src-a/foo/baz.clj"),
    ];

    CompileDriver::check_conflicts(&units)?;
    Ok(())
}

#[test]
fn output_sentinel_mirrors_the_namespace_path() {
    let sentinel = CompileDriver::output_sentinel(Path::new("target/classes"), "app.db.core");
    assert_eq!(
        sentinel,
        Path::new("target/classes/app/db/core__init.class")
    );
}

#[test]
fn unit_without_compiled_output_is_stale() -> TestResult {
    let dir = TempDir::new()?;
    let src = dir.path().join("src/app/core.clj");
    fs::create_dir_all(src.parent().unwrap())?;
    fs::write(&src, b"(ns app.core)")?;

    let driver = CompileDriver::new(
        Toolchain::new("/opt/clojure"),
        dir.path().join("target/classes"),
        Vec::new(),
    );
    let units = vec![CompilationUnit {
        name: "app.core".to_string(),
        path: src,
    }];

    let stale = driver.stale_units(&units);
    assert_eq!(stale.len(), 1);
    Ok(())
}

#[test]
fn unit_with_fresh_output_is_not_stale_until_the_source_changes() -> TestResult {
    let dir = TempDir::new()?;
    let src = dir.path().join("src/app/core.clj");
    fs::create_dir_all(src.parent().unwrap())?;
    fs::write(&src, b"(ns app.core)")?;

    let target = dir.path().join("target/classes");
    let sentinel = target.join("app/core__init.class");
    fs::create_dir_all(sentinel.parent().unwrap())?;
    fs::write(&sentinel, b"class")?;
    set_mtime(&sentinel, Duration::from_secs(100))?;

    let driver = CompileDriver::new(Toolchain::new("/opt/clojure"), target, Vec::new());
    let units = vec![CompilationUnit {
        name: "app.core".to_string(),
        path: src.clone(),
    }];

    assert!(driver.stale_units(&units).is_empty());

    set_mtime(&src, Duration::from_secs(200))?;
    assert_eq!(driver.stale_units(&units).len(), 1);
    Ok(())
}

#[test]
fn one_invocation_carries_every_stale_namespace() -> TestResult {
    let target = PathBuf::from("/proj/target/classes");
    let driver = CompileDriver::new(Toolchain::new("/opt/clojure"), target.clone(), Vec::new());

    let mut classpath = Classpath::default();
    classpath.push("/deps/a.jar");

    let namespaces = vec![
        "app.core".to_string(),
        "app.db".to_string(),
        "app.web".to_string(),
    ];
    let args = driver.command_args(&classpath, &namespaces);

    // One argument list, one entrypoint, all namespaces as trailing args.
    assert_eq!(args[0], "-classpath");
    assert_eq!(
        args[2],
        format!("-Dclojure.compile.path={}", target.display())
    );
    assert_eq!(args[3], "clojure.lang.Compile");
    assert_eq!(&args[4..], &namespaces[..]);
    assert_eq!(
        args.iter().filter(|a| *a == "clojure.lang.Compile").count(),
        1
    );
    Ok(())
}

#[test]
fn target_directory_is_appended_last_to_the_classpath() -> TestResult {
    let target = PathBuf::from("/proj/target/classes");
    let driver = CompileDriver::new(Toolchain::new("/opt/clojure"), target.clone(), Vec::new());

    let mut classpath = Classpath::default();
    classpath.push("/deps/a.jar");
    classpath.push("/opt/clojure/clojure.jar");

    let args = driver.command_args(&classpath, &["app.core".to_string()]);
    let sep = if cfg!(windows) { ";" } else { ":" };

    assert!(args[1].ends_with(&format!("{sep}{}", target.display())));
    Ok(())
}

#[test]
fn missing_toolchain_env_var_is_a_configuration_error() -> TestResult {
    let err = Toolchain::from_env_var("CLJCC_TEST_UNSET_TOOLCHAIN_HOME")
        .expect_err("variable is not set");

    assert!(matches!(err, BuildError::Config(_)));
    assert!(err.aborts_watch());
    Ok(())
}

#[test]
fn runtime_jar_lives_under_the_toolchain_home() {
    let toolchain = Toolchain::new("/opt/clojure");
    assert_eq!(
        toolchain.runtime_jar(),
        PathBuf::from("/opt/clojure/clojure.jar")
    );
}
