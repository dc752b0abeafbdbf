use std::collections::BTreeSet;
use std::error::Error;
use std::fs;

use cljcc::compile::mirror;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn non_source_file_is_copied_with_directories_created() -> TestResult {
    let dir = TempDir::new()?;
    let source = dir.path().join("src");
    let target = dir.path().join("target/classes");
    fs::create_dir_all(source.join("x/y"))?;
    fs::write(source.join("x/y/readme.txt"), b"hello")?;

    let copied = mirror(&source, &target, &BTreeSet::new(), "clj")?;

    assert_eq!(copied, 1);
    assert_eq!(fs::read(target.join("x/y/readme.txt"))?, b"hello");
    Ok(())
}

#[test]
fn rerunning_on_unchanged_tree_rewrites_nothing() -> TestResult {
    let dir = TempDir::new()?;
    let source = dir.path().join("src");
    let target = dir.path().join("target/classes");
    fs::create_dir_all(source.join("x"))?;
    fs::write(source.join("x/data.edn"), b"{}")?;

    assert_eq!(mirror(&source, &target, &BTreeSet::new(), "clj")?, 1);
    let first_mtime = fs::metadata(target.join("x/data.edn"))?.modified()?;

    assert_eq!(mirror(&source, &target, &BTreeSet::new(), "clj")?, 0);
    let second_mtime = fs::metadata(target.join("x/data.edn"))?.modified()?;

    assert_eq!(first_mtime, second_mtime);
    Ok(())
}

#[test]
fn compiled_units_are_skipped_but_other_sources_are_mirrored() -> TestResult {
    let dir = TempDir::new()?;
    let source = dir.path().join("src");
    let target = dir.path().join("target/classes");
    fs::create_dir_all(source.join("app"))?;
    fs::write(source.join("app/core.clj"), b"(ns app.core)")?;
    fs::write(source.join("app/scratch.clj"), b"(ns app.scratch)")?;

    let done: BTreeSet<String> = ["app.core".to_string()].into_iter().collect();
    let copied = mirror(&source, &target, &done, "clj")?;

    // app.core was produced by compilation; app.scratch was not in the
    // done set, so its source rides along into the target tree.
    assert_eq!(copied, 1);
    assert!(!target.join("app/core.clj").exists());
    assert!(target.join("app/scratch.clj").exists());
    Ok(())
}

#[test]
fn missing_source_root_is_a_no_op() -> TestResult {
    let dir = TempDir::new()?;
    let copied = mirror(
        &dir.path().join("no-such-root"),
        &dir.path().join("target"),
        &BTreeSet::new(),
        "clj",
    )?;

    assert_eq!(copied, 0);
    Ok(())
}
