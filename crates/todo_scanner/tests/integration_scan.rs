// crates/todo_scanner/tests/integration_scan.rs

use std::collections::HashSet;
use std::fs;

use tempfile::tempdir;

use todo_scanner::{scan_project, ScanWarning, DEFAULT_EXTENSIONS};

fn registry_of(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Annotations are collected from every matching file under the root,
/// including nested directories.
#[test]
fn test_scan_collects_across_nested_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/inner")).unwrap();
    fs::write(
        dir.path().join("src/main.rs"),
        "// TODO: (FEAT-1) top level\nfn main() {}\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("src/inner/util.rs"),
        "fn util() {}\n    // TODO: (FEAT-2) nested\n",
    )
    .unwrap();

    let registry = registry_of(&["FEAT-1", "FEAT-2"]);
    let mut warnings = Vec::new();
    let todos = scan_project(dir.path(), DEFAULT_EXTENSIONS, &registry, &mut warnings);

    assert_eq!(todos.len(), 2);
    assert!(warnings.is_empty());
    let mut files: Vec<&str> = todos.iter().map(|todo| todo.file.as_str()).collect();
    files.sort();
    assert_eq!(files, vec!["src/inner/util.rs", "src/main.rs"]);
}

/// Files under `target` or `.git` never contribute annotations.
#[test]
fn test_scan_skips_build_and_vcs_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("target/debug")).unwrap();
    fs::create_dir_all(dir.path().join(".git/hooks")).unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(
        dir.path().join("target/debug/gen.rs"),
        "// TODO: (FEAT-1) generated, must be ignored\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(".git/hooks/hook.rs"),
        "// TODO: (FEAT-1) vcs internals, must be ignored\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("src/lib.rs"),
        "// TODO: (FEAT-1) real code\n",
    )
    .unwrap();

    let registry = registry_of(&["FEAT-1"]);
    let mut warnings = Vec::new();
    let todos = scan_project(dir.path(), DEFAULT_EXTENSIONS, &registry, &mut warnings);

    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].file, "src/lib.rs");
}

/// Only files with a configured extension are opened at all.
#[test]
fn test_scan_respects_extension_set() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("notes.txt"),
        "// TODO: (FEAT-1) not a source file\n",
    )
    .unwrap();
    fs::write(dir.path().join("lib.rs"), "// TODO: (FEAT-1) source\n").unwrap();

    let registry = registry_of(&["FEAT-1"]);
    let mut warnings = Vec::new();
    let todos = scan_project(dir.path(), DEFAULT_EXTENSIONS, &registry, &mut warnings);
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].file, "lib.rs");

    // Widening the extension set picks the other file up too.
    let mut warnings = Vec::new();
    let todos = scan_project(dir.path(), &["rs", "txt"], &registry, &mut warnings);
    assert_eq!(todos.len(), 2);
}

/// An unreadable file is reported and skipped; the rest of the scan is
/// unaffected.
#[test]
fn test_unreadable_file_does_not_stop_the_scan() {
    let dir = tempdir().unwrap();
    // Invalid UTF-8 makes the read fail without touching permissions.
    fs::write(dir.path().join("broken.rs"), [0xff, 0xfe, 0xfd]).unwrap();
    fs::write(dir.path().join("ok.rs"), "// TODO: (FEAT-1) fine\n").unwrap();

    let registry = registry_of(&["FEAT-1"]);
    let mut warnings = Vec::new();
    let todos = scan_project(dir.path(), DEFAULT_EXTENSIONS, &registry, &mut warnings);

    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].file, "ok.rs");
    assert_eq!(warnings.len(), 1);
    match &warnings[0] {
        ScanWarning::UnreadableFile { path, .. } => assert_eq!(path, "broken.rs"),
        other => panic!("unexpected warning: {:?}", other),
    }
}

/// A project with no annotations yields an empty result and no warnings.
#[test]
fn test_scan_empty_project() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("lib.rs"), "fn quiet() {}\n").unwrap();

    let registry = registry_of(&[]);
    let mut warnings = Vec::new();
    let todos = scan_project(dir.path(), DEFAULT_EXTENSIONS, &registry, &mut warnings);
    assert!(todos.is_empty());
    assert!(warnings.is_empty());
}
