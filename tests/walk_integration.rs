//! End-to-end traversal tests against real temporary directory trees.

use scopewalk::{DirectoryWalker, WalkOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Options that cannot be affected by ignore roots outside the temp tree.
fn isolated_options() -> WalkOptions {
    let mut options = WalkOptions::default();
    options.root_markers = Vec::new();
    options
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn walk_rel(walker: &DirectoryWalker, root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walker
        .walk(root)
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

#[test]
fn test_negation_readmits_within_one_ignore_file() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/.scopeignore", "*.pyc\n!keep.pyc\n");
    write(temp.path(), "src/a.pyc", "");
    write(temp.path(), "src/keep.pyc", "");
    write(temp.path(), "src/b.py", "");

    let walker = DirectoryWalker::new(isolated_options()).unwrap();
    let files = walk_rel(&walker, temp.path());

    assert!(files.contains(&"src/keep.pyc".to_string()));
    assert!(files.contains(&"src/b.py".to_string()));
    assert!(!files.contains(&"src/a.pyc".to_string()));
}

#[test]
fn test_include_only_keeps_matching_files() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".scopeinclude", "*.py\n");
    write(temp.path(), "main.py", "");
    write(temp.path(), "docs/readme.md", "");

    let walker = DirectoryWalker::new(isolated_options()).unwrap();
    let files = walk_rel(&walker, temp.path());

    assert_eq!(files, vec!["main.py".to_string()]);
}

#[test]
fn test_deeper_negation_cannot_override_ancestor_ignore() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".scopeignore", "*.log\n");
    write(temp.path(), "sub/.scopeignore", "!keep.log\n");
    write(temp.path(), "sub/keep.log", "");
    write(temp.path(), "sub/code.rs", "");

    let walker = DirectoryWalker::new(isolated_options()).unwrap();
    let files = walk_rel(&walker, temp.path());

    assert!(files.contains(&"sub/code.rs".to_string()));
    assert!(!files.contains(&"sub/keep.log".to_string()));
}

#[test]
fn test_anchored_pattern_only_matches_from_declaring_directory() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".scopeignore", "/build\n");
    write(temp.path(), "build/out.o", "");
    write(temp.path(), "nested/build/out.o", "");

    let walker = DirectoryWalker::new(isolated_options()).unwrap();
    let files = walk_rel(&walker, temp.path());

    assert!(files.contains(&"nested/build/out.o".to_string()));
    assert!(!files.iter().any(|f| f.starts_with("build/")));
}

#[test]
fn test_directory_only_pattern_spares_file_of_same_name() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".scopeignore", "build/\n");
    write(temp.path(), "build", "a plain file named build");
    write(temp.path(), "tools/build/out.o", "");

    let walker = DirectoryWalker::new(isolated_options()).unwrap();
    let files = walk_rel(&walker, temp.path());

    assert!(files.contains(&"build".to_string()));
    assert!(!files.iter().any(|f| f.contains("build/")));
}

#[test]
fn test_profile_sections_activate_with_profile() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".scopeignore", "*.log\n[dev]\n*.tmp\n");
    write(temp.path(), "app.log", "");
    write(temp.path(), "scratch.tmp", "");
    write(temp.path(), "main.rs", "");

    let plain = DirectoryWalker::new(isolated_options()).unwrap();
    let files = walk_rel(&plain, temp.path());
    assert!(files.contains(&"scratch.tmp".to_string()));
    assert!(!files.contains(&"app.log".to_string()));

    let dev = DirectoryWalker::new(isolated_options().with_profile("dev")).unwrap();
    let files = walk_rel(&dev, temp.path());
    assert!(!files.contains(&"scratch.tmp".to_string()));
    assert!(files.contains(&"main.rs".to_string()));
}

#[test]
fn test_multiple_ignore_filenames_concatenate_in_priority_order() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".gitignore", "*.log\n");
    write(temp.path(), ".scopeignore", "!keep.log\n");
    write(temp.path(), "keep.log", "");
    write(temp.path(), "drop.log", "");

    let walker = DirectoryWalker::new(isolated_options()).unwrap();
    let files = walk_rel(&walker, temp.path());

    assert!(files.contains(&"keep.log".to_string()));
    assert!(!files.contains(&"drop.log".to_string()));
}

#[test]
fn test_ignore_files_above_walk_root_apply() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("repo/.git")).unwrap();
    write(temp.path(), "repo/.scopeignore", "*.secret\n");
    write(temp.path(), "repo/sub/a.secret", "");
    write(temp.path(), "repo/sub/a.txt", "");

    // default options keep the `.git` root marker
    let walker = DirectoryWalker::new(WalkOptions::default()).unwrap();
    let root = temp.path().join("repo/sub");
    let files: Vec<PathBuf> = walker.walk(&root).collect();

    assert!(files.iter().any(|f| f.ends_with("a.txt")));
    assert!(!files.iter().any(|f| f.ends_with("a.secret")));
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_terminates() {
    init_tracing();
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a/file.txt", "");
    std::os::unix::fs::symlink(temp.path(), temp.path().join("a/loop")).unwrap();

    let walker = DirectoryWalker::new(isolated_options()).unwrap();
    let files: Vec<PathBuf> = walker.walk(temp.path()).collect();

    let real: Vec<&PathBuf> = files.iter().filter(|f| f.ends_with("file.txt")).collect();
    assert_eq!(real.len(), 1);
}

#[test]
fn test_walk_of_missing_root_yields_nothing() {
    init_tracing();
    let walker = DirectoryWalker::new(isolated_options()).unwrap();
    let files: Vec<PathBuf> = walker.walk("/definitely/not/a/real/path").collect();
    assert!(files.is_empty());
}
