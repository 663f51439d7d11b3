use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::filesystem::mock::MockFileSystem;

use super::*;

fn markers() -> Vec<String> {
    vec!["WORKSPACE".to_string(), "WORKSPACE.bazel".to_string()]
}

// =============================================================================
// In-memory tree
// =============================================================================

#[test]
fn finds_marker_in_direct_parent() {
    let fs = MockFileSystem::new()
        .with_file("/ws/WORKSPACE", "")
        .with_file("/ws/lib.rs", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());

    let workspace = locator.locate(Path::new("/ws/lib.rs")).unwrap();
    assert_eq!(workspace.root(), Path::new("/ws"));
}

#[test]
fn walks_up_several_levels() {
    let fs = MockFileSystem::new()
        .with_file("/ws/WORKSPACE", "")
        .with_file("/ws/a/b/c/deep.rs", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());

    let workspace = locator.locate(Path::new("/ws/a/b/c/deep.rs")).unwrap();
    assert_eq!(workspace.root(), Path::new("/ws"));
}

#[test]
fn alternate_extension_marker_is_recognized() {
    let fs = MockFileSystem::new()
        .with_file("/ws/WORKSPACE.bazel", "")
        .with_file("/ws/src/lib.rs", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());

    let workspace = locator.locate(Path::new("/ws/src/lib.rs")).unwrap();
    assert_eq!(workspace.root(), Path::new("/ws"));
}

#[test]
fn nearest_marker_wins_for_nested_workspaces() {
    let fs = MockFileSystem::new()
        .with_file("/outer/WORKSPACE", "")
        .with_file("/outer/inner/WORKSPACE", "")
        .with_file("/outer/inner/src/lib.rs", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());

    let workspace = locator.locate(Path::new("/outer/inner/src/lib.rs")).unwrap();
    assert_eq!(workspace.root(), Path::new("/outer/inner"));
}

#[test]
fn returns_none_without_marker() {
    let fs = MockFileSystem::new().with_file("/plain/src/lib.rs", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());

    assert!(locator.locate(Path::new("/plain/src/lib.rs")).is_none());
}

#[test]
fn marker_below_the_file_does_not_count() {
    let fs = MockFileSystem::new()
        .with_file("/repo/lib.rs", "")
        .with_file("/repo/sub/WORKSPACE", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());

    assert!(locator.locate(Path::new("/repo/lib.rs")).is_none());
}

#[test]
fn unconfigured_marker_name_is_ignored() {
    let fs = MockFileSystem::new()
        .with_file("/ws/MODULE.bazel", "")
        .with_file("/ws/lib.rs", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());
    assert!(locator.locate(Path::new("/ws/lib.rs")).is_none());

    let fs = MockFileSystem::new()
        .with_file("/ws/MODULE.bazel", "")
        .with_file("/ws/lib.rs", "");
    let locator = WorkspaceLocator::with_fs(fs, vec!["MODULE.bazel".to_string()]);
    assert!(locator.locate(Path::new("/ws/lib.rs")).is_some());
}

#[test]
fn unsaved_file_is_located_through_its_directory() {
    let fs = MockFileSystem::new()
        .with_file("/ws/WORKSPACE", "")
        .with_file("/ws/src/existing.rs", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());

    let workspace = locator.locate(Path::new("/ws/src/new_file.rs")).unwrap();
    assert_eq!(workspace.root(), Path::new("/ws"));
}

#[test]
fn relative_path_is_resolved_against_current_dir() {
    let fs = MockFileSystem::new()
        .with_current_dir("/ws")
        .with_file("/ws/WORKSPACE", "")
        .with_file("/ws/src/lib.rs", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());

    let workspace = locator.locate(Path::new("src/lib.rs")).unwrap();
    assert_eq!(workspace.root(), Path::new("/ws"));
}

#[test]
fn directory_argument_starts_the_walk_at_itself() {
    let fs = MockFileSystem::new()
        .with_file("/ws/WORKSPACE", "")
        .with_file("/ws/src/lib.rs", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());

    let workspace = locator.locate(Path::new("/ws")).unwrap();
    assert_eq!(workspace.root(), Path::new("/ws"));
}

#[test]
fn dot_segments_are_folded_without_touching_the_filesystem() {
    let fs = MockFileSystem::new()
        .with_current_dir("/ws/src")
        .with_file("/ws/WORKSPACE", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());

    assert_eq!(
        locator.absolute_path(Path::new("./../src/./lib.rs")),
        Some(PathBuf::from("/ws/src/lib.rs"))
    );
    let workspace = locator.locate(Path::new("./lib.rs")).unwrap();
    assert_eq!(workspace.root(), Path::new("/ws"));
}

#[test]
fn locate_is_idempotent() {
    let fs = MockFileSystem::new()
        .with_file("/ws/WORKSPACE", "")
        .with_file("/ws/src/lib.rs", "");
    let locator = WorkspaceLocator::with_fs(fs, markers());

    let first = locator.locate(Path::new("/ws/src/lib.rs"));
    let second = locator.locate(Path::new("/ws/src/lib.rs"));
    assert_eq!(first, second);
}

// =============================================================================
// Real filesystem
// =============================================================================

#[test]
fn real_filesystem_finds_workspace_root() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("WORKSPACE"), "").unwrap();
    fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    let file = temp_dir.path().join("src").join("lib.rs");
    fs::write(&file, "pub fn f() {}\n").unwrap();

    let workspace = WorkspaceLocator::default().locate(&file).unwrap();
    assert_eq!(workspace.root(), temp_dir.path());
    assert_eq!(workspace.relative_path(&file).as_deref(), Some("src/lib.rs"));
}

#[test]
fn real_filesystem_ignores_marker_directory() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("project");
    fs::create_dir_all(project.join("WORKSPACE")).unwrap();
    let file = project.join("lib.rs");
    fs::write(&file, "").unwrap();

    let locator = WorkspaceLocator::new(markers());
    let found = locator.locate(&file);
    // A directory named WORKSPACE is not a marker; any match must come from
    // outside the temp dir.
    assert!(found.is_none_or(|ws| !ws.root().starts_with(temp_dir.path())));
}

#[test]
fn real_filesystem_locate_depends_only_on_layout() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("main.rs");
    fs::write(&file, "").unwrap();
    let locator = WorkspaceLocator::new(vec!["BAZEL_CHECK_TEST_MARKER".to_string()]);

    assert!(locator.locate(&file).is_none());

    fs::write(temp_dir.path().join("BAZEL_CHECK_TEST_MARKER"), "").unwrap();
    let workspace = locator.locate(&file).unwrap();
    assert_eq!(workspace.root(), temp_dir.path());
}

#[cfg(unix)]
#[test]
fn symlink_to_a_file_outside_the_workspace_uses_the_link_location() {
    let temp_dir = TempDir::new().unwrap();
    let ws = temp_dir.path().join("ws");
    let vendor = temp_dir.path().join("vendor");
    fs::create_dir_all(ws.join("src")).unwrap();
    fs::create_dir_all(&vendor).unwrap();
    fs::write(ws.join("WORKSPACE"), "").unwrap();
    fs::write(vendor.join("lib.rs"), "").unwrap();
    let link = ws.join("src").join("lib.rs");
    std::os::unix::fs::symlink("../../vendor/lib.rs", &link).unwrap();

    let locator = WorkspaceLocator::new(markers());
    let workspace = locator.locate(&link).unwrap();

    assert_eq!(workspace.root(), ws);
    assert_eq!(
        workspace
            .relative_path(&locator.absolute_path(&link).unwrap())
            .as_deref(),
        Some("src/lib.rs")
    );
}

#[cfg(unix)]
#[test]
fn symlink_inside_the_workspace_keeps_its_own_relative_path() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("WORKSPACE"), "").unwrap();
    fs::create_dir_all(temp_dir.path().join("real")).unwrap();
    fs::create_dir_all(temp_dir.path().join("alias")).unwrap();
    fs::write(temp_dir.path().join("real").join("lib.rs"), "").unwrap();
    let link = temp_dir.path().join("alias").join("lib.rs");
    std::os::unix::fs::symlink("../real/lib.rs", &link).unwrap();

    let locator = WorkspaceLocator::new(markers());
    let absolute = locator.absolute_path(&link).unwrap();
    let workspace = locator.locate(&link).unwrap();

    assert_eq!(absolute, link);
    assert_eq!(
        workspace.relative_path(&absolute).as_deref(),
        Some("alias/lib.rs")
    );
}
