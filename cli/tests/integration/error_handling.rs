//! Error handling integration tests for bcp CLI.
//!
//! These tests verify:
//! - A failed copy aborts the whole batch after its progress line
//! - `--keep-going` attempts every candidate and still fails at the end
//! - Directory sources fail; a directory at the destination is copied into
//! - Failures carry an error code and the platform error

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, copying_line, file_list};
use predicates::prelude::*;
use std::fs;

/// A missing destination directory fails the first existing candidate and
/// nothing after it runs.
#[test]
fn test_missing_destination_aborts() {
    let fx = TestFixture::new();
    let a = fx.source_file("a.txt", "a");
    let b = fx.source_file("b.txt", "b");
    let dest = fx.dst.path().join("does-not-exist");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(file_list(&[&a, &b]))
        .arg(&dest)
        .assert()
        .code(1)
        .stdout(copying_line(&a, &dest.join("a.txt")))
        .stderr(predicate::str::starts_with("error[io_error]:"))
        .stderr(predicate::str::contains("os error"));

    assert!(!dest.exists(), "destination must not be created");
}

#[test]
fn test_directory_source_aborts() {
    let fx = TestFixture::new();
    let dir = fx.src.path().join("subdir");
    fs::create_dir(&dir).unwrap();
    let after = fx.source_file("after.txt", "after");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(file_list(&[&dir, &after]))
        .arg(fx.dst.path())
        .assert()
        .code(1)
        .stdout(copying_line(&dir, &fx.dst.path().join("subdir")))
        .stderr(predicate::str::contains("error[is_a_directory]"));

    assert!(!fx.dst.path().join("subdir").exists());
    assert!(!fx.dst.path().join("after.txt").exists());
}

/// A directory already sitting at the destination receives the file inside it.
#[test]
fn test_directory_at_destination_receives_copy() {
    let fx = TestFixture::new();
    let src = fx.source_file("a.txt", "file content");
    fs::create_dir(fx.dst.path().join("a.txt")).unwrap();
    fs::write(fx.dst.path().join("a.txt/inside.txt"), "inside content").unwrap();

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(file_list(&[&src]))
        .arg(fx.dst.path())
        .assert()
        .success()
        .stdout(copying_line(&src, &fx.dst.path().join("a.txt")));

    fx.assert_file_content(&fx.dst.path().join("a.txt/a.txt"), "file content");
    fx.assert_file_content(&fx.dst.path().join("a.txt/inside.txt"), "inside content");
}

/// Only a directory nested under the same name again is a failure.
#[test]
fn test_nested_directory_at_destination_fails() {
    let fx = TestFixture::new();
    let src = fx.source_file("a.txt", "file content");
    fs::create_dir_all(fx.dst.path().join("a.txt/a.txt")).unwrap();

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(file_list(&[&src]))
        .arg(fx.dst.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[is_a_directory]"))
        .stderr(predicate::str::contains("Destination is a directory"));

    assert!(fx.dst.path().join("a.txt/a.txt").is_dir());
}

#[test]
fn test_copy_onto_itself_fails() {
    let fx = TestFixture::new();
    let src = fx.source_file("same.txt", "content");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(file_list(&[&src]))
        .arg(fx.src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[same_file]"));

    fx.assert_file_content(&src, "content");
}

#[test]
fn test_keep_going_copies_the_rest() {
    let fx = TestFixture::new();
    let dir = fx.src.path().join("subdir");
    fs::create_dir(&dir).unwrap();
    let a = fx.source_file("a.txt", "a");
    let b = fx.source_file("b.txt", "b");

    let expected = [
        copying_line(&a, &fx.dst.path().join("a.txt")),
        copying_line(&dir, &fx.dst.path().join("subdir")),
        copying_line(&b, &fx.dst.path().join("b.txt")),
    ]
    .concat();

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg("--keep-going")
        .arg(file_list(&[&a, &dir, &b]))
        .arg(fx.dst.path())
        .assert()
        .code(1)
        .stdout(expected)
        .stderr(predicate::str::contains("WARN"))
        .stderr(predicate::str::contains(
            "error[partial_copy]: Failed to copy 1 of 3 files",
        ));

    fx.assert_file_content(&fx.dst.path().join("a.txt"), "a");
    fx.assert_file_content(&fx.dst.path().join("b.txt"), "b");
}

#[cfg(unix)]
#[test]
fn test_readonly_destination_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    // Root ignores directory permissions
    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", "content");
    let dest = fx.dst.path().join("readonly");
    fs::create_dir(&dest).unwrap();
    fs::set_permissions(&dest, fs::Permissions::from_mode(0o555)).unwrap();

    let mut cmd = cargo_bin_cmd!("bcp");
    let assert = cmd.arg(file_list(&[&src])).arg(&dest).assert();

    fs::set_permissions(&dest, fs::Permissions::from_mode(0o755)).unwrap();

    assert
        .code(1)
        .stderr(predicate::str::contains("error[permission_denied]"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg("--no-such-flag").assert().code(2);
}
