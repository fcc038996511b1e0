//! Basic functionality integration tests for bcp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, copying_line, file_list};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_single_file_copy() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", "hello world");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(file_list(&[&src]))
        .arg(fx.dst.path())
        .assert()
        .success()
        .stdout(copying_line(&src, &fx.dst.path().join("test.txt")));

    fx.assert_file_content(&fx.dst.path().join("test.txt"), "hello world");
}

#[test]
fn test_multiple_files_in_order() {
    let fx = TestFixture::new();
    let c = fx.source_file("c.txt", "c");
    let a = fx.source_file("nested/deeper/a.txt", "a");
    let b = fx.source_file("b.txt", "b");

    let expected = [
        copying_line(&c, &fx.dst.path().join("c.txt")),
        copying_line(&a, &fx.dst.path().join("a.txt")),
        copying_line(&b, &fx.dst.path().join("b.txt")),
    ]
    .concat();

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(file_list(&[&c, &a, &b]))
        .arg(fx.dst.path())
        .assert()
        .success()
        .stdout(expected);

    fx.assert_file_content(&fx.dst.path().join("a.txt"), "a");
    fx.assert_file_content(&fx.dst.path().join("b.txt"), "b");
    fx.assert_file_content(&fx.dst.path().join("c.txt"), "c");
}

#[test]
fn test_missing_file_skipped() {
    let fx = TestFixture::new();
    let x = fx.missing("x.txt");
    let y = fx.source_file("y.txt", "y");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(file_list(&[&x, &y]))
        .arg(fx.dst.path())
        .assert()
        .success()
        .stdout(copying_line(&y, &fx.dst.path().join("y.txt")))
        .stderr("");

    assert_eq!(fx.count_files(fx.dst.path()), 1);
    assert!(fx.dst.path().join("y.txt").exists());
}

#[test]
fn test_all_missing_is_success() {
    let fx = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(file_list(&[&fx.missing("a"), &fx.missing("b")]))
        .arg(fx.dst.path())
        .assert()
        .success()
        .stdout("");

    assert_eq!(fx.count_files(fx.dst.path()), 0);
}

#[test]
fn test_no_arguments_is_noop() {
    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.assert().success().stdout("");
}

#[test]
fn test_files_without_dest_is_noop() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", "content");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.current_dir(fx.dst.path())
        .arg(file_list(&[&src]))
        .assert()
        .success()
        .stdout("");

    assert_eq!(fx.count_files(fx.dst.path()), 0);
}

#[test]
fn test_overwrites_existing_file() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", "new content");
    fs::write(fx.dst.path().join("test.txt"), "old content").unwrap();

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(file_list(&[&src]))
        .arg(fx.dst.path())
        .assert()
        .success();

    fx.assert_file_content(&fx.dst.path().join("test.txt"), "new content");
}

/// Overwriting rewrites the existing file, so other links to it see the update.
#[cfg(unix)]
#[test]
fn test_overwrite_visible_through_hard_link() {
    let fx = TestFixture::new();
    let src = fx.source_file("a.txt", "NEW");
    let dst = fx.dst.path().join("a.txt");
    let peer = fx.dst.path().join("peer.txt");
    fs::write(&dst, "OLD CONTENT").unwrap();
    fs::hard_link(&dst, &peer).unwrap();

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(file_list(&[&src]))
        .arg(fx.dst.path())
        .assert()
        .success()
        .stdout(copying_line(&src, &dst));

    fx.assert_file_content(&dst, "NEW");
    fx.assert_file_content(&peer, "NEW");
}

#[test]
fn test_no_sync_still_copies() {
    let fx = TestFixture::new();
    let a = fx.source_file("a.txt", "alpha");
    let b = fx.source_file("b.txt", "beta");
    fs::write(fx.dst.path().join("b.txt"), "stale").unwrap();

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg("--no-sync")
        .arg(file_list(&[&a, &b]))
        .arg(fx.dst.path())
        .assert()
        .success()
        .stdout(
            [
                copying_line(&a, &fx.dst.path().join("a.txt")),
                copying_line(&b, &fx.dst.path().join("b.txt")),
            ]
            .concat(),
        );

    fx.assert_file_content(&fx.dst.path().join("a.txt"), "alpha");
    fx.assert_file_content(&fx.dst.path().join("b.txt"), "beta");
}

#[test]
fn test_rerun_gives_same_result() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", "same");
    let list = file_list(&[&src]);

    for _ in 0..2 {
        let mut cmd = cargo_bin_cmd!("bcp");
        cmd.arg(&list).arg(fx.dst.path()).assert().success();
        fx.assert_file_content(&fx.dst.path().join("test.txt"), "same");
    }
    assert_eq!(fx.count_files(fx.dst.path()), 1);
}

#[test]
fn test_quiet_mode() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", "content");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg("--quiet")
        .arg(file_list(&[&src]))
        .arg(fx.dst.path())
        .assert()
        .success()
        .stdout("");

    assert!(fx.dst.path().join("test.txt").exists());
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let fx = TestFixture::new();
    let src = fx.source_file("test.txt", "content");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg("-v")
        .arg(file_list(&[&src]))
        .arg(fx.dst.path())
        .assert()
        .success()
        .stdout(copying_line(&src, &fx.dst.path().join("test.txt")))
        .stderr(predicate::str::contains("copying"));
}

#[test]
fn test_help_flag() {
    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bcp"))
        .stdout(predicate::str::contains("FILES"));
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bcp"));
}
