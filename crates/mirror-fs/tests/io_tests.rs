//! Tests for replica-side delete and copy operations

use assert_fs::prelude::*;
use mirror_fs::io::{self, EntryKind};
use predicates::prelude::*;
use std::fs;
use std::time::{Duration, SystemTime};

fn set_readonly(path: &std::path::Path) {
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(path, perms).unwrap();
}

#[test]
fn entry_kind_distinguishes_files_directories_and_missing() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("file.txt").write_str("x").unwrap();
    temp.child("dir").create_dir_all().unwrap();

    assert_eq!(io::entry_kind(&temp.path().join("file.txt")).unwrap(), EntryKind::File);
    assert_eq!(io::entry_kind(&temp.path().join("dir")).unwrap(), EntryKind::Directory);
    assert_eq!(io::entry_kind(&temp.path().join("nope")).unwrap(), EntryKind::Missing);
}

#[test]
fn remove_file_deletes_readonly_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("locked.txt");
    file.write_str("locked").unwrap();
    set_readonly(file.path());

    io::remove_file(file.path()).unwrap();

    file.assert(predicate::path::missing());
}

#[test]
fn remove_file_missing_reports_not_found() {
    let temp = assert_fs::TempDir::new().unwrap();
    let err = io::remove_file(&temp.path().join("gone.txt")).unwrap_err();

    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
}

#[test]
fn remove_dir_all_removes_nested_tree() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("tree/a/b/c.txt").write_str("deep").unwrap();
    temp.child("tree/empty").create_dir_all().unwrap();

    io::remove_dir_all(&temp.path().join("tree")).unwrap();

    temp.child("tree").assert(predicate::path::missing());
}

#[test]
fn copy_file_creates_parent_chain() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src.txt");
    src.write_str("payload").unwrap();
    let dst = temp.child("out/nested/dst.txt");

    let bytes = io::copy_file(src.path(), dst.path()).unwrap();

    assert_eq!(bytes, 7);
    dst.assert("payload");
}

#[test]
fn copy_file_preserves_modification_time() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src.txt");
    src.write_str("old").unwrap();
    let past = SystemTime::now() - Duration::from_secs(3600 * 24);
    fs::File::options()
        .write(true)
        .open(src.path())
        .unwrap()
        .set_modified(past)
        .unwrap();
    let dst = temp.child("dst.txt");

    io::copy_file(src.path(), dst.path()).unwrap();

    let src_mtime = fs::metadata(src.path()).unwrap().modified().unwrap();
    let dst_mtime = fs::metadata(dst.path()).unwrap().modified().unwrap();
    assert_eq!(src_mtime, dst_mtime);
}

#[test]
fn copy_file_overwrites_readonly_destination() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src.txt");
    src.write_str("v2").unwrap();
    let dst = temp.child("dst.txt");
    dst.write_str("v1").unwrap();
    set_readonly(dst.path());

    io::copy_file(src.path(), dst.path()).unwrap();

    dst.assert("v2");
}

#[test]
fn copy_file_missing_source_is_copy_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let err = io::copy_file(&temp.path().join("absent"), &temp.path().join("dst")).unwrap_err();

    assert!(matches!(err, mirror_fs::Error::Copy { .. }));
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
}
