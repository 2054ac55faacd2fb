use assert_fs::prelude::*;
use ca_fs::{DirEntry, FileSystem, OsFileSystem};
use pretty_assertions::assert_eq;
use predicates::prelude::*;

#[test]
fn list_dir_returns_sorted_entries() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("b.crt").write_str("b").unwrap();
    temp.child("a.crt").write_str("a").unwrap();
    temp.child("nested").create_dir_all().unwrap();

    let entries = OsFileSystem::new().list_dir(temp.path()).unwrap();

    assert_eq!(
        entries,
        vec![
            DirEntry::file("a.crt"),
            DirEntry::file("b.crt"),
            DirEntry::dir("nested"),
        ]
    );
}

#[test]
fn list_dir_does_not_descend() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("nested/inner.crt").write_str("inner").unwrap();

    let entries = OsFileSystem::new().list_dir(temp.path()).unwrap();

    assert_eq!(entries, vec![DirEntry::dir("nested")]);
}

#[test]
fn list_dir_of_missing_directory_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let missing = temp.child("missing");

    let result = OsFileSystem::new().list_dir(missing.path());

    assert!(result.is_err());
    missing.assert(predicate::path::missing());
}

#[test]
fn list_dir_of_file_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("ca.crt");
    file.write_str("pem").unwrap();

    assert!(OsFileSystem::new().list_dir(file.path()).is_err());
}

#[cfg(unix)]
#[test]
fn list_dir_follows_symlinks_when_classifying() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("..data/ca.crt").write_str("pem").unwrap();
    std::os::unix::fs::symlink(temp.child("..data").path(), temp.child("data").path()).unwrap();
    std::os::unix::fs::symlink(
        temp.child("..data/ca.crt").path(),
        temp.child("ca.crt").path(),
    )
    .unwrap();

    let entries = OsFileSystem::new().list_dir(temp.path()).unwrap();

    assert_eq!(
        entries,
        vec![
            DirEntry::dir("..data"),
            DirEntry::file("ca.crt"),
            DirEntry::dir("data"),
        ]
    );
}
