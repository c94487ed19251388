// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs::OpenOptions;

const POLL: Duration = Duration::from_millis(5);

fn open(path: &Path) -> File {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .unwrap()
}

#[test]
fn acquire_free_lock_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store");

    let lock = FileLock::acquire(open(&path), &path, Duration::from_secs(1), POLL).unwrap();
    assert_eq!(lock.path(), path.as_path());
}

#[test]
fn held_lock_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store");

    let _held = FileLock::acquire(open(&path), &path, Duration::from_secs(1), POLL).unwrap();
    let result = FileLock::acquire(open(&path), &path, Duration::from_millis(50), POLL);

    match result {
        Err(LockError::Timeout { path: p, waited }) => {
            assert_eq!(p, path);
            assert!(waited >= Duration::from_millis(50));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[test]
fn lock_is_released_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store");

    {
        let _held = FileLock::acquire(open(&path), &path, Duration::from_secs(1), POLL).unwrap();
    }

    FileLock::acquire(open(&path), &path, Duration::from_millis(50), POLL).unwrap();
}

#[test]
fn waiter_acquires_once_holder_releases() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store");

    let held = FileLock::acquire(open(&path), &path, Duration::from_secs(1), POLL).unwrap();
    let releaser = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        drop(held);
    });

    let lock = FileLock::acquire(open(&path), &path, Duration::from_secs(5), POLL);
    releaser.join().unwrap();
    assert!(lock.is_ok());
}

#[test]
fn zero_timeout_still_tries_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store");

    FileLock::acquire(open(&path), &path, Duration::ZERO, POLL).unwrap();
}
