//! Integration tests for flat-file persistence.

mod common;

use common::{disk_env, open_disk_store};
use std::fs;

#[test]
fn test_state_survives_reopen() {
    let (_temp_dir, path) = disk_env();

    let mut store = open_disk_store(&path);
    let milk = store.add("Buy milk", false).unwrap();
    let dog = store.add("Walk dog", true).unwrap();
    drop(store);

    let store = open_disk_store(&path);
    assert_eq!(store.get(milk.id).unwrap().text, "Buy milk");
    assert!(store.get(dog.id).unwrap().done);
    assert_eq!(store.stats().total, 2);
}

#[test]
fn test_id_counter_survives_reopen() {
    let (_temp_dir, path) = disk_env();

    let mut store = open_disk_store(&path);
    let a = store.add("a", false).unwrap();
    store.delete(a.id).unwrap();
    drop(store);

    // The counter must not rewind to a deleted id
    let mut store = open_disk_store(&path);
    let b = store.add("b", false).unwrap();
    assert!(b.id > a.id);
}

#[test]
fn test_every_mutation_is_flushed() {
    let (_temp_dir, path) = disk_env();

    let mut store = open_disk_store(&path);
    let item = store.add("Buy milk", false).unwrap();

    // Another reader sees the add without any explicit flush call
    assert_eq!(open_disk_store(&path).stats().total, 1);

    store.toggle(item.id).unwrap();
    assert_eq!(open_disk_store(&path).stats().done, 1);

    store.clear_completed();
    assert_eq!(open_disk_store(&path).stats().total, 0);
}

#[test]
fn test_rejected_add_does_not_write() {
    let (_temp_dir, path) = disk_env();

    let mut store = open_disk_store(&path);
    store.add("Buy milk", false).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    assert!(store.add("   ", false).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_corrupt_file_recovers_to_empty() {
    let (_temp_dir, path) = disk_env();
    fs::write(&path, "}}} definitely not json").unwrap();

    let mut store = open_disk_store(&path);
    assert_eq!(store.stats().total, 0);

    // The store is fully usable after recovery
    let item = store.add("Buy milk", false).unwrap();
    assert_eq!(item.id, 1);
}

#[test]
fn test_reads_hand_written_state_file() {
    let (_temp_dir, path) = disk_env();
    fs::write(
        &path,
        r#"{"todos":[{"id":1,"text":"Buy milk","done":false},{"id":2,"text":"Walk dog","done":true}],"nextId":3}"#,
    )
    .unwrap();

    let mut store = open_disk_store(&path);
    assert_eq!(store.stats().total, 2);
    assert_eq!(store.add("Mail letter", false).unwrap().id, 3);
}
