//! Shared test infrastructure for punchlist integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use punchlist::{FileStorage, Item, MemoryStorage, STATE_FILE, Store};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment around an in-memory store.
pub struct TestEnv {
    pub store: Store,
}

impl TestEnv {
    /// Create a new test environment with an empty in-memory store.
    pub fn new() -> Self {
        Self {
            store: Store::open(Box::new(MemoryStorage::default())),
        }
    }

    /// Create an open item.
    pub fn add(&mut self, text: &str) -> Item {
        self.store.add(text, false).expect("Failed to add item")
    }

    /// Create an already-completed item.
    pub fn add_done(&mut self, text: &str) -> Item {
        self.store.add(text, true).expect("Failed to add item")
    }

    /// Get all items count.
    pub fn total_count(&self) -> usize {
        self.store.list(None, None).len()
    }

    /// Get items count by done state.
    pub fn count_by_done(&self, done: bool) -> usize {
        self.store.list(Some(done), None).len()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// A disk-backed store in a temp dir, for persistence tests.
///
/// Keep the TempDir alive for as long as the store is used.
pub fn disk_env() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(STATE_FILE);
    (temp_dir, path)
}

/// Open a store over the given state file path.
pub fn open_disk_store(path: &PathBuf) -> Store {
    Store::open(Box::new(FileStorage::new(path)))
}
