//! High-level store API for punchlist.

use crate::storage::{State, Storage};
use crate::types::{Item, Stats, ValidationError};

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Item not found.
    ItemNotFound(u64),
    /// Validation error.
    Validation(ValidationError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::ItemNotFound(id) => write!(f, "item not found: {}", id),
            StoreError::Validation(e) => write!(f, "validation error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<ValidationError> for StoreError {
    fn from(e: ValidationError) -> Self {
        StoreError::Validation(e)
    }
}

/// The task-list store: the in-memory item list plus its id counter.
///
/// The whole state is loaded once from the injected [`Storage`] and rewritten
/// through it after every mutation. Rejected operations never touch state and
/// never persist.
pub struct Store {
    storage: Box<dyn Storage>,
    state: State,
}

impl Store {
    /// Open a store, loading whatever state the backend has.
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let state = storage.load();
        log::debug!(
            "Store opened with {} item(s), next id {}",
            state.items.len(),
            state.next_id
        );
        Self { storage, state }
    }

    /// List items, optionally filtered by done state and by a
    /// case-insensitive substring of the text. Filters are ANDed.
    pub fn list(&self, done: Option<bool>, search: Option<&str>) -> Vec<Item> {
        let needle = search
            .map(str::to_lowercase)
            .filter(|s| !s.is_empty());

        self.state
            .items
            .iter()
            .filter(|item| done.is_none_or(|d| item.done == d))
            .filter(|item| {
                needle
                    .as_deref()
                    .is_none_or(|n| item.text.to_lowercase().contains(n))
            })
            .cloned()
            .collect()
    }

    /// Get an item by id.
    pub fn get(&self, id: u64) -> Option<Item> {
        self.state.items.iter().find(|item| item.id == id).cloned()
    }

    /// Create a new item from raw text.
    pub fn add(&mut self, text: &str, done: bool) -> Result<Item, StoreError> {
        let item = Item::new(self.state.next_id, text, done)?;

        self.state.items.push(item.clone());
        self.state.next_id += 1;
        self.persist();

        Ok(item)
    }

    /// Replace an item's text in place.
    pub fn update(&mut self, id: u64, text: &str) -> Result<Item, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let item = self
            .state
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::ItemNotFound(id))?;

        item.text = text.to_string();
        let updated = item.clone();
        self.persist();

        Ok(updated)
    }

    /// Flip an item's done state.
    pub fn toggle(&mut self, id: u64) -> Result<Item, StoreError> {
        let item = self
            .state
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::ItemNotFound(id))?;

        item.done = !item.done;
        let updated = item.clone();
        self.persist();

        Ok(updated)
    }

    /// Remove an item.
    pub fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        let pos = self
            .state
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::ItemNotFound(id))?;

        self.state.items.remove(pos);
        self.persist();

        Ok(())
    }

    /// Remove every completed item. Idempotent.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.state.items.len();
        self.state.items.retain(|item| !item.done);
        let removed = before - self.state.items.len();
        self.persist();
        removed
    }

    /// Counts over the current items.
    pub fn stats(&self) -> Stats {
        let total = self.state.items.len();
        let done = self.state.items.iter().filter(|item| item.done).count();
        Stats {
            total,
            open: total - done,
            done,
        }
    }

    /// Rewrite the full state through the storage backend.
    ///
    /// A failed save is logged and swallowed: the in-memory state is still
    /// authoritative for a single-instance deployment, and no API caller can
    /// act on a persistence error anyway.
    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.state) {
            log::warn!("Failed to persist state: {:#}", e);
        }
    }
}
