//! Storage layer for punchlist: a single JSON document on disk.

use crate::types::Item;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default state file name.
pub const STATE_FILE: &str = "todos.json";

/// The whole persisted store state.
///
/// Field names are the on-disk contract: `{"todos": [...], "nextId": N}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct State {
    #[serde(rename = "todos")]
    pub items: Vec<Item>,

    #[serde(rename = "nextId")]
    pub next_id: u64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl State {
    /// Restore the id-counter invariant after an untrusted load: `next_id`
    /// must be strictly greater than every id present.
    fn clamp_next_id(mut self) -> Self {
        let max_id = self.items.iter().map(|i| i.id).max().unwrap_or(0);
        if self.next_id <= max_id {
            self.next_id = max_id + 1;
        }
        if self.next_id == 0 {
            self.next_id = 1;
        }
        self
    }
}

/// Persistence seam for the store.
///
/// `load` never fails: an absent or unreadable state is reported as empty so
/// a bad file can never take the service down.
pub trait Storage: Send {
    fn load(&self) -> State;
    fn save(&mut self, state: &State) -> Result<()>;
}

/// Stores the state as one JSON file, rewritten wholesale on every save.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> State {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No state file at {}, starting empty", self.path.display());
                return State::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}, starting empty", self.path.display(), e);
                return State::default();
            }
        };

        match serde_json::from_str::<State>(&raw) {
            Ok(state) => state.clamp_next_id(),
            Err(e) => {
                log::warn!(
                    "Corrupt state file {}: {}, starting empty",
                    self.path.display(),
                    e
                );
                State::default()
            }
        }
    }

    fn save(&mut self, state: &State) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let json = serde_json::to_string_pretty(state).context("Failed to serialize state")?;

        // Write to a sibling temp file, then rename over the real one so a
        // crash mid-write cannot truncate the previous state.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}

/// In-process storage for tests and ephemeral mode.
#[derive(Default)]
pub struct MemoryStorage {
    state: State,
}

impl MemoryStorage {
    pub fn with_state(state: State) -> Self {
        Self { state }
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> State {
        self.state.clone().clamp_next_id()
    }

    fn save(&mut self, state: &State) -> Result<()> {
        self.state = state.clone();
        Ok(())
    }
}
