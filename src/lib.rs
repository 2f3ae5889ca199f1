//! Punchlist: a single-user task list with flat-file persistence.
//!
//! The store owns the item list and its id counter, and rewrites the whole
//! state through an injected [`Storage`] backend after every mutation. The
//! [`server`] module maps an HTTP API onto the store operations and serves
//! the bundled browser client.
//!
//! # Example
//!
//! ```
//! use punchlist::{MemoryStorage, Store};
//!
//! let mut store = Store::open(Box::new(MemoryStorage::default()));
//!
//! let item = store.add("Buy milk", false).unwrap();
//! assert_eq!(item.id, 1);
//!
//! store.toggle(item.id).unwrap();
//! assert_eq!(store.stats().done, 1);
//!
//! store.clear_completed();
//! assert!(store.list(None, None).is_empty());
//! ```

mod storage;
mod store;
mod types;

pub mod assets;
pub mod server;

// Re-export public API
pub use storage::{FileStorage, MemoryStorage, STATE_FILE, State, Storage};
pub use store::{Store, StoreError};
pub use types::{Item, Stats, ValidationError};
