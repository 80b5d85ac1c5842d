//! Todo list core for homedash.
//!
//! `TodoStore` owns the ordered task collection and mirrors it to a
//! key-value store after every mutation. Storage backends are pluggable
//! (JSON files on disk, in-memory for tests).

pub mod error;
pub mod record;
pub mod storage;
pub mod store;

pub use error::TodoError;
pub use record::{DetailedStats, Filter, TodoRecord, TodoStats};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{Confirmation, TodoStore, STORAGE_KEY};
