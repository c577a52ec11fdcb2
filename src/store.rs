//! The artifact store: compiled bytes keyed by unit name.
//!
//! One store belongs to one [`MemoryFileManager`](crate::MemoryFileManager)
//! instance. Entries are inserted only when an output sink closes, so at any
//! point between compilations the map holds exactly the units the compiler
//! finished writing since the last clear, and never a partial artifact.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Immutable compiled bytes for one unit.
pub type ArtifactBytes = Arc<[u8]>;

/// Mapping from compiled-unit name to compiled bytes.
///
/// This is a handle type: clones address the same underlying map, which is
/// how output sinks commit into the store their manager owns. External code
/// reads through [`snapshot`](Self::snapshot) and never sees the live map.
#[derive(Debug, Default, Clone)]
pub struct ArtifactStore {
    entries: Arc<RwLock<FxHashMap<String, ArtifactBytes>>>,
}

impl ArtifactStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit compiled bytes for `name`, replacing any prior entry.
    ///
    /// Called only from output-sink close; last writer wins across
    /// successive compilations of the same unit.
    pub(crate) fn put(&self, name: String, bytes: Vec<u8>) {
        self.entries.write().insert(name, bytes.into());
    }

    /// The committed bytes for `name`, if that unit has finished writing.
    pub fn get(&self, name: &str) -> Option<ArtifactBytes> {
        self.entries.read().get(name).cloned()
    }

    /// Whether an artifact has been committed for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// A read-only snapshot of all committed artifacts.
    ///
    /// The returned map is detached: later commits or clears do not affect
    /// it, and nothing a caller does to it reaches the live store. Bytes are
    /// shared, not copied.
    pub fn snapshot(&self) -> FxHashMap<String, ArtifactBytes> {
        self.entries.read().clone()
    }

    /// Number of committed artifacts.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no artifacts have been committed since the last clear.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop all committed artifacts.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
