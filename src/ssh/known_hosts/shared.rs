use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::KnownHostsError;

use super::KnownHostsStore;

/// Reloadable handle to a file-backed store.
///
/// Connection attempts take a [`snapshot`](Self::snapshot) and verify against
/// it; a reload builds a brand new store and swaps the shared reference, so
/// snapshots already handed out are never modified.
#[derive(Debug)]
pub struct SharedKnownHosts {
    paths: Vec<PathBuf>,
    current: RwLock<Arc<KnownHostsStore>>,
}

impl SharedKnownHosts {
    /// Load the store for the first time
    pub fn open(paths: Vec<PathBuf>) -> Result<Self, KnownHostsError> {
        let store = KnownHostsStore::load(&paths)?;
        Ok(Self {
            paths,
            current: RwLock::new(Arc::new(store)),
        })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// The store currently in use
    pub fn snapshot(&self) -> Arc<KnownHostsStore> {
        self.current.read().clone()
    }

    /// Re-read every file and swap in the new store.
    ///
    /// On failure the previous store stays in place.
    pub fn reload(&self) -> Result<Arc<KnownHostsStore>, KnownHostsError> {
        let store = Arc::new(KnownHostsStore::load(&self.paths)?);
        *self.current.write() = store.clone();
        tracing::info!(
            "Reloaded known_hosts: {} entries from {} file(s)",
            store.len(),
            self.paths.len()
        );
        Ok(store)
    }
}
