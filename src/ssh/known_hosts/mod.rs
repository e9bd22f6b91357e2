//! Read-only known_hosts trust store.
//!
//! Entries are loaded eagerly from one or more sources and never change
//! afterwards. All sources carry equal weight: [`KnownHostsStore::find`]
//! returns every matching entry no matter which source it came from.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::KnownHostsError;

pub mod hash;
mod matchers;
mod scan;
mod shared;

pub use matchers::{DEFAULT_SSH_PORT, HostPattern};
pub use scan::{EntryOrigin, KnownHostsEntry, SkippedLine};
pub use shared::SharedKnownHosts;

/// Opaque byte source holding known_hosts text
pub trait KnownHostsSource {
    /// Name used in logs and errors
    fn name(&self) -> String;

    /// Read the complete contents.
    ///
    /// Handles must be released before returning, on success or failure.
    fn read(&self) -> io::Result<Vec<u8>>;
}

impl KnownHostsSource for Path {
    fn name(&self) -> String {
        self.display().to_string()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(self)
    }
}

impl KnownHostsSource for PathBuf {
    fn name(&self) -> String {
        self.as_path().name()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        self.as_path().read()
    }
}

impl<T: KnownHostsSource + ?Sized> KnownHostsSource for &T {
    fn name(&self) -> String {
        (**self).name()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        (**self).read()
    }
}

impl<T: KnownHostsSource + ?Sized> KnownHostsSource for Box<T> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        (**self).read()
    }
}

/// known_hosts content already held in memory
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    contents: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

impl KnownHostsSource for MemorySource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.contents.clone())
    }
}

/// Immutable union of the entries of every loaded source
#[derive(Debug, Default)]
pub struct KnownHostsStore {
    sources: Vec<Arc<str>>,
    entries: Vec<KnownHostsEntry>,
    skipped: Vec<SkippedLine>,
}

impl KnownHostsStore {
    /// Store with no entries; every lookup comes back empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and parse every source.
    ///
    /// A source that cannot be read fails the whole load. Unparseable lines
    /// are skipped, logged and kept in [`KnownHostsStore::skipped`].
    pub fn load<I, S>(sources: I) -> Result<Self, KnownHostsError>
    where
        I: IntoIterator<Item = S>,
        S: KnownHostsSource,
    {
        let mut store = Self::default();

        for source in sources {
            let name: Arc<str> = Arc::from(source.name());
            let content = read_text(&source).map_err(|e| KnownHostsError::Read {
                name: name.to_string(),
                source: e,
            })?;

            let scan = scan::scan_known_hosts(&name, &content);
            tracing::debug!(
                "Loaded {} known_hosts entries from {} ({} skipped)",
                scan.entries.len(),
                name,
                scan.skipped.len()
            );

            store.entries.extend(scan.entries);
            store.skipped.extend(scan.skipped);
            store.sources.push(name);
        }

        Ok(store)
    }

    /// Build a store from entries that were constructed in code
    pub fn from_entries(entries: impl IntoIterator<Item = KnownHostsEntry>) -> Self {
        Self {
            sources: Vec::new(),
            entries: entries.into_iter().collect(),
            skipped: Vec::new(),
        }
    }

    /// Every entry whose host pattern matches `(host, port)`.
    ///
    /// Callers must not rely on the order of the results.
    pub fn find<'a>(
        &'a self,
        host: &'a str,
        port: u16,
    ) -> impl Iterator<Item = &'a KnownHostsEntry> + Clone + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.pattern().matches(host, port))
    }

    pub fn entries(&self) -> &[KnownHostsEntry] {
        &self.entries
    }

    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    /// Names of the loaded sources, in load order
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|name| name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn read_text(source: &impl KnownHostsSource) -> io::Result<String> {
    let bytes = source.read()?;
    let text =
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    // A leading byte order mark would otherwise end up in the first host field
    match text.strip_prefix('\u{feff}') {
        Some(rest) => Ok(rest.to_string()),
        None => Ok(text),
    }
}
