//! In-memory icon sets.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use super::{ArchiveLocator, IconRepository, ResourceArchive};
use crate::error::{Error, Result};

type Entries = Arc<HashMap<String, Vec<u8>>>;

/// Icon sets registered from bytes.
///
/// # Example
///
/// ```
/// use icontree::repository::{IconRepository, MemoryRepository};
///
/// let repo = MemoryRepository::new()
///     .with_entry("breeze", "cmd/open.png", vec![0u8; 4])
///     .with_entry("breeze", "links.txt", b"cmd/load.png cmd/open.png\n".to_vec());
/// assert!(repo.locate("breeze").is_some());
/// assert!(repo.locate("colibre").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    sets: HashMap<String, Entries>,
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty icon set for `style`.
    pub fn insert_style(&mut self, style: impl Into<String>) {
        self.sets.entry(style.into()).or_default();
    }

    /// Add an entry to the icon set of `style`, creating the set if needed.
    ///
    /// Archives opened before the call keep their old contents.
    pub fn insert(&mut self, style: impl Into<String>, entry: impl Into<String>, data: Vec<u8>) {
        let entries = self.sets.entry(style.into()).or_default();
        Arc::make_mut(entries).insert(entry.into(), data);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_entry(
        mut self,
        style: impl Into<String>,
        entry: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.insert(style, entry, data);
        self
    }

    /// Registered styles, in no particular order.
    pub fn styles(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }
}

impl IconRepository for MemoryRepository {
    fn locate(&self, style: &str) -> Option<ArchiveLocator> {
        self.sets
            .contains_key(style)
            .then(|| ArchiveLocator::Memory(style.to_string()))
    }

    fn open(&self, locator: &ArchiveLocator) -> Result<Box<dyn ResourceArchive>> {
        let ArchiveLocator::Memory(style) = locator else {
            return Err(Error::archive_open(locator, "not an in-memory icon set"));
        };
        let entries = self
            .sets
            .get(style)
            .ok_or_else(|| Error::archive_open(locator, "icon set was not registered"))?;
        Ok(Box::new(MemoryArchive {
            entries: Arc::clone(entries),
        }))
    }
}

/// An opened in-memory icon set.
#[derive(Debug, Clone)]
pub struct MemoryArchive {
    entries: Entries,
}

impl ResourceArchive for MemoryArchive {
    fn contains(&self, entry: &str) -> bool {
        self.entries.contains_key(entry)
    }

    fn read(&mut self, entry: &str) -> Result<Vec<u8>> {
        self.entries.get(entry).cloned().ok_or_else(|| {
            Error::entry_read(entry, io::Error::new(io::ErrorKind::NotFound, "no such entry"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_read() {
        let repo = MemoryRepository::new().with_entry("breeze", "cmd/open.png", b"abc".to_vec());
        let locator = repo.locate("breeze").unwrap();
        let mut archive = repo.open(&locator).unwrap();
        assert!(archive.contains("cmd/open.png"));
        assert_eq!(archive.read("cmd/open.png").unwrap(), b"abc");
        assert!(archive.read("cmd/close.png").is_err());
    }

    #[test]
    fn test_opened_archive_is_a_snapshot() {
        let mut repo = MemoryRepository::new();
        repo.insert_style("breeze");
        let archive = repo.open(&ArchiveLocator::Memory("breeze".into())).unwrap();
        repo.insert("breeze", "late.png", Vec::new());
        assert!(!archive.contains("late.png"));
        assert!(repo.open(&ArchiveLocator::Memory("breeze".into())).unwrap().contains("late.png"));
    }

    #[test]
    fn test_wrong_locator() {
        let repo = MemoryRepository::new();
        assert!(repo.open(&ArchiveLocator::Memory("nope".into())).is_err());
        assert!(repo.open(&ArchiveLocator::Zip("/x.zip".into())).is_err());
    }
}
