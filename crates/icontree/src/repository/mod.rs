//! Icon set repositories.
//!
//! A repository knows where the packaged icons of a style live
//! ([`IconRepository::locate`]) and how to open them
//! ([`IconRepository::open`]). An opened [`ResourceArchive`] answers whether
//! a named entry exists and returns its bytes.
//!
//! Two backends are provided:
//!
//! - [`FsRepository`]: `images_<style>.zip` archives found along a list of
//!   search paths, plus an unpacked `images` directory for the `default` style
//! - [`MemoryRepository`]: icon sets registered from bytes, for embedding
//!   and tests

mod fs;
mod memory;

use std::fmt;
use std::path::{Path, PathBuf};

pub use fs::{DirectoryArchive, FsRepository, ZipResourceArchive};
pub use memory::{MemoryArchive, MemoryRepository};

use crate::error::Result;

/// Where the packaged icons of one style live.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArchiveLocator {
    /// A zip archive on disk.
    Zip(PathBuf),
    /// An unpacked directory on disk.
    Directory(PathBuf),
    /// An icon set held by a [`MemoryRepository`].
    Memory(String),
}

impl fmt::Display for ArchiveLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zip(path) | Self::Directory(path) => write!(f, "{}", path.display()),
            Self::Memory(name) => write!(f, "memory:{name}"),
        }
    }
}

/// Source of icon set archives.
///
/// Implementations must not panic; a style that does not exist is
/// `None` from [`locate`](Self::locate), and an archive that cannot be
/// opened is an error from [`open`](Self::open). Return
/// [`Error::RepositoryUnavailable`](crate::Error::RepositoryUnavailable)
/// only when no further lookups can succeed.
pub trait IconRepository: Send {
    /// Find the archive of `style`.
    fn locate(&self, style: &str) -> Option<ArchiveLocator>;

    /// Open a located archive.
    fn open(&self, locator: &ArchiveLocator) -> Result<Box<dyn ResourceArchive>>;
}

/// An opened icon set archive.
pub trait ResourceArchive: Send {
    /// Whether the archive has an entry named `entry`.
    fn contains(&self, entry: &str) -> bool;

    /// Read the bytes of `entry`.
    fn read(&mut self, entry: &str) -> Result<Vec<u8>>;
}

/// An entry inside a located archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconLocation {
    /// The archive holding the entry.
    pub archive: ArchiveLocator,
    /// The entry name inside the archive.
    pub entry: String,
}

impl IconLocation {
    /// Create a location.
    pub fn new(archive: ArchiveLocator, entry: impl Into<String>) -> Self {
        Self {
            archive,
            entry: entry.into(),
        }
    }

    /// URL of the entry.
    ///
    /// Zip entries render as `zip:file:///path/images_x.zip!/cmd/open.png`,
    /// directory entries as plain `file://` URLs.
    pub fn to_url(&self) -> String {
        match &self.archive {
            ArchiveLocator::Zip(path) => format!("zip:{}!/{}", file_url(path), self.entry),
            ArchiveLocator::Directory(path) => file_url(&path.join(&self.entry)),
            ArchiveLocator::Memory(name) => format!("memory:{name}!/{}", self.entry),
        }
    }
}

impl fmt::Display for IconLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

/// `file://` URL for a path. Relative paths that cannot be expressed as a
/// URL are returned as written.
fn file_url(path: &Path) -> String {
    url::Url::from_file_path(path)
        .map(|url| url.to_string())
        .unwrap_or_else(|()| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_display() {
        assert_eq!(ArchiveLocator::Memory("breeze".into()).to_string(), "memory:breeze");
        assert_eq!(
            ArchiveLocator::Zip(PathBuf::from("/share/images_breeze.zip")).to_string(),
            "/share/images_breeze.zip"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_zip_url() {
        let location = IconLocation::new(
            ArchiveLocator::Zip(PathBuf::from("/share/config/images_breeze.zip")),
            "cmd/lc_open.png",
        );
        assert_eq!(
            location.to_url(),
            "zip:file:///share/config/images_breeze.zip!/cmd/lc_open.png"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_url() {
        let location = IconLocation::new(
            ArchiveLocator::Directory(PathBuf::from("/share/images")),
            "cmd/open.png",
        );
        assert_eq!(location.to_url(), "file:///share/images/cmd/open.png");
    }

    #[test]
    fn test_relative_path_url_falls_back_to_path() {
        let location = IconLocation::new(ArchiveLocator::Zip(PathBuf::from("rel.zip")), "a.png");
        assert_eq!(location.to_url(), "zip:rel.zip!/a.png");
    }
}
