//! Filesystem-backed icon sets: zip archives and unpacked directories.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};

use super::{ArchiveLocator, IconRepository, ResourceArchive};
use crate::error::{Error, Result};

/// Style served from an unpacked `images` directory instead of a zip.
pub const UNPACKED_STYLE: &str = "default";

/// Directory name of the unpacked icon set.
const UNPACKED_DIR: &str = "images";

/// Locates icon set archives along a list of search paths.
///
/// Style `breeze` is the file `images_breeze.zip` in the last search path
/// that has it. Style `default` is the directory `images`.
#[derive(Debug, Clone, Default)]
pub struct FsRepository {
    search_paths: Vec<PathBuf>,
}

impl FsRepository {
    /// Create a repository over `search_paths`. Later paths take precedence.
    pub fn new<I, P>(search_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: search_paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The search paths, in configuration order.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// File name of the archive of `style`.
    pub fn archive_file_name(style: &str) -> String {
        format!("images_{style}.zip")
    }
}

impl IconRepository for FsRepository {
    fn locate(&self, style: &str) -> Option<ArchiveLocator> {
        let (name, want_dir) = if style == UNPACKED_STYLE {
            (UNPACKED_DIR.to_string(), true)
        } else {
            (Self::archive_file_name(style), false)
        };

        for dir in self.search_paths.iter().rev() {
            let candidate = dir.join(&name);
            if want_dir && candidate.is_dir() {
                return Some(ArchiveLocator::Directory(candidate));
            }
            if !want_dir && candidate.is_file() {
                return Some(ArchiveLocator::Zip(candidate));
            }
        }

        tracing::debug!(target: "icontree::repository", style, "no icon set found");
        None
    }

    fn open(&self, locator: &ArchiveLocator) -> Result<Box<dyn ResourceArchive>> {
        match locator {
            ArchiveLocator::Zip(path) => Ok(Box::new(ZipResourceArchive::open(path)?)),
            ArchiveLocator::Directory(path) => Ok(Box::new(DirectoryArchive::open(path)?)),
            ArchiveLocator::Memory(_) => {
                Err(Error::archive_open(locator, "not a filesystem icon set"))
            }
        }
    }
}

// ============================================================================
// Zip archives
// ============================================================================

/// An opened `images_<style>.zip`.
pub struct ZipResourceArchive {
    path: PathBuf,
    archive: zip::ZipArchive<BufReader<File>>,
}

impl ZipResourceArchive {
    /// Open the zip archive at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|e| Error::archive_open(path.display(), e.to_string()))?;
        let archive = zip::ZipArchive::new(BufReader::new(file))
            .map_err(|e| Error::archive_open(path.display(), e.to_string()))?;

        tracing::debug!(
            target: "icontree::repository",
            path = %path.display(),
            entries = archive.len(),
            "opened icon archive"
        );

        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    /// Path of the archive file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResourceArchive for ZipResourceArchive {
    fn contains(&self, entry: &str) -> bool {
        self.archive.index_for_name(entry).is_some()
    }

    fn read(&mut self, entry: &str) -> Result<Vec<u8>> {
        let mut file = self.archive.by_name(entry).map_err(|e| {
            Error::entry_read(entry, io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
        })?;

        let mut data = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
        file.read_to_end(&mut data)
            .map_err(|e| Error::entry_read(entry, e))?;
        Ok(data)
    }
}

impl std::fmt::Debug for ZipResourceArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipResourceArchive")
            .field("path", &self.path)
            .field("entries", &self.archive.len())
            .finish()
    }
}

// ============================================================================
// Unpacked directories
// ============================================================================

/// An unpacked icon set directory.
#[derive(Debug, Clone)]
pub struct DirectoryArchive {
    root: PathBuf,
}

impl DirectoryArchive {
    /// Use the directory at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::archive_open(root.display(), "not a directory"));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Filesystem path of `entry`, or `None` when it would leave the root.
    fn entry_path(&self, entry: &str) -> Option<PathBuf> {
        let relative = Path::new(entry);
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
            .then(|| self.root.join(relative))
    }
}

impl ResourceArchive for DirectoryArchive {
    fn contains(&self, entry: &str) -> bool {
        self.entry_path(entry).is_some_and(|path| path.is_file())
    }

    fn read(&mut self, entry: &str) -> Result<Vec<u8>> {
        let path = self.entry_path(entry).ok_or_else(|| {
            Error::entry_read(
                entry,
                io::Error::new(io::ErrorKind::InvalidInput, "entry outside the icon set"),
            )
        })?;
        std::fs::read(&path).map_err(|e| Error::entry_read(entry, e))
    }
}
