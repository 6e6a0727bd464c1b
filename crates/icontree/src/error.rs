//! Error types for icon resolution.

use std::path::PathBuf;

use icontree_render::RenderError;

/// Result type alias for icon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving icons.
///
/// Only [`Error::RepositoryUnavailable`] is fatal: every other variant means
/// "this style cannot serve the request" and the engine moves on to the next
/// fallback style. Not finding an icon is not an error at all.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The archive of a style could not be opened.
    #[error("Failed to open icon archive '{locator}': {message}")]
    ArchiveOpen { locator: String, message: String },

    /// An entry listed in an archive could not be read.
    #[error("Failed to read archive entry '{entry}': {source}")]
    EntryRead {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    /// An entry was read but its bytes could not be decoded.
    #[error("Failed to decode icon '{entry}': {source}")]
    Decode {
        entry: String,
        #[source]
        source: RenderError,
    },

    /// File I/O error.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The repository service itself is gone; resolution cannot continue.
    #[error("Icon repository unavailable: {0}")]
    RepositoryUnavailable(String),
}

impl Error {
    /// Create an archive-open error.
    pub fn archive_open(locator: impl std::fmt::Display, message: impl Into<String>) -> Self {
        Self::ArchiveOpen {
            locator: locator.to_string(),
            message: message.into(),
        }
    }

    /// Create an entry-read error.
    pub fn entry_read(entry: impl Into<String>, source: std::io::Error) -> Self {
        Self::EntryRead {
            entry: entry.into(),
            source,
        }
    }

    /// Create a decode error.
    pub fn decode(entry: impl Into<String>, source: RenderError) -> Self {
        Self::Decode {
            entry: entry.into(),
            source,
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if resolution must stop instead of trying the next style.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RepositoryUnavailable(_))
    }
}
