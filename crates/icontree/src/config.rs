//! Engine configuration.
//!
//! # Example
//!
//! ```ignore
//! use icontree::IconTreeConfig;
//!
//! let config = IconTreeConfig::from_environment()
//!     .add_search_path("/opt/app/share/config")
//!     .with_cache_dir("/tmp/icon-cache");
//! ```

use std::path::PathBuf;

use crate::settings::DisplaySettings;
use crate::style::DEFAULT_STYLE;

/// Environment variable listing icon theme directories, separated by `;`.
pub const ICON_PATH_ENV: &str = "ICONTREE_ICON_PATH";

/// Environment variable overriding the disk cache root.
pub const CACHE_DIR_ENV: &str = "ICONTREE_CACHE_DIR";

/// Directory name used under the platform cache and data directories.
const APP_DIR: &str = "icontree";

/// Configuration for an [`IconTree`](crate::IconTree).
#[derive(Debug, Clone)]
pub struct IconTreeConfig {
    /// Directories searched for icon set archives. Later entries win.
    pub search_paths: Vec<PathBuf>,
    /// Root of the disk variant cache. `None` disables the disk cache.
    pub cache_dir: Option<PathBuf>,
    /// Display settings. `None` reads them from the process environment.
    pub settings: Option<DisplaySettings>,
    /// Style used by requests that do not name one.
    pub default_style: String,
}

impl Default for IconTreeConfig {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            cache_dir: None,
            settings: None,
            default_style: DEFAULT_STYLE.to_string(),
        }
    }
}

impl IconTreeConfig {
    /// Configuration from the environment and platform directories.
    ///
    /// Search paths come from `ICONTREE_ICON_PATH`, falling back to
    /// `<data dir>/icontree`. The cache root comes from `ICONTREE_CACHE_DIR`,
    /// falling back to `<cache dir>/icontree/icons`.
    pub fn from_environment() -> Self {
        let search_paths = match std::env::var(ICON_PATH_ENV) {
            Ok(value) => split_search_paths(&value),
            Err(_) => dirs::data_dir()
                .map(|dir| vec![dir.join(APP_DIR)])
                .unwrap_or_default(),
        };

        let cache_dir = std::env::var_os(CACHE_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::cache_dir().map(|dir| dir.join(APP_DIR).join("icons")));

        Self {
            search_paths,
            cache_dir,
            ..Self::default()
        }
    }

    /// Replace the search paths.
    #[must_use]
    pub fn with_search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Append a search path. It takes precedence over the existing ones.
    #[must_use]
    pub fn add_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Set the disk cache root.
    #[must_use]
    pub fn with_cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(path.into());
        self
    }

    /// Disable the disk cache.
    #[must_use]
    pub fn without_disk_cache(mut self) -> Self {
        self.cache_dir = None;
        self
    }

    /// Use fixed display settings instead of the environment.
    #[must_use]
    pub fn with_settings(mut self, settings: DisplaySettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set the style used when a request names none.
    #[must_use]
    pub fn with_default_style(mut self, style: impl Into<String>) -> Self {
        self.default_style = style.into();
        self
    }
}

/// Split a `;`-separated path list, dropping empty items.
pub fn split_search_paths(value: &str) -> Vec<PathBuf> {
    value
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = IconTreeConfig::default();
        assert!(config.search_paths.is_empty());
        assert!(config.cache_dir.is_none());
        assert_eq!(config.default_style, "colibre");
    }

    #[test]
    fn test_builders() {
        let config = IconTreeConfig::default()
            .with_search_paths(["/a", "/b"])
            .add_search_path("/c")
            .with_cache_dir("/cache")
            .with_default_style("breeze")
            .with_settings(DisplaySettings::default().with_scale_percentage(200));

        assert_eq!(
            config.search_paths,
            [PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/c")]
        );
        assert_eq!(config.cache_dir, Some(PathBuf::from("/cache")));
        assert_eq!(config.default_style, "breeze");
        assert_eq!(config.settings.map(|s| s.ui_scale_percentage), Some(200));

        let config = IconTreeConfig::default().with_cache_dir("/x").without_disk_cache();
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_split_search_paths() {
        assert_eq!(
            split_search_paths("/usr/share;;/opt/icons ;"),
            [PathBuf::from("/usr/share"), PathBuf::from("/opt/icons")]
        );
        assert!(split_search_paths("").is_empty());
    }
}
