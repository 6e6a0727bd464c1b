//! Persistent cache of transformed icon variants.
//!
//! Scaled, dark-theme and rasterized-SVG icons are costly to produce, so the
//! finished bitmap is written as PNG under
//! `<root>/<style>/<variant>/<icon name>`, e.g.
//! `~/.cache/icontree/icons/breeze/150-dark/cmd/lc_open.png`.
//!
//! Entries are written once and reused; nothing here ever invalidates them.

use std::fs;
use std::path::{Component, Path, PathBuf};

use icontree_render::Bitmap;

use crate::error::{Error, Result};

/// On-disk store of decoded and transformed icons.
#[derive(Debug, Clone)]
pub struct DiskVariantCache {
    root: PathBuf,
}

impl DiskVariantCache {
    /// Create a cache rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the entry for `name`, or `None` when any of the parts would
    /// escape the cache root.
    pub fn entry_path(&self, style: &str, variant: &str, name: &str) -> Option<PathBuf> {
        let relative = Path::new(style).join(variant).join(name);
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
            .then(|| self.root.join(relative))
    }

    /// Load a cached variant.
    ///
    /// Returns `Ok(None)` when nothing is cached. A file that exists but
    /// cannot be read or decoded is an error.
    pub fn lookup(&self, style: &str, variant: &str, name: &str) -> Result<Option<Bitmap>> {
        let Some(path) = self.entry_path(style, variant, name) else {
            return Ok(None);
        };
        if !path.is_file() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| Error::io(&path, e))?;
        let bitmap =
            Bitmap::from_png(&bytes).map_err(|e| Error::decode(path.display().to_string(), e))?;
        tracing::trace!(target: "icontree::disk_cache", path = %path.display(), "disk cache hit");
        Ok(Some(bitmap))
    }

    /// Persist a variant. Failures are logged and otherwise ignored.
    pub fn store(&self, style: &str, variant: &str, name: &str, bitmap: &Bitmap) {
        match self.try_store(style, variant, name, bitmap) {
            Ok(Some(path)) => {
                tracing::debug!(target: "icontree::disk_cache", path = %path.display(), "stored icon variant");
            }
            Ok(None) => {
                tracing::debug!(target: "icontree::disk_cache", style, variant, name, "icon name not cacheable");
            }
            Err(e) => {
                tracing::warn!(target: "icontree::disk_cache", "failed to store icon variant: {e}");
            }
        }
    }

    fn try_store(
        &self,
        style: &str,
        variant: &str,
        name: &str,
        bitmap: &Bitmap,
    ) -> Result<Option<PathBuf>> {
        let Some(path) = self.entry_path(style, variant, name) else {
            return Ok(None);
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let png = bitmap.to_png().map_err(|e| Error::decode(name, e))?;
        fs::write(&path, png).map_err(|e| Error::io(&path, e))?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache() -> (tempfile::TempDir, DiskVariantCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiskVariantCache::new(dir.path().join("icons"));
        (dir, cache)
    }

    fn checkerboard() -> Bitmap {
        let mut data = Vec::new();
        for i in 0..16u8 {
            if i % 2 == 0 {
                data.extend_from_slice(&[255, 0, 0, 255]);
            } else {
                data.extend_from_slice(&[0, 0, 255, 128]);
            }
        }
        Bitmap::from_rgba(data, 4, 4).unwrap()
    }

    #[test]
    fn test_store_then_lookup() {
        let (_dir, cache) = temp_cache();
        let bitmap = checkerboard();

        cache.store("breeze", "150-dark", "cmd/lc_open.png", &bitmap);
        let loaded = cache.lookup("breeze", "150-dark", "cmd/lc_open.png").unwrap();
        assert_eq!(loaded, Some(bitmap));
    }

    #[test]
    fn test_layout() {
        let (_dir, cache) = temp_cache();
        cache.store("breeze", "200", "cmd/open.png", &Bitmap::new(2, 2));
        assert!(cache.root().join("breeze/200/cmd/open.png").is_file());
    }

    #[test]
    fn test_lookup_miss() {
        let (_dir, cache) = temp_cache();
        assert!(cache.lookup("breeze", "100", "cmd/open.png").unwrap().is_none());
        // Same name, other variant
        cache.store("breeze", "200", "cmd/open.png", &Bitmap::new(2, 2));
        assert!(cache.lookup("breeze", "100", "cmd/open.png").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_entry_is_an_error() {
        let (_dir, cache) = temp_cache();
        let path = cache.entry_path("breeze", "100", "cmd/open.png").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"not a png").unwrap();

        assert!(matches!(
            cache.lookup("breeze", "100", "cmd/open.png"),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_store_failure_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        // The root is a file, so no directory can be created under it
        let root = dir.path().join("blocker");
        fs::write(&root, b"").unwrap();
        let cache = DiskVariantCache::new(&root);

        cache.store("breeze", "100", "cmd/open.png", &Bitmap::new(1, 1));
        assert!(cache.lookup("breeze", "100", "cmd/open.png").unwrap().is_none());
    }

    #[test]
    fn test_escaping_names_are_rejected() {
        let (_dir, cache) = temp_cache();
        assert!(cache.entry_path("breeze", "100", "../../etc/passwd").is_none());
        assert!(cache.entry_path("breeze", "100", "/abs.png").is_none());
        assert!(cache.entry_path("breeze", "100", "cmd/ok.png").is_some());
    }
}
