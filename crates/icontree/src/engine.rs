//! The icon resolution engine.
//!
//! [`IconTree`] walks the style fallback chain for each request. At every
//! style it tries, in order:
//!
//! 1. the in-memory cache of that style for the request's scale and theme
//! 2. the disk variant cache
//! 3. the style's archive, trying localized and base names, PNG before SVG
//!
//! A decoded icon is written back to the memory cache under the requested name, and to the disk cache
//! when the decode pipeline says it was worth keeping.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::PathBuf;

use icontree_render::Bitmap;

use crate::config::IconTreeConfig;
use crate::disk_cache::DiskVariantCache;
use crate::error::Result;
use crate::icon_set::IconSet;
use crate::locale::LanguageTag;
use crate::paths::candidate_paths;
use crate::pipeline::decode_icon;
use crate::repository::{FsRepository, IconLocation, IconRepository};
use crate::request::{DecodeParams, IconRequest};
use crate::settings::DisplaySettings;
use crate::style::FallbackChain;

/// Where a loaded icon came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconOrigin {
    /// The in-memory cache.
    MemoryCache,
    /// A file of the disk variant cache.
    DiskCache(PathBuf),
    /// An archive entry, freshly decoded.
    Archive(IconLocation),
}

/// A successfully resolved icon.
#[derive(Debug, Clone)]
pub struct LoadedIcon {
    /// The decoded, transformed bitmap.
    pub bitmap: Bitmap,
    /// The style that served the request. Differs from the requested style
    /// when a fallback was used.
    pub style: String,
    /// Where the bitmap came from.
    pub origin: IconOrigin,
}

/// Resolves icon names to bitmaps.
///
/// # Example
///
/// ```ignore
/// use icontree::{IconRequest, IconTree, IconTreeConfig};
///
/// let mut tree = IconTree::from_config(IconTreeConfig::from_environment());
/// if let Some(icon) = tree.load_image(&IconRequest::new("cmd/lc_open.png").with_style("breeze"))? {
///     println!("{}x{} from {}", icon.bitmap.width(), icon.bitmap.height(), icon.style);
/// }
/// ```
pub struct IconTree {
    repository: Box<dyn IconRepository>,
    disk_cache: Option<DiskVariantCache>,
    settings: DisplaySettings,
    default_style: String,
    icon_sets: HashMap<String, IconSet>,
    current_style: Option<String>,
}

impl IconTree {
    /// Create an engine over `repository`.
    pub fn new(config: IconTreeConfig, repository: impl IconRepository + 'static) -> Self {
        let settings = config.settings.unwrap_or_else(DisplaySettings::from_environment);
        let disk_cache = config.cache_dir.map(DiskVariantCache::new);

        tracing::debug!(
            target: "icontree::engine",
            cache = ?disk_cache.as_ref().map(DiskVariantCache::root),
            default_style = %config.default_style,
            "creating icon tree"
        );

        Self {
            repository: Box::new(repository),
            disk_cache,
            settings,
            default_style: config.default_style,
            icon_sets: HashMap::new(),
            current_style: None,
        }
    }

    /// Create an engine that reads icon set archives from the configured
    /// search paths.
    pub fn from_config(config: IconTreeConfig) -> Self {
        let repository = FsRepository::new(config.search_paths.clone());
        Self::new(config, repository)
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Load an icon as a bitmap.
    ///
    /// Returns `Ok(None)` when no style along the fallback chain has the
    /// icon. Problems with a single style (unreadable archive, undecodable
    /// entry) are logged and the next style is tried; only fatal repository
    /// errors are returned.
    pub fn load_image(&mut self, request: &IconRequest) -> Result<Option<LoadedIcon>> {
        let params = request.decode_params(&self.settings);
        let locales = self.settings.ui_locale.fallback_strings();

        for style in FallbackChain::new(self.start_style(&request.style)) {
            match self.load_from_style(&style, request, params, &locales) {
                Ok(Some(icon)) => return Ok(Some(icon)),
                Ok(None) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!(target: "icontree::engine", style = %style, name = %request.name, "{e}");
                }
            }
        }

        tracing::debug!(target: "icontree::engine", name = %request.name, "icon not found");
        Ok(None)
    }

    /// Location of the archive entry that would serve `name` in `style`
    /// and locale `lang`, without decoding it.
    pub fn image_url(&mut self, name: &str, style: &str, lang: &str) -> Result<Option<IconLocation>> {
        let locales = LanguageTag::parse(lang).fallback_strings();

        for style in FallbackChain::new(self.start_style(style)) {
            let result = self.select_style(&style).and_then(|selected| {
                let candidates = candidate_paths(name, &locales, selected.set.links());
                selected.set.locate_entry(selected.repository, &candidates)
            });
            match result {
                Ok(Some(location)) => return Ok(Some(location)),
                Ok(None) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => tracing::info!(target: "icontree::engine", style = %style, "{e}"),
            }
        }
        Ok(None)
    }

    /// Raw bytes of the archive entry that would serve `name` in `style`
    /// and locale `lang`.
    ///
    /// Neither cache is consulted or filled and no transforms are applied.
    pub fn image_stream(&mut self, name: &str, style: &str, lang: &str) -> Result<Option<Vec<u8>>> {
        let locales = LanguageTag::parse(lang).fallback_strings();

        for style in FallbackChain::new(self.start_style(style)) {
            let result = self.select_style(&style).and_then(|selected| {
                let candidates = candidate_paths(name, &locales, selected.set.links());
                selected.set.find(selected.repository, &candidates)
            });
            match result {
                Ok(Some((_, bytes))) => return Ok(Some(bytes)),
                Ok(None) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => tracing::info!(target: "icontree::engine", style = %style, "{e}"),
            }
        }
        Ok(None)
    }

    /// Drop every icon set and its caches. The next request reopens
    /// archives from scratch.
    pub fn shutdown(&mut self) {
        tracing::debug!(target: "icontree::engine", sets = self.icon_sets.len(), "shutting down icon tree");
        self.icon_sets.clear();
        self.current_style = None;
    }

    // ========================================================================
    // State
    // ========================================================================

    /// The style most recently selected, or `None` before the first request
    /// and after [`shutdown`](Self::shutdown).
    pub fn current_style(&self) -> Option<&str> {
        self.current_style.as_deref()
    }

    /// Whether an icon set for `style` has been created.
    pub fn has_icon_set(&self, style: &str) -> bool {
        self.icon_sets.contains_key(style)
    }

    /// The display settings in effect.
    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// The disk variant cache, if enabled.
    pub fn disk_cache(&self) -> Option<&DiskVariantCache> {
        self.disk_cache.as_ref()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn start_style(&self, style: &str) -> String {
        if style.is_empty() {
            self.default_style.clone()
        } else {
            style.to_string()
        }
    }

    /// Make `style` current, creating its icon set on first use.
    fn select_style(&mut self, style: &str) -> Result<Selected<'_>> {
        self.current_style = Some(style.to_string());

        let repository = self.repository.as_ref();
        let set = match self.icon_sets.entry(style.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(IconSet::create(style, repository)?),
        };
        Ok(Selected {
            set,
            repository,
            disk_cache: self.disk_cache.as_ref(),
        })
    }

    fn load_from_style(
        &mut self,
        style: &str,
        request: &IconRequest,
        params: DecodeParams,
        locales: &[String],
    ) -> Result<Option<LoadedIcon>> {
        let Selected {
            set,
            repository,
            disk_cache,
        } = self.select_style(style)?;
        let loaded = |bitmap, origin| LoadedIcon {
            bitmap,
            style: style.to_string(),
            origin,
        };

        let canonical = set.links().resolve(&request.name).to_string();
        if let Some(bitmap) = set
            .cache(params)
            .and_then(|cache| cache.get(&canonical, request.localized))
        {
            tracing::trace!(target: "icontree::engine", style, name = %request.name, "memory cache hit");
            return Ok(Some(loaded(bitmap.clone(), IconOrigin::MemoryCache)));
        }

        let variant = params.variant_tag();
        if let Some(disk) = disk_cache {
            match disk.lookup(style, &variant, &request.name) {
                Ok(Some(bitmap)) => {
                    let path = disk
                        .entry_path(style, &variant, &request.name)
                        .unwrap_or_default();
                    return Ok(Some(loaded(bitmap, IconOrigin::DiskCache(path))));
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(target: "icontree::engine", "ignoring unusable disk cache entry: {e}");
                }
            }
        }

        let candidates = candidate_paths(&request.name, locales, set.links());
        let Some((location, bytes)) = set.find(repository, &candidates)? else {
            return Ok(None);
        };
        let decoded = decode_icon(&bytes, &location.entry, params)?;

        if decoded.write_to_cache
            && let Some(disk) = disk_cache
        {
            disk.store(style, &variant, &request.name, &decoded.bitmap);
        }

        // Stored under the requested name; lookups go by the canonical one.
        set.cache_mut(params)
            .insert(request.name.clone(), request.localized, decoded.bitmap.clone());

        tracing::debug!(
            target: "icontree::engine",
            style,
            name = %request.name,
            entry = %location.entry,
            "loaded icon from archive"
        );
        Ok(Some(loaded(decoded.bitmap, IconOrigin::Archive(location))))
    }
}

/// The icon set of the current style, with the engine parts a lookup needs.
struct Selected<'a> {
    set: &'a mut IconSet,
    repository: &'a dyn IconRepository,
    disk_cache: Option<&'a DiskVariantCache>,
}

impl std::fmt::Debug for IconTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconTree")
            .field("settings", &self.settings)
            .field("disk_cache", &self.disk_cache)
            .field("default_style", &self.default_style)
            .field("icon_sets", &self.icon_sets)
            .field("current_style", &self.current_style)
            .finish()
    }
}
