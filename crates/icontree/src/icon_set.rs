//! Per-style icon set state: archive handle, links and memory caches.

use std::collections::HashMap;

use icontree_render::Bitmap;

use crate::error::Result;
use crate::links::{LINKS_ENTRY, LinkTable};
use crate::repository::{ArchiveLocator, IconLocation, IconRepository, ResourceArchive};
use crate::request::DecodeParams;

/// A decoded icon held in memory.
#[derive(Debug, Clone)]
struct CachedIcon {
    localized: bool,
    bitmap: Bitmap,
}

/// Decoded icons of one style for one set of decode parameters, keyed by
/// icon name.
#[derive(Debug, Default)]
pub(crate) struct IconCache {
    icons: HashMap<String, CachedIcon>,
}

impl IconCache {
    /// The cached bitmap for `name`, if it was stored with the same
    /// `localized` flag.
    pub(crate) fn get(&self, name: &str, localized: bool) -> Option<&Bitmap> {
        self.icons
            .get(name)
            .filter(|icon| icon.localized == localized)
            .map(|icon| &icon.bitmap)
    }

    /// Store `bitmap` under `name`, replacing any previous entry.
    pub(crate) fn insert(&mut self, name: impl Into<String>, localized: bool, bitmap: Bitmap) {
        self.icons.insert(name.into(), CachedIcon { localized, bitmap });
    }

    pub(crate) fn len(&self) -> usize {
        self.icons.len()
    }
}

/// One style's icons.
///
/// The archive is opened when the set is created. If that fails, every
/// later search tries again; once open, the handle is kept until the set is
/// dropped.
pub(crate) struct IconSet {
    style: String,
    locator: Option<ArchiveLocator>,
    archive: Option<Box<dyn ResourceArchive>>,
    links: LinkTable,
    scaled_caches: HashMap<DecodeParams, IconCache>,
}

impl IconSet {
    /// Locate and open the icon set of `style`.
    ///
    /// A style with no archive still gets a set, so memory and disk caches
    /// work for it. Only fatal repository errors are returned.
    pub(crate) fn create(style: &str, repository: &dyn IconRepository) -> Result<Self> {
        let locator = repository.locate(style);
        tracing::debug!(
            target: "icontree::icon_set",
            style,
            locator = ?locator.as_ref().map(ToString::to_string),
            "creating icon set"
        );

        let mut set = Self {
            style: style.to_string(),
            locator,
            archive: None,
            links: LinkTable::new(),
            scaled_caches: HashMap::new(),
        };
        set.ensure_open(repository)?;
        Ok(set)
    }

    pub(crate) fn links(&self) -> &LinkTable {
        &self.links
    }

    /// Memory cache for icons decoded with `params`, created on first use.
    pub(crate) fn cache_mut(&mut self, params: DecodeParams) -> &mut IconCache {
        self.scaled_caches.entry(params).or_default()
    }

    /// Memory cache for icons decoded with `params`, if any were cached.
    pub(crate) fn cache(&self, params: DecodeParams) -> Option<&IconCache> {
        self.scaled_caches.get(&params)
    }

    /// Open the archive if it is not open yet. Returns whether an archive is
    /// available.
    ///
    /// Open failures are logged and reported as `Ok(false)` unless fatal.
    fn ensure_open(&mut self, repository: &dyn IconRepository) -> Result<bool> {
        if self.archive.is_some() {
            return Ok(true);
        }
        let Some(locator) = &self.locator else {
            return Ok(false);
        };

        match repository.open(locator) {
            Ok(archive) => {
                self.archive = Some(archive);
                self.load_links();
                Ok(true)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::warn!(target: "icontree::icon_set", style = %self.style, "{e}");
                Ok(false)
            }
        }
    }

    fn load_links(&mut self) {
        let Some(archive) = self.archive.as_mut() else {
            return;
        };
        if !archive.contains(LINKS_ENTRY) {
            return;
        }
        match archive.read(LINKS_ENTRY) {
            Ok(bytes) => self.links = LinkTable::parse(&String::from_utf8_lossy(&bytes)),
            Err(e) => tracing::warn!(target: "icontree::icon_set", style = %self.style, "{e}"),
        }
    }

    /// First candidate present in the archive.
    pub(crate) fn locate_entry(
        &mut self,
        repository: &dyn IconRepository,
        candidates: &[String],
    ) -> Result<Option<IconLocation>> {
        if !self.ensure_open(repository)? {
            return Ok(None);
        }
        let (Some(archive), Some(locator)) = (&self.archive, &self.locator) else {
            return Ok(None);
        };
        Ok(candidates
            .iter()
            .find(|candidate| archive.contains(candidate))
            .map(|entry| IconLocation::new(locator.clone(), entry.clone())))
    }

    /// Read the first candidate present in the archive.
    ///
    /// A read failure of that candidate is an error; later candidates are
    /// not tried.
    pub(crate) fn find(
        &mut self,
        repository: &dyn IconRepository,
        candidates: &[String],
    ) -> Result<Option<(IconLocation, Vec<u8>)>> {
        let Some(location) = self.locate_entry(repository, candidates)? else {
            return Ok(None);
        };
        let Some(archive) = self.archive.as_mut() else {
            return Ok(None);
        };
        let bytes = archive.read(&location.entry)?;
        tracing::trace!(
            target: "icontree::icon_set",
            style = %self.style,
            entry = %location.entry,
            len = bytes.len(),
            "read icon entry"
        );
        Ok(Some((location, bytes)))
    }
}

impl std::fmt::Debug for IconSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconSet")
            .field("style", &self.style)
            .field("locator", &self.locator)
            .field("open", &self.archive.is_some())
            .field("links", &self.links.len())
            .field(
                "cached",
                &self
                    .scaled_caches
                    .iter()
                    .map(|(params, cache)| (params.variant_tag(), cache.len()))
                    .collect::<HashMap<_, _>>(),
            )
            .finish()
    }
}
