//! Icon theme resolution with style fallback, locale variants and layered
//! caching.
//!
//! Given a logical icon name such as `cmd/lc_open.png`, a style such as
//! `breeze_dark`, and the process display settings, [`IconTree`] finds the
//! best matching entry in the style's icon archive, decodes it, applies the
//! dark-theme and scale transforms, and caches the result.
//!
//! # Resolution order
//!
//! For each style along the fallback chain (`sifr_dark` → `breeze_dark` →
//! `breeze` → `colibre`):
//!
//! 1. decoded icons in memory, per style and scale
//! 2. transformed variants on disk (`<cache>/<style>/<scale>[-dark]/<name>`)
//! 3. the archive: localized names first, then the base name; PNG before SVG
//!
//! # Example
//!
//! ```no_run
//! use icontree::{IconRequest, IconTree, IconTreeConfig};
//!
//! # fn main() -> icontree::Result<()> {
//! let mut tree = IconTree::from_config(IconTreeConfig::from_environment());
//!
//! let request = IconRequest::new("cmd/lc_open.png").with_style("breeze_dark");
//! if let Some(icon) = tree.load_image(&request)? {
//!     println!("served by {} ({:?})", icon.style, icon.origin);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Threading
//!
//! [`IconTree`] is a plain single-owner value. Use [`SharedIconTree`] to
//! share one engine between threads.

pub mod config;
pub mod disk_cache;
mod engine;
mod error;
mod icon_set;
pub mod links;
pub mod locale;
pub mod paths;
pub mod pipeline;
pub mod repository;
mod request;
pub mod settings;
mod shared;
pub mod style;

pub use config::IconTreeConfig;
pub use disk_cache::DiskVariantCache;
pub use engine::{IconOrigin, IconTree, LoadedIcon};
pub use error::{Error, Result};
pub use icontree_render::Bitmap;
pub use locale::LanguageTag;
pub use repository::{
    ArchiveLocator, FsRepository, IconLocation, IconRepository, MemoryRepository, ResourceArchive,
};
pub use request::{DecodeParams, IconRequest, ImageLoadFlags};
pub use settings::DisplaySettings;
pub use shared::SharedIconTree;
pub use style::{FallbackChain, fallback_style};

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        Bitmap, DisplaySettings, IconOrigin, IconRequest, IconTree, IconTreeConfig, ImageLoadFlags,
        LoadedIcon, SharedIconTree,
    };
}
