//! Thread-safe handle to an [`IconTree`].

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::engine::{IconTree, LoadedIcon};
use crate::error::Result;
use crate::repository::IconLocation;
use crate::request::IconRequest;

/// A cloneable, lockable [`IconTree`].
///
/// All clones share one engine behind a single lock. Icon lookups are
/// mostly made from one rendering thread, so contention is low.
#[derive(Clone)]
pub struct SharedIconTree {
    inner: Arc<Mutex<IconTree>>,
}

impl SharedIconTree {
    /// Wrap an engine.
    pub fn new(tree: IconTree) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    /// Lock the engine for several operations in a row.
    pub fn lock(&self) -> MutexGuard<'_, IconTree> {
        self.inner.lock()
    }

    /// See [`IconTree::load_image`].
    pub fn load_image(&self, request: &IconRequest) -> Result<Option<LoadedIcon>> {
        self.inner.lock().load_image(request)
    }

    /// See [`IconTree::image_url`].
    pub fn image_url(&self, name: &str, style: &str, lang: &str) -> Result<Option<IconLocation>> {
        self.inner.lock().image_url(name, style, lang)
    }

    /// See [`IconTree::image_stream`].
    pub fn image_stream(&self, name: &str, style: &str, lang: &str) -> Result<Option<Vec<u8>>> {
        self.inner.lock().image_stream(name, style, lang)
    }

    /// See [`IconTree::shutdown`].
    pub fn shutdown(&self) {
        self.inner.lock().shutdown();
    }
}

impl From<IconTree> for SharedIconTree {
    fn from(tree: IconTree) -> Self {
        Self::new(tree)
    }
}

impl std::fmt::Debug for SharedIconTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedIconTree")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}
