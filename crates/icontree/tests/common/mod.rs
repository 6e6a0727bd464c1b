//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use icontree::repository::{ArchiveLocator, IconRepository, MemoryRepository, ResourceArchive};
use icontree::{Bitmap, Error, Result};
use zip::write::SimpleFileOptions;

pub const BLACK: [u8; 4] = [0, 0, 0, 255];
pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];

/// Route engine logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A 16x16 PNG filled with one colour.
pub fn png(rgba: [u8; 4]) -> Vec<u8> {
    Bitmap::from_pixel(16, 16, rgba).to_png().unwrap()
}

/// Write `images_<style>.zip` into `dir`.
pub fn write_icon_zip(dir: &Path, style: &str, entries: &[(&str, &[u8])]) {
    let file = File::create(dir.join(format!("images_{style}.zip"))).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

/// Call counters shared between a [`CountingRepository`] and the test.
#[derive(Debug, Clone, Default)]
pub struct Counters {
    pub locates: Arc<AtomicUsize>,
    pub opens: Arc<AtomicUsize>,
    pub reads: Arc<AtomicUsize>,
}

impl Counters {
    pub fn locates(&self) -> usize {
        self.locates.load(Ordering::SeqCst)
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.locates.store(0, Ordering::SeqCst);
        self.opens.store(0, Ordering::SeqCst);
        self.reads.store(0, Ordering::SeqCst);
    }
}

/// Wraps a [`MemoryRepository`] and counts every call made through it.
pub struct CountingRepository {
    inner: MemoryRepository,
    counters: Counters,
}

impl CountingRepository {
    pub fn new(inner: MemoryRepository) -> (Self, Counters) {
        let counters = Counters::default();
        (
            Self {
                inner,
                counters: counters.clone(),
            },
            counters,
        )
    }
}

impl IconRepository for CountingRepository {
    fn locate(&self, style: &str) -> Option<ArchiveLocator> {
        self.counters.locates.fetch_add(1, Ordering::SeqCst);
        self.inner.locate(style)
    }

    fn open(&self, locator: &ArchiveLocator) -> Result<Box<dyn ResourceArchive>> {
        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.open(locator)?;
        Ok(Box::new(CountingArchive {
            inner,
            reads: Arc::clone(&self.counters.reads),
        }))
    }
}

struct CountingArchive {
    inner: Box<dyn ResourceArchive>,
    reads: Arc<AtomicUsize>,
}

impl ResourceArchive for CountingArchive {
    fn contains(&self, entry: &str) -> bool {
        self.inner.contains(entry)
    }

    fn read(&mut self, entry: &str) -> Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(entry)
    }
}

/// A repository whose service is gone for one style.
pub struct UnavailableRepository {
    pub inner: MemoryRepository,
    pub broken_style: &'static str,
}

impl IconRepository for UnavailableRepository {
    fn locate(&self, style: &str) -> Option<ArchiveLocator> {
        if style == self.broken_style {
            return Some(ArchiveLocator::Memory(style.to_string()));
        }
        self.inner.locate(style)
    }

    fn open(&self, locator: &ArchiveLocator) -> Result<Box<dyn ResourceArchive>> {
        if *locator == ArchiveLocator::Memory(self.broken_style.to_string()) {
            return Err(Error::RepositoryUnavailable("package service stopped".into()));
        }
        self.inner.open(locator)
    }
}

/// A repository whose archives fail to open until `online` is set.
pub struct OfflineRepository {
    pub inner: MemoryRepository,
    pub online: Arc<AtomicBool>,
}

impl IconRepository for OfflineRepository {
    fn locate(&self, style: &str) -> Option<ArchiveLocator> {
        self.inner.locate(style)
    }

    fn open(&self, locator: &ArchiveLocator) -> Result<Box<dyn ResourceArchive>> {
        if !self.online.load(Ordering::SeqCst) {
            return Err(Error::archive_open(locator, "medium not mounted"));
        }
        self.inner.open(locator)
    }
}
