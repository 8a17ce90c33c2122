//! Active-image tracking over the images that finished loading.

pub mod loader;

pub use loader::{FsImageLoader, ImageLoader, LoadBatch, LoadError, LoadStatus, LoadedImage};

use crate::geometry::ImageBounds;

/// Images are kept in the order their loads completed, which can differ from
/// the order they were requested in.
#[derive(Debug, Clone, Default)]
pub struct ImageCarousel {
    loaded: Vec<LoadedImage>,
    current: usize,
}

impl ImageCarousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_loaded(&mut self, image: LoadedImage) {
        tracing::debug!(url = %image.url, position = self.loaded.len(), "image available");
        self.loaded.push(image);
    }

    pub fn images(&self) -> &[LoadedImage] {
        &self.loaded
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn active(&self) -> Option<&LoadedImage> {
        self.loaded.get(self.current)
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active().map(|image| image.url.as_str())
    }

    pub fn active_bounds(&self) -> Option<ImageBounds> {
        self.active().map(|image| image.bounds)
    }

    /// Advances cyclically; stays put when nothing is loaded.
    pub fn next(&mut self) -> usize {
        if !self.loaded.is_empty() {
            self.current = (self.current + 1) % self.loaded.len();
        }
        self.current
    }

    pub fn prev(&mut self) -> usize {
        if !self.loaded.is_empty() {
            self.current = if self.current == 0 {
                self.loaded.len() - 1
            } else {
                self.current - 1
            };
        }
        self.current
    }
}
