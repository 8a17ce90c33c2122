use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;

use crate::geometry::ImageBounds;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub url: String,
    pub bounds: ImageBounds,
}

impl LoadedImage {
    pub fn new(url: impl Into<String>, bounds: ImageBounds) -> Self {
        Self {
            url: url.into(),
            bounds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to read image dimensions for {url}: {message}")]
    ReadFailed { url: String, message: String },
    #[error("image loader for {url} stopped without reporting")]
    WorkerLost { url: String },
}

pub trait ImageLoader: Send + Sync {
    fn load(&self, url: &str) -> Result<LoadedImage, LoadError>;
}

/// Reads natural dimensions from local files; `file://` URLs are accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, url: &str) -> Result<LoadedImage, LoadError> {
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        let (width, height) =
            image::image_dimensions(path).map_err(|err| LoadError::ReadFailed {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        Ok(LoadedImage::new(url, ImageBounds::from_dimensions(width, height)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug)]
struct LoadOutcome {
    request: usize,
    result: Result<LoadedImage, LoadError>,
}

/// One background load per requested URL, reported over a shared channel so
/// images surface in completion order rather than request order.
#[derive(Debug)]
pub struct LoadBatch {
    requests: Vec<String>,
    statuses: Vec<LoadStatus>,
    receiver: mpsc::Receiver<LoadOutcome>,
}

impl LoadBatch {
    pub fn spawn<L>(urls: impl IntoIterator<Item = String>, loader: Arc<L>) -> Self
    where
        L: ImageLoader + ?Sized + 'static,
    {
        let requests = urls.into_iter().collect::<Vec<_>>();
        let (tx, rx) = mpsc::channel::<LoadOutcome>();
        for (request, url) in requests.iter().cloned().enumerate() {
            let tx = tx.clone();
            let loader = Arc::clone(&loader);
            std::thread::spawn(move || {
                let result = loader.load(&url);
                let _ = tx.send(LoadOutcome { request, result });
            });
        }

        Self {
            statuses: vec![LoadStatus::Pending; requests.len()],
            requests,
            receiver: rx,
        }
    }

    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    pub fn status(&self, request: usize) -> Option<LoadStatus> {
        self.statuses.get(request).copied()
    }

    pub fn pending_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|status| **status == LoadStatus::Pending)
            .count()
    }

    pub fn is_settled(&self) -> bool {
        self.pending_count() == 0
    }

    /// Drains completions that already arrived without blocking.
    pub fn poll(&mut self) -> Vec<LoadedImage> {
        let mut loaded = Vec::new();
        while !self.is_settled() {
            match self.receiver.try_recv() {
                Ok(outcome) => loaded.extend(self.settle(outcome)),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.abandon_pending();
                    break;
                }
            }
        }
        loaded
    }

    /// Blocks until the next image loads, or returns `None` once every
    /// request has settled.
    pub fn wait_next(&mut self) -> Option<LoadedImage> {
        while !self.is_settled() {
            match self.receiver.recv() {
                Ok(outcome) => {
                    if let Some(image) = self.settle(outcome) {
                        return Some(image);
                    }
                }
                Err(_) => self.abandon_pending(),
            }
        }
        None
    }

    pub fn wait_all(&mut self) -> Vec<LoadedImage> {
        std::iter::from_fn(|| self.wait_next()).collect()
    }

    fn settle(&mut self, outcome: LoadOutcome) -> Option<LoadedImage> {
        let LoadOutcome { request, result } = outcome;
        match result {
            Ok(image) => {
                self.statuses[request] = LoadStatus::Loaded;
                tracing::debug!(url = %image.url, request, "image loaded");
                Some(image)
            }
            Err(err) => {
                self.statuses[request] = LoadStatus::Failed;
                tracing::warn!(%err, request, "image load failed");
                None
            }
        }
    }

    fn abandon_pending(&mut self) {
        for (request, status) in self.statuses.iter_mut().enumerate() {
            if *status == LoadStatus::Pending {
                *status = LoadStatus::Failed;
                let err = LoadError::WorkerLost {
                    url: self.requests[request].clone(),
                };
                tracing::warn!(%err, request, "image load abandoned");
            }
        }
    }
}
