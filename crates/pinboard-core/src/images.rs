//! Lazily resolved bitmaps for image elements.
//!
//! Image elements only persist a source reference. Decoded pixels are cached
//! here per element, loaded asynchronously by the host and handed back through
//! [`crate::Canvas::image_resolved`].

use crate::shapes::ElementId;
use crate::storage::{BlobStore, BoxFuture};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Image resolution errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Failed to fetch image: {0}")]
    Fetch(String),
    #[error("Unsupported image source: {0}")]
    UnsupportedSource(String),
}

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// Unpremultiplied RGBA, row-major, `width * height * 4` bytes.
    pub rgba: Arc<[u8]>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, rgba: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            rgba: rgba.into(),
        }
    }

    pub fn size(&self) -> kurbo::Size {
        kurbo::Size::new(self.width as f64, self.height as f64)
    }
}

/// Cache slot for one image element.
#[derive(Debug, Clone, PartialEq)]
pub enum BitmapSlot {
    /// A load has been requested and not completed yet.
    Pending,
    Ready(Bitmap),
    /// The last load failed; the element renders without pixels.
    Failed(ImageError),
}

/// Request for the host to resolve an image source into a bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub element_id: ElementId,
    pub source_ref: String,
}

/// Per-element bitmap cache plus the queue of loads the host still has to start.
#[derive(Debug, Default)]
pub struct BitmapCache {
    slots: HashMap<ElementId, BitmapSlot>,
    queue: Vec<ImageRequest>,
}

impl BitmapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a load unless one is already pending for this element.
    pub fn request(&mut self, element_id: ElementId, source_ref: &str) {
        if matches!(self.slots.get(&element_id), Some(BitmapSlot::Pending)) {
            return;
        }
        self.slots.insert(element_id, BitmapSlot::Pending);
        self.queue.push(ImageRequest {
            element_id,
            source_ref: source_ref.to_string(),
        });
    }

    /// Hand all queued requests to the caller.
    pub fn drain_requests(&mut self) -> Vec<ImageRequest> {
        std::mem::take(&mut self.queue)
    }

    /// Store the outcome of a load.
    pub fn complete(&mut self, element_id: ElementId, result: Result<Bitmap, ImageError>) {
        let slot = match result {
            Ok(bitmap) => BitmapSlot::Ready(bitmap),
            Err(err) => BitmapSlot::Failed(err),
        };
        self.slots.insert(element_id, slot);
    }

    pub fn get(&self, element_id: ElementId) -> Option<&Bitmap> {
        match self.slots.get(&element_id) {
            Some(BitmapSlot::Ready(bitmap)) => Some(bitmap),
            _ => None,
        }
    }

    pub fn slot(&self, element_id: ElementId) -> Option<&BitmapSlot> {
        self.slots.get(&element_id)
    }

    pub fn remove(&mut self, element_id: ElementId) {
        self.slots.remove(&element_id);
        self.queue.retain(|r| r.element_id != element_id);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.queue.clear();
    }
}

/// Where an image's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Asset in the blob store.
    Blob(String),
    /// Inline `data:` URL payload.
    Inline(Vec<u8>),
    /// Local file.
    File(PathBuf),
}

impl ImageSource {
    pub const BLOB_SCHEME: &'static str = "blob:";

    /// Source reference for a blob-store asset.
    pub fn blob_ref(asset_id: &str) -> String {
        format!("{}{}", Self::BLOB_SCHEME, asset_id)
    }

    pub fn parse(source_ref: &str) -> Result<Self, ImageError> {
        if let Some(asset) = source_ref.strip_prefix(Self::BLOB_SCHEME) {
            if asset.is_empty() {
                return Err(ImageError::UnsupportedSource(source_ref.to_string()));
            }
            return Ok(ImageSource::Blob(asset.to_string()));
        }
        if let Some(rest) = source_ref.strip_prefix("data:") {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| ImageError::UnsupportedSource("malformed data URL".to_string()))?;
            if !header.ends_with(";base64") {
                return Err(ImageError::UnsupportedSource(
                    "data URL is not base64".to_string(),
                ));
            }
            let bytes = STANDARD
                .decode(payload)
                .map_err(|e| ImageError::Decode(e.to_string()))?;
            return Ok(ImageSource::Inline(bytes));
        }
        if let Some(path) = source_ref.strip_prefix("file://") {
            return Ok(ImageSource::File(PathBuf::from(path)));
        }
        if source_ref.is_empty() || source_ref.contains("://") {
            return Err(ImageError::UnsupportedSource(source_ref.to_string()));
        }
        Ok(ImageSource::File(PathBuf::from(source_ref)))
    }
}

/// Fetch the encoded bytes behind `source_ref`.
pub fn fetch_source<'a>(
    source_ref: &str,
    blobs: &'a dyn BlobStore,
) -> BoxFuture<'a, Result<Vec<u8>, ImageError>> {
    let source = ImageSource::parse(source_ref);
    Box::pin(async move {
        match source? {
            ImageSource::Blob(asset) => blobs
                .fetch(&asset)
                .await
                .map_err(|e| ImageError::Fetch(e.to_string())),
            ImageSource::Inline(bytes) => Ok(bytes),
            ImageSource::File(path) => std::fs::read(&path)
                .map_err(|e| ImageError::Fetch(format!("{}: {}", path.display(), e))),
        }
    })
}
