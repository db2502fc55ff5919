//! Bitmap decoding for image elements.

use crate::renderer::{RenderResult, RendererError};
use pinboard_core::{Bitmap, ImageError};

/// Decode PNG, JPEG or WebP bytes into RGBA8.
pub fn decode_bitmap(bytes: &[u8]) -> RenderResult<Bitmap> {
    let decoded = image::load_from_memory(bytes).map_err(|e| {
        log::warn!("Failed to decode {} byte image: {}", bytes.len(), e);
        RendererError::Decode(e.to_string())
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(RendererError::Decode("image has no pixels".to_string()));
    }
    log::debug!("Decoded {}x{} image", width, height);
    Ok(Bitmap::new(width, height, rgba.into_raw()))
}

/// [`decode_bitmap`] with the error expressed for the bitmap cache.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, ImageError> {
    decode_bitmap(bytes).map_err(|RendererError::Decode(msg)| ImageError::Decode(msg))
}
