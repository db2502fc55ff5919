//! Clipboard image paste and text copy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to encode clipboard image: {0}")]
    Encode(String),
}

/// Read an image from the system clipboard as PNG bytes.
///
/// Returns `Ok(None)` when the clipboard holds no image; other content is
/// left alone.
pub fn paste_image() -> Result<Option<Vec<u8>>, ClipboardError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    let image = match clipboard.get_image() {
        Ok(image) => image,
        Err(arboard::Error::ContentNotAvailable) => return Ok(None),
        Err(e) => return Err(ClipboardError::Unavailable(e.to_string())),
    };
    log::info!("Clipboard image {}x{}", image.width, image.height);
    encode_png(&image.bytes, image.width as u32, image.height as u32).map(Some)
}

/// Put `html` on the clipboard with `plain` as the fallback for text-only targets.
pub fn copy_html(html: String, plain: String) -> Result<(), ClipboardError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    clipboard
        .set_html(html, Some(plain))
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ClipboardError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ClipboardError::Encode(e.to_string()))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| ClipboardError::Encode(e.to_string()))?;
    }
    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_decodes_back() {
        let rgba = [255u8, 0, 0, 255, 0, 255, 0, 255];
        let png = encode_png(&rgba, 2, 1).unwrap();
        let bitmap = pinboard_render::decode_image(&png).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (2, 1));
        assert_eq!(&bitmap.rgba[..], &rgba[..]);
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        assert!(encode_png(&[0u8; 4], 2, 2).is_err());
    }
}
