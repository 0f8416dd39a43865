//! Decoding encoded image bytes into a grayscale pixel grid.

use tracing::debug;

use crate::grid::PixelGrid;
use crate::{ProcessError, Result};

/// Decode any supported image format and collapse it to single-channel luminance.
pub fn decode_grayscale(bytes: &[u8]) -> Result<PixelGrid> {
    let img = image::load_from_memory(bytes).map_err(ProcessError::Decode)?;
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Decoded source image"
    );
    Ok(PixelGrid::from(img.into_luma8()))
}

/// Preferred file extension for encoded image bytes, if the format is recognized.
pub fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
}
