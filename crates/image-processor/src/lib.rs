//! Monochrome bitmap conversion for small e-paper displays.
//!
//! Decodes a source image to grayscale, resizes it with nearest-neighbor
//! sampling, applies a fixed luminance threshold and packs the result
//! 8 pixels per byte, MSB first.

pub mod decode;
pub mod grid;
pub mod pack;
pub mod preview;
pub mod resize;
pub mod threshold;

// Re-exports for convenience
pub use decode::decode_grayscale;
pub use grid::{BinaryMask, PixelGrid, TargetDimensions};
pub use pack::{PackedBitmap, pack, unpack};
pub use resize::resize_nearest;
pub use threshold::{DARK_THRESHOLD, threshold};

/// Errors that can occur while turning an image into a packed bitmap.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Source grid is empty ({width}x{height})")]
    EmptyGrid { width: u32, height: u32 },

    #[error("Target size {width}x{height} has no pixels")]
    EmptyTarget { width: u32, height: u32 },

    #[error("Grid of {width}x{height} does not match {len} pixel values")]
    GridSize { width: u32, height: u32, len: usize },

    #[error("Bitmap width {width} is not a multiple of 8")]
    Dimension { width: u32 },

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode preview: {0}")]
    Encode(#[source] image::ImageError),
}

/// Result type alias for image-processor operations.
pub type Result<T> = std::result::Result<T, ProcessError>;
