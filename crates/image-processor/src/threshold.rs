//! Hard luminance threshold converting grayscale to dark/light.
//!
//! No dithering: each pixel is classified on its own.

use tracing::debug;

use crate::grid::{BinaryMask, PixelGrid};

/// Intensities strictly below this value are dark.
pub const DARK_THRESHOLD: u8 = 128;

/// Classify every pixel as dark (`intensity < 128`) or light.
pub fn threshold(grid: &PixelGrid) -> BinaryMask {
    let (width, height) = (grid.width(), grid.height());
    debug!(width, height, threshold = DARK_THRESHOLD, "Applying threshold");

    let cells = grid.values().iter().map(|&v| v < DARK_THRESHOLD).collect();
    BinaryMask::from_cells(width, height, cells)
}
