//! PNG previews of intermediate stages.

use std::io::Cursor;

use image::{GrayImage, ImageFormat};

use crate::grid::{BinaryMask, PixelGrid};
use crate::{ProcessError, Result};

fn encode_png(img: &GrayImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(ProcessError::Encode)?;
    Ok(buf.into_inner())
}

/// Encode a grayscale grid as an 8-bit grayscale PNG.
pub fn grid_png(grid: &PixelGrid) -> Result<Vec<u8>> {
    encode_png(&grid.to_gray_image())
}

/// Encode a mask as a black-and-white PNG (dark pixels black).
pub fn mask_png(mask: &BinaryMask) -> Result<Vec<u8>> {
    encode_png(&mask.to_gray_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_grayscale;

    #[test]
    fn test_grid_png_decodes_back() {
        let grid = PixelGrid::new(3, 2, vec![0, 50, 100, 150, 200, 250]).unwrap();
        let png = grid_png(&grid).unwrap();
        assert_eq!(decode_grayscale(&png).unwrap(), grid);
    }

    #[test]
    fn test_mask_png_is_black_and_white() {
        let mask = BinaryMask::new(2, 2, vec![true, false, false, true]).unwrap();
        let png = mask_png(&mask).unwrap();
        let decoded = decode_grayscale(&png).unwrap();
        assert_eq!(decoded.values(), &[0, 255, 255, 0]);
    }
}
