//! Pixel grids flowing through the conversion stages.
//!
//! All grids are row-major with the origin at the top-left corner.

use image::{GrayImage, Luma};

use crate::{ProcessError, Result};

/// Fixed output size of a converted card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDimensions {
    pub width: u32,
    pub height: u32,
}

impl TargetDimensions {
    /// 128x218, 16 bytes per packed row.
    pub const STANDARD: Self = Self {
        width: 128,
        height: 218,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of bytes a packed bitmap of this size occupies.
    pub fn packed_len(&self) -> usize {
        (self.width as usize / 8) * self.height as usize
    }
}

/// Grayscale intensities (0-255), one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    values: Vec<u8>,
}

impl PixelGrid {
    /// Build a grid from row-major values.
    ///
    /// Fails when `values.len() != width * height`.
    pub fn new(width: u32, height: u32, values: Vec<u8>) -> Result<Self> {
        if values.len() as u64 != u64::from(width) * u64::from(height) {
            return Err(ProcessError::GridSize {
                width,
                height,
                len: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// A grid where every pixel has the same intensity.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            values: vec![value; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Intensity at `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.values[y as usize * self.width as usize + x as usize]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks() rejects a zero size
        self.values.chunks(self.width.max(1) as usize)
    }

    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| Luma([self.get(x, y)]))
    }
}

impl From<GrayImage> for PixelGrid {
    fn from(img: GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            values: img.into_raw(),
        }
    }
}

/// Dark (`true`) / light (`false`) classification of every pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl BinaryMask {
    /// Build a mask from row-major cells.
    pub fn new(width: u32, height: u32, cells: Vec<bool>) -> Result<Self> {
        if cells.len() as u64 != u64::from(width) * u64::from(height) {
            return Err(ProcessError::GridSize {
                width,
                height,
                len: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Used by stages that derive a mask from an already valid grid.
    pub(crate) fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Whether the pixel at `(x, y)` is dark. Panics when out of bounds.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    pub fn count_dark(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Render as black (dark) and white (light) pixels.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.is_dark(x, y) { 0 } else { 255 }])
        })
    }
}
