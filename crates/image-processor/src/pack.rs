//! 1-bit-per-pixel packing, 8 horizontal pixels per byte.
//!
//! Rows are emitted top to bottom, groups left to right. Within a group the
//! leftmost pixel lands in the most significant bit. A set bit is a dark pixel.

use tracing::debug;

use crate::grid::BinaryMask;
use crate::{ProcessError, Result};

/// Packed 1-bit pixels. Dimensions travel alongside the bytes but are
/// never part of any serialized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PackedBitmap {
    /// Wrap already packed bytes, e.g. read back from a `.bin` file.
    pub fn from_bytes(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        if width % 8 != 0 {
            return Err(ProcessError::Dimension { width });
        }
        if bytes.len() as u64 != u64::from(width / 8) * u64::from(height) {
            return Err(ProcessError::GridSize {
                width,
                height,
                len: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.width as usize / 8
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Pack 8 pixels into one byte (MSB first).
fn pack_group(group: &[bool]) -> u8 {
    group
        .iter()
        .enumerate()
        .filter(|&(_, &dark)| dark)
        .fold(0u8, |byte, (b, _)| byte | (1 << (7 - b)))
}

/// Pack a mask into bytes, one byte per 8-pixel group.
///
/// The width must be a multiple of 8; any other width is rejected rather
/// than padded.
pub fn pack(mask: &BinaryMask) -> Result<PackedBitmap> {
    let (width, height) = (mask.width(), mask.height());
    if width % 8 != 0 {
        return Err(ProcessError::Dimension { width });
    }

    let mut bytes = Vec::with_capacity(width as usize / 8 * height as usize);
    if width > 0 {
        for row in mask.rows() {
            bytes.extend(row.chunks_exact(8).map(pack_group));
        }
    }

    debug!(width, height, len = bytes.len(), "Packed bitmap");
    Ok(PackedBitmap {
        width,
        height,
        bytes,
    })
}

/// Expand a packed bitmap back into one cell per pixel.
pub fn unpack(bitmap: &PackedBitmap) -> BinaryMask {
    let cells = bitmap
        .as_bytes()
        .iter()
        .flat_map(|&byte| (0..8).map(move |b| byte & (1 << (7 - b)) != 0))
        .collect();
    BinaryMask::from_cells(bitmap.width(), bitmap.height(), cells)
}
