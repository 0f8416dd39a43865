//! Headerless raw dump of the packed bytes.
//!
//! No magic, length prefix or dimensions: the consumer knows the size
//! out-of-band (128x218 -> 3488 bytes).

use image_processor::PackedBitmap;

use super::BitmapFormat;

/// Raw binary format.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBin;

impl BitmapFormat for RawBin {
    fn name(&self) -> &str {
        "raw"
    }

    fn extension(&self) -> &str {
        "bin"
    }

    fn encode(&self, bitmap: &PackedBitmap) -> Vec<u8> {
        bitmap.as_bytes().to_vec()
    }
}
