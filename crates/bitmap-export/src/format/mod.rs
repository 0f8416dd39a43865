//! Output format definitions.
//!
//! Supports two serializations of the same packed payload:
//! - Raw binary (`.bin`) - bytes verbatim
//! - C array (`.c`) - firmware-embeddable source declaration

pub mod c_array;
pub mod raw;

pub use c_array::CArray;
pub use raw::RawBin;

use image_processor::PackedBitmap;

/// Trait defining the interface for bitmap serializations.
///
/// Implementations encode the bitmap's bytes in order, without re-deriving
/// anything from the source image, so every format carries the same payload.
pub trait BitmapFormat: Send + Sync {
    /// Human-readable format name (e.g. "raw", "c-array").
    fn name(&self) -> &str;

    /// File extension without the leading dot.
    fn extension(&self) -> &str;

    /// Serialize the bitmap into the format's file contents.
    fn encode(&self, bitmap: &PackedBitmap) -> Vec<u8>;
}
