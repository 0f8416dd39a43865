//! Serializers for packed 1-bit bitmaps.
//!
//! Two output forms carry the same payload:
//! - raw `.bin` - the packed bytes verbatim, no header
//! - C source - a `const unsigned char` array of the same bytes

use std::path::{Path, PathBuf};

use image_processor::PackedBitmap;

pub mod format;

// Re-exports for convenience
pub use format::{BitmapFormat, CArray, RawBin};

/// Errors that can occur while serializing a bitmap.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid C identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for bitmap-export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Encode `bitmap` with `format` and write it to `path`, replacing any existing file.
pub fn write_to_file<F: BitmapFormat + ?Sized>(
    format: &F,
    bitmap: &PackedBitmap,
    path: &Path,
) -> Result<()> {
    let data = format.encode(bitmap);
    std::fs::write(path, &data).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        format = format.name(),
        path = %path.display(),
        len = data.len(),
        "Bitmap written"
    );
    Ok(())
}
