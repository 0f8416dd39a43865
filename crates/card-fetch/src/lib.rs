//! Retrieval of numbered source images.
//!
//! Provides an HTTP source driven by a URL template and a directory source
//! for reprocessing originals that were already downloaded.

pub mod dir;
pub mod http;

use std::future::Future;
use std::path::PathBuf;

pub use dir::DirSource;
pub use http::HttpSource;

/// Placeholder replaced with the zero-padded 2-digit index in URL templates.
pub const INDEX_PLACEHOLDER: &str = "{index}";

/// Unified error type for the card-fetch crate.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("No image for index {index} in {}", .dir.display())]
    Missing { index: u32, dir: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL template must contain {{index}}: {0}")]
    InvalidTemplate(String),
}

/// Result type alias for card-fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Encoded image bytes and where they were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    /// URL or file path the bytes came from.
    pub origin: String,
    pub bytes: Vec<u8>,
}

/// A source of encoded images addressed by index.
///
/// Any error means "skip this index"; callers never retry.
pub trait ImageSource: Send + Sync {
    /// Fetch the raw encoded bytes for `index`.
    fn fetch(&self, index: u32) -> impl Future<Output = Result<FetchedImage>> + Send;
}

/// File stem for a card, e.g. `ar05`.
pub fn card_stem(prefix: &str, index: u32) -> String {
    format!("{prefix}{index:02}")
}
