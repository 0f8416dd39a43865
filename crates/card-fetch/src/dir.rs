//! Local directory of previously retrieved originals.

use std::path::PathBuf;

use crate::{FetchError, FetchedImage, ImageSource, Result, card_stem};

/// Extensions tried, in order, when looking up `<prefix><NN>.<ext>`.
const EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp"];

/// Reads `<dir>/<prefix><NN>.<ext>` for each index.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
    prefix: String,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// First existing candidate file for `index`.
    async fn locate(&self, index: u32) -> Option<PathBuf> {
        let stem = card_stem(&self.prefix, index);
        for ext in EXTENSIONS {
            let path = self.dir.join(format!("{stem}.{ext}"));
            if tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
                return Some(path);
            }
        }
        None
    }
}

impl ImageSource for DirSource {
    async fn fetch(&self, index: u32) -> Result<FetchedImage> {
        let path = self.locate(index).await.ok_or_else(|| FetchError::Missing {
            index,
            dir: self.dir.clone(),
        })?;
        let bytes = tokio::fs::read(&path).await?;
        tracing::debug!(index, path = %path.display(), len = bytes.len(), "Read image from disk");
        Ok(FetchedImage {
            origin: path.display().to_string(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dir_source_reads_matching_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ar03.png"), b"png bytes").unwrap();

        let source = DirSource::new(dir.path(), "ar");
        let fetched = source.fetch(3).await.unwrap();
        assert_eq!(fetched.bytes, b"png bytes");
        assert_eq!(fetched.origin, dir.path().join("ar03.png").display().to_string());
    }

    #[tokio::test]
    async fn test_dir_source_prefers_jpg() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ar01.png"), b"png").unwrap();
        std::fs::write(dir.path().join("ar01.jpg"), b"jpg").unwrap();

        let source = DirSource::new(dir.path(), "ar");
        let fetched = source.fetch(1).await.unwrap();
        assert_eq!(fetched.bytes, b"jpg");
        assert!(fetched.origin.ends_with("ar01.jpg"));
    }

    #[tokio::test]
    async fn test_dir_source_missing_index() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path(), "ar");

        let err = source.fetch(5).await.unwrap_err();
        assert!(matches!(err, FetchError::Missing { index: 5, .. }));
    }

    #[tokio::test]
    async fn test_dir_source_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("ar02.jpg")).unwrap();
        std::fs::write(dir.path().join("ar02.png"), b"png").unwrap();

        let source = DirSource::new(dir.path(), "ar");
        let fetched = source.fetch(2).await.unwrap();
        assert!(fetched.origin.ends_with("ar02.png"));
    }
}
