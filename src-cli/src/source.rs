//! Source selection from configuration.

use card_fetch::{DirSource, FetchedImage, HttpSource, ImageSource};

use crate::config::AppConfig;

/// Where a batch reads its originals from.
#[derive(Debug, Clone)]
pub enum CardSource {
    Http(HttpSource),
    Dir(DirSource),
}

impl CardSource {
    /// A configured source directory wins over the URL template.
    pub fn from_config(config: &AppConfig) -> Result<Self, anyhow::Error> {
        match &config.source_dir {
            Some(dir) => {
                if !dir.is_dir() {
                    anyhow::bail!("source directory {} does not exist", dir.display());
                }
                tracing::info!(dir = %dir.display(), "Reading originals from disk");
                Ok(Self::Dir(DirSource::new(dir, config.name_prefix.clone())))
            }
            None => {
                tracing::info!(template = %config.base_url, "Downloading originals");
                Ok(Self::Http(HttpSource::new(
                    config.base_url.clone(),
                    config.http_timeout,
                )?))
            }
        }
    }
}

impl ImageSource for CardSource {
    async fn fetch(&self, index: u32) -> card_fetch::Result<FetchedImage> {
        match self {
            Self::Http(s) => s.fetch(index).await,
            Self::Dir(s) => s.fetch(index).await,
        }
    }
}
