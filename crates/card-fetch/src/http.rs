//! HTTP retrieval from a URL template.

use std::time::Duration;

use crate::{FetchError, FetchedImage, INDEX_PLACEHOLDER, ImageSource, Result};

const USER_AGENT: &str = concat!("tarot-bitmap/", env!("CARGO_PKG_VERSION"));

/// Downloads `template` with `{index}` replaced by the 2-digit index.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    template: String,
}

impl HttpSource {
    pub fn new(template: impl Into<String>, timeout: Duration) -> Result<Self> {
        let template = template.into();
        if !template.contains(INDEX_PLACEHOLDER) {
            return Err(FetchError::InvalidTemplate(template));
        }
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, template })
    }

    pub fn url_for(&self, index: u32) -> String {
        self.template
            .replace(INDEX_PLACEHOLDER, &format!("{index:02}"))
    }
}

impl ImageSource for HttpSource {
    async fn fetch(&self, index: u32) -> Result<FetchedImage> {
        let url = self.url_for(index);
        let resp = self.http.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        tracing::debug!(index, url = %url, len = body.len(), "Downloaded image");
        Ok(FetchedImage {
            origin: url,
            bytes: body.to_vec(),
        })
    }
}
