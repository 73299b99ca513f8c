use async_trait::async_trait;
use log::info;

use crate::error::{Error, Result, Stage, check_status};

/// Retrieves the markup of a source page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the body of `url` as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain GET fetcher over a shared [`reqwest::Client`].
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        info!("Fetching {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Error::transport(Stage::Fetch))?;

        check_status(Stage::Fetch, response)
            .await?
            .text()
            .await
            .map_err(Error::transport(Stage::Fetch))
    }
}
