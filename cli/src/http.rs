//! HTTP retrieval of the index page and documents.

use std::time::Duration;

use tokio::runtime::Runtime;

use rfcsearch::{DocumentSource, Error, Result};

/// Fetches `<base_url><key>.txt` over HTTP.
///
/// The source owns a Tokio runtime and blocks on every request, so it can be
/// used from the synchronous pipeline driver.
pub struct HttpSource {
    runtime: Runtime,
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source fetching documents relative to `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let runtime = Runtime::new()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Other(format!("HTTP client: {}", e)))?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            runtime,
            client,
            base_url,
        })
    }

    /// URL of the document with the given key.
    pub fn url_for(&self, key: &str) -> String {
        format!("{}{}.txt", self.base_url, key)
    }

    /// Fetch a page as text.
    pub fn fetch_page(&self, url: &str) -> Result<String> {
        log::info!("Fetching {}", url);
        let bytes = self.get(url).map_err(|message| Error::Fetch {
            name: url.to_string(),
            message,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn get(&self, url: &str) -> std::result::Result<Vec<u8>, String> {
        self.runtime.block_on(async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| e.to_string())?;
            let body = response.bytes().await.map_err(|e| e.to_string())?;
            Ok(body.to_vec())
        })
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self, key: &str) -> Result<Vec<u8>> {
        self.get(&self.url_for(key)).map_err(|message| Error::Fetch {
            name: key.to_string(),
            message,
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}
