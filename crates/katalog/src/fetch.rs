//! HTTP fetching behind a trait seam

use crate::schema::Product;
use crate::{CatalogError, Result};
use std::io::Read;
use thiserror::Error;

/// Errors from a single fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {0} for {1}")]
    Status(u16, String),

    #[error("Request to {0} failed: {1}")]
    Transport(String, String),
}

/// Fetches a URL to bytes
///
/// The build pipeline only talks to the network through this trait, so
/// tests can substitute in-memory fetchers. Implementations are expected
/// to treat any non-2xx response as an error.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP fetcher using a shared ureq agent
///
/// Requests are anonymous: no cookies, no credentials. Fetches within one
/// build run sequentially, one await at a time.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
        let response = self.agent.get(url).call().map_err(|err| match err {
            ureq::Error::Status(code, _) => FetchError::Status(code, url.to_string()),
            other => FetchError::Transport(url.to_string(), other.to_string()),
        })?;

        let mut data = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut data)
            .map_err(|err| FetchError::Transport(url.to_string(), err.to_string()))?;
        Ok(data)
    }
}

/// Fetch and parse the product collection
///
/// A failed request or a body that is not a JSON array of products is
/// fatal to the build.
pub fn fetch_products(fetcher: &dyn Fetcher, url: &str) -> Result<Vec<Product>> {
    let body = fetcher
        .fetch(url)
        .map_err(|err| CatalogError::ProductFetch(err.to_string()))?;

    let value: serde_json::Value =
        serde_json::from_slice(&body).map_err(|err| CatalogError::ProductFetch(err.to_string()))?;

    if !value.is_array() {
        return Err(CatalogError::ProductFetch(
            "response body is not an array".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|err| CatalogError::ProductFetch(err.to_string()))
}
