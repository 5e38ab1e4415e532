#![deny(missing_docs)]

//! # Fetch Capability
//!
//! Retrieval of `!include` targets. Decoding never opens connections on its own:
//! the caller hands a [`Fetcher`] to each decode call, and nothing is shared
//! between calls.

use crate::error::{AppError, AppResult};
use std::collections::HashMap;
use url::Url;

/// Retrieves the text body behind a URL.
pub trait Fetcher {
    /// Performs a single blocking GET. No retries.
    fn fetch(&self, url: &Url) -> AppResult<String>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &Url) -> AppResult<String> {
        (**self).fetch(url)
    }
}

/// Serves bodies from an in-memory table keyed by absolute URL.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
}

impl StaticFetcher {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `body` under `url`.
    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &Url) -> AppResult<String> {
        self.bodies
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| AppError::Fetch(format!("GET {}: not found", url)))
    }
}

/// Fetches over HTTP(S) with a private `ureq` agent; `file://` URLs are read from disk.
#[cfg(feature = "client")]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

#[cfg(feature = "client")]
impl HttpFetcher {
    /// Creates a fetcher with a fresh agent.
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

#[cfg(feature = "client")]
impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "client")]
impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> AppResult<String> {
        log::debug!("fetching include {}", url);

        if url.scheme() == "file" {
            let path = url
                .to_file_path()
                .map_err(|_| AppError::Fetch(format!("Invalid file URL: {}", url)))?;
            return std::fs::read_to_string(&path)
                .map_err(|e| AppError::Fetch(format!("Failed to read {:?}: {}", path, e)));
        }

        let mut response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|e| AppError::Fetch(format!("GET {}: {}", url, e)))?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| AppError::Fetch(format!("GET {}: {}", url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_fetcher_hit() {
        let fetcher = StaticFetcher::new().with("http://example.com/a.raml", "title: A");
        let url = Url::parse("http://example.com/a.raml").unwrap();
        assert_eq!(fetcher.fetch(&url).unwrap(), "title: A");
    }

    #[test]
    fn test_static_fetcher_miss_is_fetch_error() {
        let fetcher = StaticFetcher::new();
        let url = Url::parse("http://example.com/missing.json").unwrap();
        let err = fetcher.fetch(&url).unwrap_err();
        assert!(matches!(err, AppError::Fetch(_)));
        assert!(format!("{}", err).contains("missing.json"));
    }

    #[cfg(feature = "client")]
    #[test]
    fn test_http_fetcher_reads_file_urls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"type": "string"}"#).unwrap();

        let url = Url::from_file_path(&path).unwrap();
        let body = HttpFetcher::new().fetch(&url).unwrap();
        assert_eq!(body, r#"{"type": "string"}"#);
    }
}
