//! Configuration for reaching the persistence and insights service.

use reqwest::Url;

use crate::Error;

/// The API base used when none is given, matching the service's default port.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/";

/// Where the dashboard finds the persistence and insights service.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    api_base: Url,
}

impl ClientConfig {
    /// Create a config from an API base URL such as `http://localhost:5000`.
    ///
    /// The endpoint paths (`api/transactions`, `api/insights`) are joined onto
    /// the base, so a missing trailing slash is added.
    ///
    /// # Errors
    /// Returns [Error::InvalidApiBase] if `api_base` is not an absolute
    /// `http` or `https` URL.
    pub fn new(api_base: &str) -> Result<Self, Error> {
        let mut url =
            Url::parse(api_base).map_err(|_| Error::InvalidApiBase(api_base.to_owned()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidApiBase(api_base.to_owned()));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self { api_base: url })
    }

    /// The normalized base URL, always ending in `/`.
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
        }
    }
}
