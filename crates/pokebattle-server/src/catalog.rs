//! PokeAPI catalog client

use crate::config::CatalogConfig;
use log::debug;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use pokebattle_core::{Catalog, CreatureDetail, CreatureIndex, Error, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Blocking HTTP client for the PokeAPI creature endpoints.
///
/// Must be built and dropped outside of an async runtime; request handlers
/// reach it through `spawn_blocking`.
pub struct PokeApiCatalog {
    client: Client,
    base_url: String,
    index_limit: u64,
}

impl PokeApiCatalog {
    /// Create a client from catalog config
    pub fn new(config: &CatalogConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            index_limit: config.index_limit,
        })
    }

    /// URL listing the whole index in one page
    pub fn index_url(&self) -> String {
        format!(
            "{}/pokemon?limit={}&offset=0",
            self.base_url, self.index_limit
        )
    }

    /// URL of a single creature
    pub fn detail_url(&self, name: &str) -> String {
        format!(
            "{}/pokemon/{}",
            self.base_url,
            utf8_percent_encode(name, NON_ALPHANUMERIC)
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, name: Option<&str>) -> Result<T> {
        debug!("catalog GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Upstream(format!("request to {} failed: {}", url, e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                if let Some(name) = name {
                    return Err(Error::NotFound(name.to_string()));
                }
                Err(Error::Upstream(format!("{} returned 404", url)))
            }
            status if !status.is_success() => {
                Err(Error::Upstream(format!("{} returned {}", url, status)))
            }
            _ => response
                .json::<T>()
                .map_err(|e| Error::Upstream(format!("invalid response from {}: {}", url, e))),
        }
    }
}

impl Catalog for PokeApiCatalog {
    fn fetch_index(&self) -> Result<CreatureIndex> {
        self.get_json(&self.index_url(), None)
    }

    fn fetch_detail(&self, name: &str) -> Result<CreatureDetail> {
        self.get_json(&self.detail_url(name), Some(name))
    }
}
