use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiSettings;

use super::model::Track;

/// An error that can occur while querying the catalog. Only ever logged;
/// callers see an empty result list instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog returned status {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Body(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Track>,
}

/// Client for the remote catalog search endpoint.
///
/// Cheap to clone; each search worker thread gets its own copy.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    api_key: String,
    api_host: String,
}

impl CatalogClient {
    pub fn new(api: &ApiSettings) -> Self {
        let http = Client::builder()
            .user_agent(concat!("vivace/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            api_key: api.api_key.clone(),
            api_host: api.api_host.clone(),
        }
    }

    /// Search the catalog for `query`.
    ///
    /// Any failure (connect error, non-2xx status, malformed body) is
    /// logged and yields an empty list, so the UI cannot tell "no results"
    /// from "search failed". Known limitation.
    pub fn search(&self, query: &str) -> Vec<Track> {
        match self.try_search(query) {
            Ok(tracks) => tracks,
            Err(e) => {
                tracing::warn!(query, error = %e, "catalog search failed");
                Vec::new()
            }
        }
    }

    fn try_search(&self, query: &str) -> Result<Vec<Track>, CatalogError> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query)])
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = response.text()?;
        Ok(parse_search_body(&body)?)
    }
}

/// Parse a search response body. An absent `data` array is an empty result
/// set; anything unparseable is an error the caller turns into one.
pub(crate) fn parse_search_body(body: &str) -> Result<Vec<Track>, serde_json::Error> {
    let parsed: SearchResponse = serde_json::from_str(body)?;
    Ok(parsed.data)
}
