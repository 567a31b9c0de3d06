//! Metadata HTTP client
//!
//! Plain GETs, no authentication, no retries. Any transport error or
//! non-success status ends the run.

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::config::PROBE_INFO_HOST;
use crate::error::{GeneratorError, Result};

pub struct MetadataClient {
    client: Client,
}

impl MetadataClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(GeneratorError::HttpClient)?;

        Ok(Self { client })
    }

    /// Fetch the full response body of `uri`
    pub async fn fetch(&self, uri: &str) -> Result<Vec<u8>> {
        debug!("GET {}", uri);
        let fetch_err = |source| GeneratorError::Fetch {
            uri: uri.to_string(),
            source,
        };

        let response = self
            .client
            .get(uri)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;

        let body = response.bytes().await.map_err(fetch_err)?;
        info!("Fetched {} bytes from {}", body.len(), uri);

        Ok(body.to_vec())
    }
}

/// Resolve the URI actually requested for app listings.
///
/// The probeinfo service sits behind a CDN; when `uri` points at exactly that
/// host a `t=<timestamp>` query parameter is appended so every run sees fresh
/// listings. Any other host is returned unchanged.
pub fn app_listings_request_uri(uri: &str, now: DateTime<Utc>) -> Result<String> {
    let mut parsed = Url::parse(uri).map_err(|source| GeneratorError::InvalidUri {
        uri: uri.to_string(),
        source,
    })?;

    if parsed.host_str() != Some(PROBE_INFO_HOST) {
        return Ok(uri.to_string());
    }

    let timestamp = now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
    parsed.query_pairs_mut().append_pair("t", &timestamp);

    Ok(parsed.into())
}
