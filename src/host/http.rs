//! host::http
//!
//! `HttpFetch` implementation backed by reqwest.
//!
//! # Design
//!
//! Only the status, the `Content-Type` header, and the first
//! [`SNIFF_LIMIT`] bytes of the body are read. The rest of the response is
//! dropped unread, so large downloads are never buffered.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;

use super::traits::{FetchedResource, HostError, HttpFetch};

/// Bytes of body kept for sniffing.
pub const SNIFF_LIMIT: usize = 1024;

/// User-Agent header value for requests.
const USER_AGENT_VALUE: &str = concat!("natorder/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches resources over HTTP(S) with reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Result<Self, HostError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HostError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HostError::Unavailable(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn fetch_head(&self, url: &str) -> Result<FetchedResource, HostError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| HostError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(HostError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let mut response = self
            .client
            .get(parsed)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(|e| HostError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut body_prefix = Vec::new();
        while body_prefix.len() < SNIFF_LIMIT {
            match response
                .chunk()
                .await
                .map_err(|e| HostError::Network(e.to_string()))?
            {
                Some(bytes) => body_prefix.extend_from_slice(&bytes),
                None => break,
            }
        }
        body_prefix.truncate(SNIFF_LIMIT);

        Ok(FetchedResource {
            url: final_url,
            status,
            content_type,
            body_prefix,
        })
    }
}
