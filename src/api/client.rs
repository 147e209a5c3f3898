use crate::api::types::{Endpoint, MediaItem, Page};
use crate::config::Config;
use crate::util::{one_month_ago, validate_base_url};
use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Path of the multi-type search endpoint (movies, series and people).
const SEARCH_PATH: &str = "/search/multi";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out")]
    Timeout,
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
    #[error("Insecure base URL: HTTPS required (except localhost for testing)")]
    InsecureBaseUrl,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err)
        }
    }
}

struct Inner {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<SecretString>,
    language: String,
    region: String,
}

/// Client for the media metadata API.
///
/// Cheap to clone: all clones share one connection pool. Timeouts are owned by
/// the underlying `reqwest::Client`, not by callers.
#[derive(Clone)]
pub struct MediaApi {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for MediaApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaApi")
            .field("base_url", &self.inner.base_url.as_str())
            .field(
                "api_key",
                &self.inner.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("language", &self.inner.language)
            .field("region", &self.inner.region)
            .finish()
    }
}

impl MediaApi {
    /// Build a client from configuration, with pooling and a request timeout.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Self::with_client(
            client,
            &config.api_base_url,
            config.resolved_api_key(),
            &config.language,
            &config.region,
        )
    }

    /// Build a client around an existing `reqwest::Client`.
    ///
    /// The base URL must be HTTPS unless it points at a loopback host.
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        api_key: Option<SecretString>,
        language: &str,
        region: &str,
    ) -> Result<Self, ApiError> {
        let base_url = validate_base_url(base_url).map_err(|e| {
            tracing::error!(base_url = %base_url, error = %e, "Rejecting media API base URL");
            match e {
                crate::util::UrlValidationError::Insecure => ApiError::InsecureBaseUrl,
                other => ApiError::InvalidUrl(other.to_string()),
            }
        })?;

        if api_key.is_none() {
            tracing::warn!("No media API key configured; requests will likely be rejected");
        }

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                base_url,
                api_key,
                language: language.to_string(),
                region: region.to_string(),
            }),
        })
    }

    /// Fetch one page of a category endpoint.
    pub async fn fetch_page(
        &self,
        endpoint: &Endpoint,
        page: u32,
    ) -> Result<Page<MediaItem>, ApiError> {
        let url = self.endpoint_url(endpoint, page)?;
        tracing::debug!(path = endpoint.path, page, "Fetching category page");
        self.get_page(url).await
    }

    /// Run a multi-type search for `query`.
    pub async fn search(&self, query: &str, page: u32) -> Result<Page<MediaItem>, ApiError> {
        let mut url = self.url_for(SEARCH_PATH)?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("page", &page.to_string());
        tracing::debug!(query = %query, page, "Searching media API");
        self.get_page(url).await
    }

    /// Full request URL for `endpoint` at `page`.
    ///
    /// Parameter order: `api_key`, `language`, endpoint params, optional
    /// region and release-date filters, then `page`.
    pub fn endpoint_url(&self, endpoint: &Endpoint, page: u32) -> Result<Url, ApiError> {
        let mut url = self.url_for(endpoint.path)?;
        {
            let mut query = url.query_pairs_mut();
            query.extend_pairs(endpoint.params.iter().copied());
            if endpoint.regional {
                query.append_pair("region", &self.inner.region);
            }
            if endpoint.recent_releases {
                let since = one_month_ago(chrono::Utc::now().date_naive());
                query.append_pair("primary_release_date.gte", &since.format("%Y-%m-%d").to_string());
            }
            query.append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    /// Base URL joined with `path`, carrying the credential and language pairs.
    fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(path.trim_start_matches('/').split('/'));

        {
            let mut query = url.query_pairs_mut();
            if let Some(key) = &self.inner.api_key {
                query.append_pair("api_key", key.expose_secret());
            }
            query.append_pair("language", &self.inner.language);
        }
        Ok(url)
    }

    async fn get_page(&self, url: Url) -> Result<Page<MediaItem>, ApiError> {
        let response = self.inner.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }

        let body = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        let page: Page<MediaItem> = serde_json::from_slice(&body)?;
        tracing::trace!(
            page = page.page,
            total_pages = page.total_pages,
            items = page.items.len(),
            "Decoded page"
        );
        Ok(page)
    }
}

async fn read_limited_bytes(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, ApiError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
