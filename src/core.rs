use governor::{
    Quota, RateLimiter, clock::DefaultClock, middleware::NoOpMiddleware, state::InMemoryState,
    state::NotKeyed,
};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::config::{EdgarConfig, EdgarUrls};
use super::error::{DigestError, Result};

const MAX_RETRIES: u32 = 5;
const INITIAL_BACKOFF_MS: u64 = 1000;
const PREVIEW_CHARS: usize = 200;

type Governor = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// HTTP client for the handful of SEC EDGAR endpoints the digest needs.
///
/// Every request carries the configured User-Agent (SEC.gov rejects anonymous
/// automated traffic), is bounded by a fixed timeout, and passes through a
/// token-bucket limiter so a run never exceeds the SEC's fair-access rate.
///
/// ```rust
/// # use edgar_digest::Edgar;
/// let edgar = Edgar::new("edgar-digest/0.1 (+me@example.com)")?;
/// assert_eq!(edgar.data_url(), "https://data.sec.gov");
/// # Ok::<(), edgar_digest::DigestError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Edgar {
    pub(crate) client: reqwest::Client,
    pub(crate) rate_limiter: Arc<Governor>,
    pub(crate) edgar_archives_url: String,
    pub(crate) edgar_data_url: String,
    pub(crate) edgar_files_url: String,
}

impl Edgar {
    /// Creates a client with the default rate limit (10 req/s), a 30 second
    /// timeout and the public SEC.gov base URLs.
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_config(EdgarConfig {
            user_agent: user_agent.to_string(),
            ..EdgarConfig::default()
        })
    }

    /// Creates a client from explicit settings, e.g. to point it at a local
    /// mirror or to slow it down.
    ///
    /// # Errors
    ///
    /// `DigestError::ConfigError` if the user agent is not a valid header
    /// value, the rate limit is zero, or the HTTP client cannot be built.
    pub fn with_config(config: EdgarConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| DigestError::ConfigError(format!("Invalid user agent: {}", e)))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/html"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| DigestError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            NonZeroU32::new(config.rate_limit).ok_or_else(|| {
                DigestError::ConfigError("Rate limit must be greater than zero".to_string())
            })?,
        )));

        let EdgarUrls {
            archives,
            data,
            files,
        } = config.base_urls;

        Ok(Edgar {
            client,
            rate_limiter,
            edgar_archives_url: archives.trim_end_matches('/').to_string(),
            edgar_data_url: data.trim_end_matches('/').to_string(),
            edgar_files_url: files.trim_end_matches('/').to_string(),
        })
    }

    /// Exponential backoff, `2^retry` seconds ±10% jitter.
    fn calculate_backoff(retry: u32) -> Duration {
        let backoff_ms = INITIAL_BACKOFF_MS * 2_u64.pow(retry);
        let jitter = (backoff_ms as f64 * 0.2 * (fastrand::f64() - 0.5)) as i64;
        Duration::from_millis((backoff_ms as i64 + jitter) as u64)
    }

    /// Fetches a text resource (JSON or HTML).
    ///
    /// - 200: the body.
    /// - 404: `DigestError::NotFound`.
    /// - 429: waits for `Retry-After` (or backoff) and retries, up to 5 times,
    ///   then `DigestError::RateLimitExceeded`.
    /// - anything else: `DigestError::InvalidResponse` with a body preview.
    ///
    /// A `.json` URL answered with an HTML error page yields
    /// `DigestError::UnexpectedContentType`; the SEC sometimes labels real JSON
    /// as `text/html`, so the body is sniffed before giving up.
    pub async fn get(&self, url: &str) -> Result<String> {
        let mut retries = 0;

        loop {
            self.rate_limiter.until_ready().await;
            tracing::debug!("GET {}", url);

            let response = self.client.get(url).send().await?;
            let status = response.status();

            match status {
                StatusCode::OK => {
                    let content_type = response
                        .headers()
                        .get(CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_lowercase);
                    let body = response.text().await?;
                    return check_json_body(url, content_type.as_deref(), body);
                }
                StatusCode::NOT_FOUND => return Err(DigestError::NotFound),
                StatusCode::TOO_MANY_REQUESTS => {
                    if retries >= MAX_RETRIES {
                        return Err(DigestError::RateLimitExceeded);
                    }
                    let wait = response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|h| h.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or_else(|| Self::calculate_backoff(retries));

                    tracing::warn!(
                        "Rate limit hit (429) for {}. Attempt {}/{}. Waiting {:?} before retry.",
                        url,
                        retries + 1,
                        MAX_RETRIES + 1,
                        wait
                    );
                    sleep(wait).await;
                    retries += 1;
                }
                other => {
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    return Err(DigestError::InvalidResponse(format!(
                        "Unexpected status code: {} for URL: {}. Response preview: {}",
                        other,
                        url,
                        preview(&body)
                    )));
                }
            }
        }
    }

    /// Base URL for EDGAR archives.
    pub fn archives_url(&self) -> &str {
        &self.edgar_archives_url
    }

    /// Base URL for the EDGAR data API.
    pub fn data_url(&self) -> &str {
        &self.edgar_data_url
    }

    /// Base URL for EDGAR files.
    pub fn files_url(&self) -> &str {
        &self.edgar_files_url
    }
}

fn check_json_body(url: &str, content_type: Option<&str>, body: String) -> Result<String> {
    let is_html = content_type.is_some_and(|ct| ct.contains("text/html"));
    if !url.ends_with(".json") || !is_html {
        return Ok(body);
    }

    let start = body.trim_start();
    if start.starts_with('{') || start.starts_with('[') {
        tracing::warn!(
            "Received text/html content-type for .json URL, but content appears to be JSON: {}",
            url
        );
        return Ok(body);
    }

    Err(DigestError::UnexpectedContentType {
        url: url.to_string(),
        expected_pattern: "application/json".to_string(),
        got_content_type: content_type.unwrap_or_default().to_string(),
        content_preview: preview(&body),
    })
}

fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_CHARS).collect()
}
