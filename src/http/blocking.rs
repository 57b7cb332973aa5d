//! Blocking request executor — same algorithm as the async one with the
//! transport call and backoff sleeps made synchronous.
//!
//! Classification, backoff schedule, signature derivation, caching, and
//! decoding are all shared with the async path; only the transport type
//! and the sleep primitive differ.

use std::sync::Arc;

use serde_json::Value;

use crate::cache::ResponseCache;
use crate::error::HttpError;
use crate::http::retry::RetryConfig;
use crate::params::Query;

/// Blocking HTTP core shared by every endpoint method.
#[derive(Debug, Clone)]
pub(crate) struct BlockingHttp {
    base_url: String,
    client: reqwest::blocking::Client,
    retry: RetryConfig,
    cache: Option<Arc<ResponseCache>>,
}

impl BlockingHttp {
    pub(crate) fn new(
        base_url: String,
        client: reqwest::blocking::Client,
        retry: RetryConfig,
        cache: Option<Arc<ResponseCache>>,
    ) -> Self {
        Self {
            base_url,
            client,
            retry,
            cache,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute one logical GET, occupying the calling thread for the full
    /// cache-check/transport/retry/decode sequence.
    pub(crate) fn get_json(&self, path: &str, query: &Query) -> Result<Value, HttpError> {
        let url = format!("{}/{}?{}", self.base_url, path, query.encode());
        let signature = query.signature(path);

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&signature) {
                tracing::trace!(signature = %signature, "cache hit");
                return Ok(hit);
            }
        }

        let value = self.request_with_retry(&url)?;

        if let Some(cache) = &self.cache {
            cache.put(signature, value.clone());
        }
        Ok(value)
    }

    fn request_with_retry(&self, url: &str) -> Result<Value, HttpError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.do_request(url) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::debug!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying request to {}",
                        url
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn do_request(&self, url: &str) -> Result<Value, HttpError> {
        let response = self.client.get(url).send()?;
        let status = response.status();

        if status.is_success() {
            let body = response.text()?;
            return serde_json::from_str(&body)
                .map_err(|e| HttpError::decode(url, &e.to_string(), &body));
        }

        let body = response.text().unwrap_or_else(|e| {
            tracing::warn!("failed to read error response body: {}", e);
            String::new()
        });
        Err(HttpError::Status {
            status: status.as_u16(),
            body,
            url: url.to_string(),
        })
    }
}
