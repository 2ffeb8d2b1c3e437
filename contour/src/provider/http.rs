//! HTTP transport for tile sources.

use super::types::ProviderError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Minimal async GET used by tile sources; mocked in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Returns the body of a successful response.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

/// Default User-Agent string for HTTP requests.
const DEFAULT_USER_AGENT: &str = concat!("contour/", env!("CARGO_PKG_VERSION"));

/// Default whole-request timeout. Per-tile timeouts are enforced by the
/// fetcher; this only bounds a connection that never resolves.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Client whose whole-request timeout is `timeout_secs`.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(DEFAULT_USER_AGENT)
            .pool_max_idle_per_host(8)
            .build()
            .map_err(|e| {
                ProviderError::HttpError(format!("Failed to create async HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        trace!(url, "Tile request");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(
                url,
                error = %e,
                is_connect = e.is_connect(),
                is_timeout = e.is_timeout(),
                "Tile request failed"
            );
            ProviderError::HttpError(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "Tile response");
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::HttpError(format!("Failed to read response: {}", e)))?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Mock async HTTP client that returns a fixed response and records
    /// every requested URL.
    #[derive(Clone)]
    pub struct MockAsyncHttpClient {
        pub response: Result<Vec<u8>, ProviderError>,
        pub requested: Arc<Mutex<Vec<String>>>,
    }

    impl MockAsyncHttpClient {
        pub fn new(response: Result<Vec<u8>, ProviderError>) -> Self {
            Self {
                response,
                requested: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl AsyncHttpClient for MockAsyncHttpClient {
        async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
            self.requested.lock().push(url.to_string());
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn test_mock_async_client_success() {
        let mock = MockAsyncHttpClient::new(Ok(vec![1, 2, 3, 4]));

        let result = mock.get("http://example.com").await;
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(mock.requested.lock().as_slice(), ["http://example.com"]);
    }

    #[tokio::test]
    async fn test_mock_async_client_error() {
        let mock = MockAsyncHttpClient::new(Err(ProviderError::HttpError(
            "Test error".to_string(),
        )));

        let result = mock.get("http://example.com").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(AsyncReqwestClient::with_timeout(5).is_ok());
    }
}
