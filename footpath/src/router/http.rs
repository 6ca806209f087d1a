//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use super::types::RouterError;

/// Default timeout applied at the HTTP layer.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for async HTTP GET operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request, resolving to the response body.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, RouterError>> + Send;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Creates a new client with the default timeout.
    pub fn new() -> Result<Self, RouterError> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Creates a new client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, RouterError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RouterError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, RouterError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RouterError::Http(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouterError::Status(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| RouterError::Http(format!("Failed to read response: {}", e)))
    }
}
