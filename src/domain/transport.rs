//! HTTP transport abstraction used by the page fetcher.

use crate::error::TransportError;
use async_trait::async_trait;

/// Status code and raw body of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Minimal "GET with query parameters" contract.
///
/// Timeouts and TLS are the implementation's concern. A non-2xx status is
/// not an error at this level; callers inspect [`TransportResponse::status`].
///
/// # Implementations
///
/// - [`crate::infrastructure::http::ReqwestTransport`] - `reqwest` based client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issues one GET request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response was received at all.
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<TransportResponse, TransportError>;
}
