//! `reqwest` implementation of the HTTP transport.

use crate::domain::transport::{HttpTransport, TransportResponse};
use crate::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// HTTP transport backed by a shared `reqwest::Client`.
///
/// The client carries the request timeout; there is no retry layer.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wraps a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify_error)?;
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

/// Maps a `reqwest` error to a transport error.
///
/// The URL is stripped first since it carries the access token.
fn classify_error(e: reqwest::Error) -> TransportError {
    let (is_timeout, is_connect) = (e.is_timeout(), e.is_connect());
    let message = e.without_url().to_string();
    if is_timeout {
        TransportError::Timeout(message)
    } else if is_connect {
        TransportError::Connect(message)
    } else {
        TransportError::Request(message)
    }
}
