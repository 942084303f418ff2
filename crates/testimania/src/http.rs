//! Native HTTP transport

use std::time::Duration;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::loader::{Transport, TransportResponse};

/// [`Transport`] over a `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a default client
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing client
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn timeout_ms(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, LoadError> {
        let map_err = |err: reqwest::Error| {
            if err.is_timeout() {
                LoadError::Timeout {
                    ms: timeout_ms(timeout),
                }
            } else {
                LoadError::transport(err.to_string())
            }
        };

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(map_err)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_err)?;
        tracing::trace!(url, status, bytes = body.len(), "response received");
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}
