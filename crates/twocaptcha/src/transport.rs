//! HTTP transport seam.
//!
//! The client only needs two exchanges: a form POST and a plain GET, both
//! returning the full body as text. Status codes are not interpreted; the
//! service signals everything in the body.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;
use std::time::Duration;

use twocaptcha_common::constants::FORM_CONTENT_TYPE;
use twocaptcha_common::{SolverError, TransportError};

/// Minimal HTTP transport used by the client
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST an already-encoded form body and return the response text
    async fn post_form(&self, url: &str, body: String) -> Result<String, TransportError>;

    /// GET a URL with extra query pairs appended to any query it already has
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post_form(&self, url: &str, body: String) -> Result<String, TransportError> {
        (**self).post_form(url, body).await
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        (**self).get(url, query).await
    }
}

/// `reqwest`-backed transport. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, SolverError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SolverError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Reuse an existing client and its connection pool
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_form(&self, url: &str, body: String) -> Result<String, TransportError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(TransportError::send)?;

        response.text().await.map_err(TransportError::read)
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(TransportError::send)?;

        response.text().await.map_err(TransportError::read)
    }
}
