//! HTTP seam between the operation client and the PDP.

use crate::error::ClientError;
use async_trait::async_trait;
use permit_node_core::PdpRequest;
use tracing::debug;

/// Raw PDP reply. Status handling and decoding happen in the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdpResponse {
    pub status: u16,
    pub body: String,
}

impl PdpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a signed request. Implementations must not retry.
#[async_trait]
pub trait PdpTransport: Send + Sync {
    async fn send(&self, request: PdpRequest) -> Result<PdpResponse, ClientError>;
}

/// reqwest-backed transport bound to one PDP base URL.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl PdpTransport for HttpTransport {
    async fn send(&self, request: PdpRequest) -> Result<PdpResponse, ClientError> {
        let url = self.url_for(&request.path);
        debug!("pdp url={}", url);

        let mut req_builder = self.client.post(&url);
        for (name, value) in &request.headers {
            req_builder = req_builder.header(name.as_str(), value.as_str());
        }

        let response = req_builder.json(&request.body).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("pdp status={} body_len={}", status, body.len());
        Ok(PdpResponse { status, body })
    }
}
