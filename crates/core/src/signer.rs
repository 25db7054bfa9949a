//! Outbound request envelope and the signers that authenticate it.

use crate::error::CoreError;
use serde_json::Value;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";

/// A JSON POST to a PDP endpoint, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct PdpRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl PdpRequest {
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            headers: vec![(CONTENT_TYPE.to_string(), "application/json".to_string())],
            body,
        }
    }

    /// Set a header, replacing any existing value (names compare case-insensitively).
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Attaches authentication to a request before it is sent.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, request: PdpRequest) -> Result<PdpRequest, CoreError>;
}

impl<F> RequestSigner for F
where
    F: Fn(PdpRequest) -> Result<PdpRequest, CoreError> + Send + Sync,
{
    fn sign(&self, request: PdpRequest) -> Result<PdpRequest, CoreError> {
        self(request)
    }
}

/// Adds `Authorization: Bearer <api key>`.
#[derive(Clone)]
pub struct BearerSigner {
    api_key: String,
}

impl BearerSigner {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl RequestSigner for BearerSigner {
    fn sign(&self, request: PdpRequest) -> Result<PdpRequest, CoreError> {
        if self.api_key.trim().is_empty() {
            return Err(CoreError::Signing("API key is empty".to_string()));
        }
        Ok(request.with_header(AUTHORIZATION, format!("Bearer {}", self.api_key)))
    }
}

impl std::fmt::Debug for BearerSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerSigner").finish_non_exhaustive()
    }
}
