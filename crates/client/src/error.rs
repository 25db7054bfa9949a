use permit_node_core::CoreError;
use thiserror::Error;

/// Failures of a PDP round trip. None of these are retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Invalid credentials: {0}")]
    Credentials(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Request to PDP failed: {0}")]
    Transport(String),

    #[error("PDP rejected credentials ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("PDP returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON from PDP: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { status, .. } | ClientError::Status { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub(crate) fn from_status(status: u16, body: String) -> Self {
        if status == 401 || status == 403 {
            ClientError::Unauthorized { status, body }
        } else {
            ClientError::Status { status, body }
        }
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Signing(msg) => ClientError::Signing(msg),
            CoreError::Credential(msg) => ClientError::Credentials(msg),
            other @ CoreError::InvalidParameter { .. } => {
                ClientError::InvalidParams(other.to_string())
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
