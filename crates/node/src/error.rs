use permit_node_client::ClientError;
use permit_node_core::CoreError;
use thiserror::Error;

/// Failure while handling a single input item.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Invalid resource attributes JSON: {0}")]
    InvalidAttributes(String),

    #[error("Expression error: {0}")]
    Expression(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl NodeError {
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<CoreError> for NodeError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidParameter { name, message } => {
                NodeError::InvalidParameter { name, message }
            }
            other => NodeError::Client(other.into()),
        }
    }
}

/// Error that aborted a run, tagged with the failing item.
#[derive(Debug, Error)]
#[error("Item {item_index}: {source}")]
pub struct NodeOperationError {
    pub item_index: usize,
    #[source]
    pub source: NodeError,
}
