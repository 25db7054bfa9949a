pub mod client;
pub mod error;
pub mod transport;

pub use client::PermitApiClient;
pub use error::ClientError;
pub use transport::{HttpTransport, PdpResponse, PdpTransport};
