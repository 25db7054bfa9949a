//! Permit node core
//!
//! Credentials, request signing and the typed request bodies sent to a
//! Permit.io Policy Decision Point.

pub mod credentials;
pub mod definition;
pub mod error;
pub mod request;
pub mod signer;

pub use credentials::{PermitCredentials, DEFAULT_PDP_URL};
pub use definition::{AuthRule, CredentialDefinition, CredentialProperty, CredentialTestRequest};
pub use error::CoreError;
pub use request::*;
pub use signer::{BearerSigner, PdpRequest, RequestSigner};
