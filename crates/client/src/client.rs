//! Permit PDP operation client.

use crate::error::ClientError;
use crate::transport::{HttpTransport, PdpResponse, PdpTransport};
use permit_node_core::definition::{self_test_body, SELF_TEST_PATH};
use permit_node_core::{
    AuthorizedUsersParams, BearerSigner, CheckParams, PdpRequest, PermitCredentials,
    RequestSigner, UserPermissionsParams, ALLOWED_PATH, AUTHORIZED_USERS_PATH,
    USER_PERMISSIONS_PATH,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Issues the three read-only PDP queries.
///
/// Every call is one signed JSON POST; the decoded response body is returned
/// unchanged.
#[derive(Clone)]
pub struct PermitApiClient {
    transport: Arc<dyn PdpTransport>,
    signer: Arc<dyn RequestSigner>,
}

impl PermitApiClient {
    pub fn new(transport: Arc<dyn PdpTransport>, signer: Arc<dyn RequestSigner>) -> Self {
        Self { transport, signer }
    }

    /// HTTP transport against `pdp_url` with bearer authentication.
    pub fn from_credentials(credentials: &PermitCredentials) -> Result<Self, ClientError> {
        credentials.validate()?;
        Ok(Self::new(
            Arc::new(HttpTransport::new(credentials.base_url())),
            Arc::new(BearerSigner::new(credentials.api_key.clone())),
        ))
    }

    async fn dispatch(&self, endpoint: &str, body: Value) -> Result<PdpResponse, ClientError> {
        let request = self.signer.sign(PdpRequest::post(endpoint, body))?;
        debug!("POST {}", endpoint);
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            warn!("PDP {} returned HTTP {}", endpoint, response.status);
            return Err(ClientError::from_status(response.status, response.body));
        }
        Ok(response)
    }

    /// POST `body` to `endpoint` and decode the JSON reply.
    pub async fn make_request(&self, endpoint: &str, body: Value) -> Result<Value, ClientError> {
        let response = self.dispatch(endpoint, body).await?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `POST /allowed`. The decision object is passed through uninspected.
    pub async fn check_permission(&self, params: &CheckParams) -> Result<Value, ClientError> {
        params.validate()?;
        let body = serde_json::to_value(params.to_request())
            .map_err(|e| ClientError::InvalidParams(e.to_string()))?;
        self.make_request(ALLOWED_PATH, body).await
    }

    /// `POST /user-permissions`.
    pub async fn get_user_permissions(
        &self,
        params: &UserPermissionsParams,
    ) -> Result<Value, ClientError> {
        params.validate()?;
        let body = serde_json::to_value(params.to_request())
            .map_err(|e| ClientError::InvalidParams(e.to_string()))?;
        self.make_request(USER_PERMISSIONS_PATH, body).await
    }

    /// `POST /authorized_users`.
    pub async fn get_authorized_users(
        &self,
        params: &AuthorizedUsersParams,
    ) -> Result<Value, ClientError> {
        params.validate()?;
        let body = serde_json::to_value(params.to_request())
            .map_err(|e| ClientError::InvalidParams(e.to_string()))?;
        self.make_request(AUTHORIZED_USERS_PATH, body).await
    }

    /// Credential self-test: any 2xx reply passes, whatever the decision says.
    pub async fn test_credentials(&self) -> Result<(), ClientError> {
        self.dispatch(SELF_TEST_PATH, self_test_body()).await?;
        Ok(())
    }
}
