//! Declarative description of the `permitApi` credential type.

use serde::Serialize;
use serde_json::{json, Value};

use crate::credentials::DEFAULT_PDP_URL;

pub const CREDENTIAL_NAME: &str = "permitApi";
pub const SELF_TEST_PATH: &str = "/allowed";

/// One configurable field of the credential.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialProperty {
    pub display_name: &'static str,
    pub name: &'static str,
    pub secret: bool,
    pub default: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

/// How stored secrets are attached to outbound requests.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthRule {
    BearerHeader { header: &'static str, property: &'static str },
}

/// Request issued to verify that stored credentials are accepted.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialTestRequest {
    pub method: &'static str,
    pub path: &'static str,
    pub body: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDefinition {
    pub name: &'static str,
    pub display_name: &'static str,
    pub documentation_url: &'static str,
    pub properties: Vec<CredentialProperty>,
    pub authenticate: AuthRule,
    pub test: CredentialTestRequest,
}

impl CredentialDefinition {
    pub fn permit_api() -> Self {
        Self {
            name: CREDENTIAL_NAME,
            display_name: "Permit API",
            documentation_url: "https://docs.permit.io/",
            properties: vec![
                CredentialProperty {
                    display_name: "API Key",
                    name: "apiKey",
                    secret: true,
                    default: "",
                    description: None,
                },
                CredentialProperty {
                    display_name: "PDP URL",
                    name: "pdpUrl",
                    secret: false,
                    default: DEFAULT_PDP_URL,
                    description: Some("Policy Decision Point URL"),
                },
            ],
            authenticate: AuthRule::BearerHeader {
                header: "Authorization",
                property: "apiKey",
            },
            test: CredentialTestRequest {
                method: "POST",
                path: SELF_TEST_PATH,
                body: self_test_body(),
            },
        }
    }
}

/// Body of the connectivity check. The allow/deny answer is ignored.
pub fn self_test_body() -> Value {
    json!({
        "user": { "key": "test-user" },
        "action": "read",
        "resource": { "type": "test-resource" }
    })
}
