//! Request bodies for the three PDP endpoints and the parameters that build them.
//!
//! Optional parts of a body are omitted rather than sent empty: the PDP reads a
//! missing `context` or `attributes` as "ABAC disabled" and a missing
//! `resource_types` as "no filter".

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TENANT: &str = "default";

pub const ALLOWED_PATH: &str = "/allowed";
pub const USER_PERMISSIONS_PATH: &str = "/user-permissions";
pub const AUTHORIZED_USERS_PATH: &str = "/authorized_users";

/// Free-form resource attributes.
pub type Attributes = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub key: String,
}

impl UserRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub tenant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

/// Body of `POST /allowed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub user: UserRef,
    pub action: String,
    pub resource: CheckResource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPermissionsContext {
    pub enable_abac_user_permissions: bool,
}

/// Body of `POST /user-permissions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPermissionsRequest {
    pub user: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<UserPermissionsContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizedUsersResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub tenant: String,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedUsersContext {
    pub enable_abac_authorized_users: bool,
}

/// Body of `POST /authorized_users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizedUsersRequest {
    pub action: String,
    pub resource: AuthorizedUsersResource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<AuthorizedUsersContext>,
}

/// Unset, empty and whitespace-only tenants all mean `"default"`.
pub fn normalize_tenant(tenant: Option<&str>) -> String {
    match tenant.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_TENANT.to_string(),
    }
}

/// Split a comma-separated list of resource types.
///
/// Elements are trimmed and blanks dropped; `None` means "no filter".
pub fn parse_resource_types(raw: &str) -> Option<Vec<String>> {
    let types: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if types.is_empty() {
        None
    } else {
        Some(types)
    }
}

fn require(value: &str, name: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid_parameter(name, "must be a non-empty string"));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Inputs of the permission check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckParams {
    pub user: String,
    pub action: String,
    pub resource: String,
    pub tenant: Option<String>,
    pub resource_key: Option<String>,
    /// Only sent when `enable_abac` is set and the map is non-empty.
    pub resource_attributes: Attributes,
    pub enable_abac: bool,
}

impl CheckParams {
    pub fn new(
        user: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            action: action.into(),
            resource: resource.into(),
            ..Default::default()
        }
    }

    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    pub fn with_resource_key(mut self, key: impl Into<String>) -> Self {
        self.resource_key = Some(key.into());
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.resource_attributes = attributes;
        self
    }

    pub fn with_abac(mut self, enabled: bool) -> Self {
        self.enable_abac = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        require(&self.user, "user")?;
        require(&self.action, "action")?;
        require(&self.resource, "resource")
    }

    pub fn to_request(&self) -> CheckRequest {
        let attributes = if self.enable_abac && !self.resource_attributes.is_empty() {
            Some(self.resource_attributes.clone())
        } else {
            None
        };
        CheckRequest {
            user: UserRef::new(self.user.clone()),
            action: self.action.clone(),
            resource: CheckResource {
                resource_type: self.resource.clone(),
                tenant: normalize_tenant(self.tenant.as_deref()),
                key: non_blank(self.resource_key.clone()),
                attributes,
            },
        }
    }
}

/// Inputs of the user-permissions listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPermissionsParams {
    pub user: String,
    pub resource_types: Option<Vec<String>>,
    pub enable_abac: bool,
}

impl UserPermissionsParams {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ..Default::default()
        }
    }

    pub fn with_resource_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_abac(mut self, enabled: bool) -> Self {
        self.enable_abac = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        require(&self.user, "user")
    }

    pub fn to_request(&self) -> UserPermissionsRequest {
        UserPermissionsRequest {
            user: UserRef::new(self.user.clone()),
            resource_types: self
                .resource_types
                .clone()
                .filter(|types| !types.is_empty()),
            context: self.enable_abac.then_some(UserPermissionsContext {
                enable_abac_user_permissions: true,
            }),
        }
    }
}

/// Inputs of the authorized-users listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorizedUsersParams {
    pub action: String,
    pub resource_type: String,
    pub tenant: Option<String>,
    /// Always sent, even with ABAC disabled.
    pub resource_attributes: Attributes,
    pub enable_abac: bool,
}

impl AuthorizedUsersParams {
    pub fn new(action: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            ..Default::default()
        }
    }

    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.resource_attributes = attributes;
        self
    }

    pub fn with_abac(mut self, enabled: bool) -> Self {
        self.enable_abac = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        require(&self.action, "action")?;
        require(&self.resource_type, "resource_type")
    }

    pub fn to_request(&self) -> AuthorizedUsersRequest {
        AuthorizedUsersRequest {
            action: self.action.clone(),
            resource: AuthorizedUsersResource {
                resource_type: self.resource_type.clone(),
                tenant: normalize_tenant(self.tenant.as_deref()),
                attributes: self.resource_attributes.clone(),
            },
            context: self.enable_abac.then_some(AuthorizedUsersContext {
                enable_abac_authorized_users: true,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_check_minimal_body() {
        let body = serde_json::to_value(CheckParams::new("alice", "read", "document").to_request())
            .unwrap();
        assert_eq!(
            body,
            json!({
                "user": {"key": "alice"},
                "action": "read",
                "resource": {"type": "document", "tenant": "default"}
            })
        );
    }

    #[test]
    fn test_check_attributes_require_abac() {
        let params = CheckParams::new("alice", "read", "document")
            .with_attributes(attrs(json!({"dept": "eng"})));
        let body = serde_json::to_value(params.to_request()).unwrap();
        assert!(body["resource"].get("attributes").is_none());

        let body = serde_json::to_value(params.with_abac(true).to_request()).unwrap();
        assert_eq!(body["resource"]["attributes"], json!({"dept": "eng"}));
    }

    #[test]
    fn test_check_abac_with_empty_attributes_omits_field() {
        let params = CheckParams::new("alice", "read", "document").with_abac(true);
        let body = serde_json::to_value(params.to_request()).unwrap();
        assert!(body["resource"].get("attributes").is_none());
    }

    #[test]
    fn test_check_resource_key() {
        let params = CheckParams::new("alice", "read", "document")
            .with_tenant("acme")
            .with_resource_key("doc-42");
        let body = serde_json::to_value(params.to_request()).unwrap();
        assert_eq!(body["resource"]["key"], "doc-42");
        assert_eq!(body["resource"]["tenant"], "acme");

        let blank = CheckParams::new("alice", "read", "document").with_resource_key(" ");
        let body = serde_json::to_value(blank.to_request()).unwrap();
        assert!(body["resource"].get("key").is_none());
    }

    #[test]
    fn test_check_validate() {
        assert!(CheckParams::new("alice", "read", "document").validate().is_ok());
        match CheckParams::new("alice", "", "document").validate() {
            Err(CoreError::InvalidParameter { name, .. }) => assert_eq!(name, "action"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
        assert!(CheckParams::new(" ", "read", "document").validate().is_err());
    }

    #[test]
    fn test_user_permissions_body() {
        let params = UserPermissionsParams::new("bob")
            .with_resource_types(["document", "__tenant"])
            .with_abac(true);
        let body = serde_json::to_value(params.to_request()).unwrap();
        assert_eq!(
            body,
            json!({
                "user": {"key": "bob"},
                "resource_types": ["document", "__tenant"],
                "context": {"enable_abac_user_permissions": true}
            })
        );
    }

    #[test]
    fn test_user_permissions_omits_empty_filter_and_context() {
        let params = UserPermissionsParams::new("bob").with_resource_types(Vec::<String>::new());
        let body = serde_json::to_value(params.to_request()).unwrap();
        assert_eq!(body, json!({"user": {"key": "bob"}}));
    }

    #[test]
    fn test_authorized_users_body() {
        let params = AuthorizedUsersParams::new("read", "document")
            .with_tenant("default")
            .with_attributes(attrs(json!({"dept": "eng"})));
        let body = serde_json::to_value(params.to_request()).unwrap();
        assert_eq!(
            body,
            json!({
                "action": "read",
                "resource": {"type": "document", "tenant": "default", "attributes": {"dept": "eng"}}
            })
        );
    }

    #[test]
    fn test_authorized_users_always_sends_attributes() {
        let body =
            serde_json::to_value(AuthorizedUsersParams::new("read", "document").to_request()).unwrap();
        assert_eq!(body["resource"]["attributes"], json!({}));
        assert!(body.get("context").is_none());

        let body = serde_json::to_value(
            AuthorizedUsersParams::new("read", "document")
                .with_abac(true)
                .to_request(),
        )
        .unwrap();
        assert_eq!(body["context"], json!({"enable_abac_authorized_users": true}));
    }

    #[test]
    fn test_parse_resource_types() {
        assert_eq!(parse_resource_types(""), None);
        assert_eq!(parse_resource_types(" , "), None);
        assert_eq!(
            parse_resource_types("a, b ,c"),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(
            parse_resource_types("document,,__tenant"),
            Some(vec!["document".to_string(), "__tenant".to_string()])
        );
    }

    #[test]
    fn test_normalize_tenant() {
        assert_eq!(normalize_tenant(None), "default");
        assert_eq!(normalize_tenant(Some("")), "default");
        assert_eq!(normalize_tenant(Some("  ")), "default");
        assert_eq!(normalize_tenant(Some("acme")), "acme");
    }
}
