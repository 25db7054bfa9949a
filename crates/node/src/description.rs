//! Static description of the Permit node: operations and their parameters.

use crate::operation::Operation;
use permit_node_core::definition::CREDENTIAL_NAME;
use serde::Serialize;
use serde_json::{json, Value};

pub mod names {
    pub const OPERATION: &str = "operation";

    pub const USER: &str = "user";
    pub const ACTION: &str = "action";
    pub const TENANT: &str = "tenant";
    pub const RESOURCE: &str = "resource";
    pub const RESOURCE_KEY: &str = "resourceKey";
    pub const ENABLE_ABAC_CHECK: &str = "enableAbacCheck";

    pub const USER_PERMISSIONS_USER: &str = "userPermissionsUser";
    pub const RESOURCE_TYPES: &str = "resourceTypes";
    pub const ENABLE_ABAC: &str = "enableAbac";

    pub const AUTHORIZED_USERS_ACTION: &str = "authorizedUsersAction";
    pub const AUTHORIZED_USERS_RESOURCE_TYPE: &str = "authorizedUsersResourceType";
    pub const AUTHORIZED_USERS_TENANT: &str = "authorizedUsersTenant";
    pub const ENABLE_ABAC_USERS: &str = "enableAbacUsers";

    /// Shared by the check and authorized-users operations.
    pub const RESOURCE_ATTRIBUTES: &str = "resourceAttributes";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    String,
    Boolean,
    Json,
    Options,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationOption {
    pub name: &'static str,
    pub value: Operation,
    pub description: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub default: Value,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    /// Operations this property applies to; empty means all.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub show_for: Vec<Operation>,
}

impl NodeProperty {
    fn new(display_name: &'static str, name: &'static str, kind: PropertyKind, default: Value) -> Self {
        Self {
            display_name,
            name,
            kind,
            default,
            required: false,
            description: None,
            placeholder: None,
            show_for: Vec::new(),
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn description(mut self, text: &'static str) -> Self {
        self.description = Some(text);
        self
    }

    fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    fn show_for(mut self, operation: Operation) -> Self {
        self.show_for.push(operation);
        self
    }

    pub fn applies_to(&self, operation: Operation) -> bool {
        self.show_for.is_empty() || self.show_for.contains(&operation)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRef {
    pub name: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: &'static str,
    pub name: &'static str,
    pub group: Vec<&'static str>,
    pub version: u32,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub credentials: Vec<CredentialRef>,
    pub operations: Vec<OperationOption>,
    pub properties: Vec<NodeProperty>,
}

impl NodeDescription {
    pub fn permit() -> Self {
        use names::*;
        use Operation::*;

        let operations = vec![
            OperationOption {
                name: "Check",
                value: Check,
                description: "Check if user has permission",
                action: "Check permission",
            },
            OperationOption {
                name: "Get User Permissions",
                value: GetUserPermissions,
                description: "Get all permissions for a user",
                action: "Get user permissions",
            },
            OperationOption {
                name: "Get Authorized Users",
                value: GetAuthorizedUsers,
                description: "Get users authorized for an action",
                action: "Get authorized users",
            },
        ];

        let properties = vec![
            NodeProperty::new("Operation", OPERATION, PropertyKind::Options, json!(Check.as_str())),
            // check
            NodeProperty::new("User", USER, PropertyKind::String, json!(""))
                .required()
                .description("User identifier")
                .show_for(Check),
            NodeProperty::new("Action", ACTION, PropertyKind::String, json!(""))
                .required()
                .description("Action to check")
                .show_for(Check),
            NodeProperty::new("Tenant", TENANT, PropertyKind::String, json!("default"))
                .description("The tenant (defaults to \"default\")")
                .show_for(Check),
            NodeProperty::new("Resource", RESOURCE, PropertyKind::String, json!(""))
                .required()
                .description("Resource to check access to")
                .show_for(Check),
            NodeProperty::new("Resource Key", RESOURCE_KEY, PropertyKind::String, json!(""))
                .description("Specific resource instance to check (optional)")
                .show_for(Check),
            NodeProperty::new("Enable ABAC", ENABLE_ABAC_CHECK, PropertyKind::Boolean, json!(false))
                .description("Whether to enable ABAC with auto-extracted attributes")
                .show_for(Check),
            // getUserPermissions
            NodeProperty::new("User", USER_PERMISSIONS_USER, PropertyKind::String, json!(""))
                .required()
                .placeholder("user@example.com")
                .description("The user key to get permissions for")
                .show_for(GetUserPermissions),
            NodeProperty::new("Resource Types", RESOURCE_TYPES, PropertyKind::String, json!(""))
                .placeholder("document,__tenant")
                .description("Comma-separated list of resource types to filter by (optional)")
                .show_for(GetUserPermissions),
            NodeProperty::new("Enable ABAC", ENABLE_ABAC, PropertyKind::Boolean, json!(false))
                .description("Whether to enable ABAC user permissions")
                .show_for(GetUserPermissions),
            // getAuthorizedUsers
            NodeProperty::new("Action", AUTHORIZED_USERS_ACTION, PropertyKind::String, json!(""))
                .required()
                .placeholder("read")
                .description("The action to check authorization for")
                .show_for(GetAuthorizedUsers),
            NodeProperty::new("Resource Type", AUTHORIZED_USERS_RESOURCE_TYPE, PropertyKind::String, json!(""))
                .required()
                .placeholder("document")
                .description("The type of resource")
                .show_for(GetAuthorizedUsers),
            NodeProperty::new("Tenant", AUTHORIZED_USERS_TENANT, PropertyKind::String, json!("default"))
                .description("The tenant (defaults to \"default\")")
                .show_for(GetAuthorizedUsers),
            NodeProperty::new("Resource Attributes (JSON)", RESOURCE_ATTRIBUTES, PropertyKind::Json, json!("{}"))
                .description("Resource attributes as JSON object")
                .show_for(Check)
                .show_for(GetAuthorizedUsers),
            NodeProperty::new("Enable ABAC", ENABLE_ABAC_USERS, PropertyKind::Boolean, json!(false))
                .description("Whether to enable ABAC for authorized users")
                .show_for(GetAuthorizedUsers),
        ];

        Self {
            display_name: "Permit",
            name: "permit",
            group: vec!["transform"],
            version: 1,
            subtitle: "={{$parameter[\"operation\"]}}",
            description: "Interact with Permit.io authorization service",
            credentials: vec![CredentialRef {
                name: CREDENTIAL_NAME,
                required: true,
            }],
            operations,
            properties,
        }
    }

    pub fn property(&self, name: &str, operation: Operation) -> Option<&NodeProperty> {
        self.properties
            .iter()
            .find(|p| p.name == name && p.applies_to(operation))
    }

    /// Properties shown for `operation`, in declaration order.
    pub fn properties_for(&self, operation: Operation) -> impl Iterator<Item = &NodeProperty> {
        self.properties.iter().filter(move |p| p.applies_to(operation))
    }
}
