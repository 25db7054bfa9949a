//! Per-item parameter resolution.
//!
//! Node parameters are configured once; string values may reference the
//! current item with `{{ $json.path }}`. Missing parameters fall back to the
//! defaults in [`NodeDescription`].

use crate::attributes::parse_attributes;
use crate::description::{names, NodeDescription};
use crate::error::NodeError;
use crate::operation::Operation;
use crate::template::resolve_templates;
use permit_node_core::{
    parse_resource_types, Attributes, AuthorizedUsersParams, CheckParams, UserPermissionsParams,
};
use serde_json::{Map, Value};

/// A fully resolved call for one item.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationCall {
    Check(CheckParams),
    UserPermissions(UserPermissionsParams),
    AuthorizedUsers(AuthorizedUsersParams),
}

impl OperationCall {
    pub fn operation(&self) -> Operation {
        match self {
            OperationCall::Check(_) => Operation::Check,
            OperationCall::UserPermissions(_) => Operation::GetUserPermissions,
            OperationCall::AuthorizedUsers(_) => Operation::GetAuthorizedUsers,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NodeParameters {
    values: Map<String, Value>,
    description: NodeDescription,
}

/// Parameter accessors bound to one item and operation.
struct ItemScope<'a> {
    params: &'a NodeParameters,
    item: &'a Value,
    operation: Operation,
}

impl NodeParameters {
    pub fn new(values: Map<String, Value>) -> Self {
        Self {
            values,
            description: NodeDescription::permit(),
        }
    }

    pub fn from_value(value: Value) -> Result<Self, NodeError> {
        match value {
            Value::Object(map) => Ok(Self::new(map)),
            Value::Null => Ok(Self::new(Map::new())),
            _ => Err(NodeError::invalid_parameter(
                "parameters",
                "must be a JSON object",
            )),
        }
    }

    pub fn operation(&self, item: &Value) -> Result<Operation, NodeError> {
        match self.values.get(names::OPERATION) {
            None | Some(Value::Null) => Ok(Operation::default()),
            Some(raw) => match resolve_templates(raw, item)? {
                Value::String(name) => name.parse(),
                other => Err(NodeError::invalid_parameter(
                    names::OPERATION,
                    format!("must be a string, got {}", other),
                )),
            },
        }
    }

    /// Build the typed call for `item`.
    pub fn resolve_call(&self, item: &Value) -> Result<OperationCall, NodeError> {
        let operation = self.operation(item)?;
        let scope = ItemScope {
            params: self,
            item,
            operation,
        };
        match operation {
            Operation::Check => scope.check().map(OperationCall::Check),
            Operation::GetUserPermissions => {
                scope.user_permissions().map(OperationCall::UserPermissions)
            }
            Operation::GetAuthorizedUsers => {
                scope.authorized_users().map(OperationCall::AuthorizedUsers)
            }
        }
    }
}

impl<'a> ItemScope<'a> {
    fn raw(&self, name: &str) -> Option<Value> {
        self.params.values.get(name).cloned().or_else(|| {
            self.params
                .description
                .property(name, self.operation)
                .map(|p| p.default.clone())
        })
    }

    fn value(&self, name: &str) -> Result<Option<Value>, NodeError> {
        match self.raw(name) {
            None => Ok(None),
            Some(raw) => match resolve_templates(&raw, self.item)? {
                Value::Null => Ok(None),
                resolved => Ok(Some(resolved)),
            },
        }
    }

    fn string(&self, name: &str) -> Result<Option<String>, NodeError> {
        match self.value(name)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(_) => Err(NodeError::invalid_parameter(name, "must be a string")),
        }
    }

    fn required_string(&self, name: &str) -> Result<String, NodeError> {
        match self.string(name)? {
            Some(s) if !s.trim().is_empty() => Ok(s),
            _ => Err(NodeError::invalid_parameter(name, "is required")),
        }
    }

    fn optional_string(&self, name: &str) -> Result<Option<String>, NodeError> {
        Ok(self.string(name)?.filter(|s| !s.trim().is_empty()))
    }

    fn flag(&self, name: &str) -> Result<bool, NodeError> {
        match self.value(name)? {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(b),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" | "" => Ok(false),
                _ => Err(NodeError::invalid_parameter(name, "must be a boolean")),
            },
            Some(_) => Err(NodeError::invalid_parameter(name, "must be a boolean")),
        }
    }

    fn resource_types(&self) -> Result<Option<Vec<String>>, NodeError> {
        match self.value(names::RESOURCE_TYPES)? {
            None => Ok(None),
            Some(Value::String(raw)) => Ok(parse_resource_types(&raw)),
            Some(Value::Array(items)) => {
                let mut types = Vec::new();
                for item in items {
                    let text = item.as_str().ok_or_else(|| {
                        NodeError::invalid_parameter(
                            names::RESOURCE_TYPES,
                            "must contain only strings",
                        )
                    })?;
                    let text = text.trim();
                    if !text.is_empty() {
                        types.push(text.to_string());
                    }
                }
                Ok(if types.is_empty() { None } else { Some(types) })
            }
            Some(_) => Err(NodeError::invalid_parameter(
                names::RESOURCE_TYPES,
                "must be a comma-separated string or a list",
            )),
        }
    }

    /// Attributes for the check: the explicit parameter if set, else the
    /// item's `body` object.
    fn check_attributes(&self) -> Result<Attributes, NodeError> {
        if let Some(value) = self.params.values.get(names::RESOURCE_ATTRIBUTES) {
            let resolved = resolve_templates(value, self.item)?;
            return parse_attributes(Some(&resolved));
        }
        match self.item.get("body") {
            Some(Value::Object(map)) => Ok(map.clone()),
            _ => Ok(Attributes::new()),
        }
    }

    fn check(&self) -> Result<CheckParams, NodeError> {
        let enable_abac = self.flag(names::ENABLE_ABAC_CHECK)?;
        let resource_attributes = if enable_abac {
            self.check_attributes()?
        } else {
            Attributes::new()
        };
        let params = CheckParams {
            user: self.required_string(names::USER)?,
            action: self.required_string(names::ACTION)?,
            resource: self.required_string(names::RESOURCE)?,
            tenant: self.optional_string(names::TENANT)?,
            resource_key: self.optional_string(names::RESOURCE_KEY)?,
            resource_attributes,
            enable_abac,
        };
        params.validate()?;
        Ok(params)
    }

    fn user_permissions(&self) -> Result<UserPermissionsParams, NodeError> {
        let params = UserPermissionsParams {
            user: self.required_string(names::USER_PERMISSIONS_USER)?,
            resource_types: self.resource_types()?,
            enable_abac: self.flag(names::ENABLE_ABAC)?,
        };
        params.validate()?;
        Ok(params)
    }

    fn authorized_users(&self) -> Result<AuthorizedUsersParams, NodeError> {
        let attributes = self.value(names::RESOURCE_ATTRIBUTES)?;
        let params = AuthorizedUsersParams {
            action: self.required_string(names::AUTHORIZED_USERS_ACTION)?,
            resource_type: self.required_string(names::AUTHORIZED_USERS_RESOURCE_TYPE)?,
            tenant: self.optional_string(names::AUTHORIZED_USERS_TENANT)?,
            resource_attributes: parse_attributes(attributes.as_ref())?,
            enable_abac: self.flag(names::ENABLE_ABAC_USERS)?,
        };
        params.validate()?;
        Ok(params)
    }
}
