//! Sequential item executor.

use crate::error::{NodeError, NodeOperationError};
use crate::params::{NodeParameters, OperationCall};
use permit_node_client::PermitApiClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Keys an item envelope may carry next to `json`.
const ENVELOPE_KEYS: [&str; 3] = ["pairedItem", "binary", "error"];

/// One input item. Bare objects deserialize as `{ "json": <object> }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeItem {
    pub json: Value,
}

impl NodeItem {
    pub fn new(json: Value) -> Self {
        Self { json }
    }
}

impl<'de> Deserialize<'de> for NodeItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let json = match value {
            Value::Object(mut map) if is_envelope(&map) => {
                map.remove("json").unwrap_or(Value::Null)
            }
            other => other,
        };
        Ok(NodeItem { json })
    }
}

fn is_envelope(map: &serde_json::Map<String, Value>) -> bool {
    map.contains_key("json")
        && map
            .keys()
            .all(|key| key == "json" || ENVELOPE_KEYS.contains(&key.as_str()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One output record, linked to the input it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOutput {
    pub json: Value,
    pub paired_item: PairedItem,
}

impl NodeOutput {
    fn new(json: Value, item: usize) -> Self {
        Self {
            json,
            paired_item: PairedItem { item },
        }
    }

    pub fn is_error(&self) -> bool {
        self.json
            .as_object()
            .map(|obj| obj.len() == 1 && obj.contains_key("error"))
            .unwrap_or(false)
    }
}

/// The Permit node: one client, one parameter set, many items.
#[derive(Clone)]
pub struct PermitNode {
    client: PermitApiClient,
    parameters: NodeParameters,
    continue_on_fail: bool,
}

impl PermitNode {
    pub fn new(client: PermitApiClient, parameters: NodeParameters) -> Self {
        Self {
            client,
            parameters,
            continue_on_fail: false,
        }
    }

    /// Record failures as `{ "error": .. }` outputs instead of aborting.
    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    async fn execute_item(&self, item: &NodeItem) -> Result<Value, NodeError> {
        let call = self.parameters.resolve_call(&item.json)?;
        debug!("operation={}", call.operation());
        let response = match &call {
            OperationCall::Check(params) => self.client.check_permission(params).await?,
            OperationCall::UserPermissions(params) => {
                self.client.get_user_permissions(params).await?
            }
            OperationCall::AuthorizedUsers(params) => {
                self.client.get_authorized_users(params).await?
            }
        };
        Ok(response)
    }

    /// Process `items` in order, one PDP round trip at a time.
    pub async fn execute(&self, items: &[NodeItem]) -> Result<Vec<NodeOutput>, NodeOperationError> {
        let mut outputs = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match self.execute_item(item).await {
                Ok(response) => outputs.push(NodeOutput::new(response, index)),
                Err(err) if self.continue_on_fail => {
                    warn!("item {} failed, continuing: {}", index, err);
                    outputs.push(NodeOutput::new(json!({ "error": err.to_string() }), index));
                }
                Err(err) => {
                    warn!("item {} failed, aborting: {}", index, err);
                    return Err(NodeOperationError {
                        item_index: index,
                        source: err,
                    });
                }
            }
        }

        info!("processed {} item(s)", outputs.len());
        Ok(outputs)
    }
}
