//! Resource attributes: parse a JSON string, or pass an object through.

use crate::error::NodeError;
use permit_node_core::Attributes;
use serde_json::Value;

pub fn parse_attributes(value: Option<&Value>) -> Result<Attributes, NodeError> {
    match value {
        None | Some(Value::Null) => Ok(Attributes::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(Value::String(text)) => {
            if text.trim().is_empty() {
                return Ok(Attributes::new());
            }
            match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => Ok(map),
                Ok(Value::Null) => Ok(Attributes::new()),
                Ok(other) => Err(NodeError::InvalidAttributes(format!(
                    "expected a JSON object, got {}",
                    kind_of(&other)
                ))),
                Err(e) => Err(NodeError::InvalidAttributes(e.to_string())),
            }
        }
        Some(other) => Err(NodeError::InvalidAttributes(format!(
            "expected a JSON object, got {}",
            kind_of(other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
