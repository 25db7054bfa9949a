//! Reading input items for `permit-node run`.

use anyhow::{bail, Context, Result};
use permit_node::NodeItem;
use serde_json::Value;
use std::io::Read;

/// Read items from a file path, or stdin when `source` is `-`.
/// With no source the node runs once over a single empty item.
pub fn read_items(source: Option<&str>) -> Result<Vec<NodeItem>> {
    let text = match source {
        None => return Ok(vec![empty_item()]),
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read items from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read items file: {}", path))?,
    };
    parse_items(&text)
}

/// Accepts an array of items or a single item. Each item is either
/// `{"json": {...}}` or a bare object.
pub fn parse_items(text: &str) -> Result<Vec<NodeItem>> {
    if text.trim().is_empty() {
        return Ok(vec![empty_item()]);
    }

    let value: Value = serde_json::from_str(text).context("Items are not valid JSON")?;
    let values = match value {
        Value::Array(values) => values,
        Value::Object(_) => vec![value],
        other => bail!("Items must be a JSON array or object, got {}", other),
    };

    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            serde_json::from_value(v).with_context(|| format!("Invalid item at index {}", i))
        })
        .collect()
}

fn empty_item() -> NodeItem {
    NodeItem::new(Value::Object(Default::default()))
}
