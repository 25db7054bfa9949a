use anyhow::Result;
use permit_node::NodeDescription;
use permit_node_core::CredentialDefinition;
use serde_json::{json, Value};

pub fn describe() -> Value {
    json!({
        "node": NodeDescription::permit(),
        "credential": CredentialDefinition::permit_api(),
    })
}

pub fn run() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&describe())?);
    Ok(())
}
