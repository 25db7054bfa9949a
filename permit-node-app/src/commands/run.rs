use crate::config::{load_config, AppConfig};
use crate::input::read_items;
use anyhow::{Context, Result};
use permit_node::{NodeItem, NodeOutput, PermitNode};
use permit_node_client::PermitApiClient;
use permit_node_core::PermitCredentials;
use tracing::info;

pub async fn run(config_path: &str, items_source: Option<&str>) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load config: {}", config_path))?;
    let credentials = config.credentials().context("Invalid Permit credentials")?;
    let items = read_items(items_source)?;

    info!(
        "running {} item(s) against {}",
        items.len(),
        credentials.base_url()
    );

    let outputs = execute(&config, &credentials, &items).await?;
    println!("{}", serde_json::to_string_pretty(&outputs)?);
    Ok(())
}

/// Build the node from `config` and run it over `items`.
pub async fn execute(
    config: &AppConfig,
    credentials: &PermitCredentials,
    items: &[NodeItem],
) -> Result<Vec<NodeOutput>> {
    let client =
        PermitApiClient::from_credentials(credentials).context("Failed to build PDP client")?;
    let node = PermitNode::new(client, config.parameters())
        .continue_on_fail(config.node.continue_on_fail);

    Ok(node.execute(items).await?)
}
