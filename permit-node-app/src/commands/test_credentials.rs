use crate::config::load_config;
use anyhow::{Context, Result};
use permit_node_client::PermitApiClient;

pub async fn run(config_path: &str) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load config: {}", config_path))?;
    let credentials = config.credentials().context("Invalid Permit credentials")?;
    let client =
        PermitApiClient::from_credentials(&credentials).context("Failed to build PDP client")?;

    print!("Permit PDP at {}... ", credentials.base_url());
    match client.test_credentials().await {
        Ok(()) => {
            println!("✓");
            Ok(())
        }
        Err(e) => {
            println!("✗");
            Err(e).context("Credential test failed")
        }
    }
}
