//! YAML configuration for the `permit-node` binary.

use permit_node::NodeParameters;
use permit_node_core::credentials::{API_KEY_ENV, PDP_URL_ENV};
use permit_node_core::PermitCredentials;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Config file is empty")]
    Empty,

    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    #[error("Config missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Name of an environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub pdp_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub parameters: serde_json::Map<String, Value>,
    #[serde(default)]
    pub continue_on_fail: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub node: NodeConfig,
}

/// Load configuration from a YAML file.
///
/// # Errors
/// Returns error if the file is missing, empty or not valid YAML.
pub fn load_config(config_path: &str) -> Result<AppConfig, ConfigError> {
    let config_file = Path::new(config_path);

    if !config_file.exists() {
        return Err(ConfigError::NotFound(config_path.to_string()));
    }

    let content = std::fs::read_to_string(config_file)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    if content.trim().is_empty() {
        return Err(ConfigError::Empty);
    }
    serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml(e.to_string()))
}

impl AppConfig {
    /// Credentials with `PERMIT_API_KEY` / `PERMIT_PDP_URL` taking precedence.
    pub fn credentials(&self) -> Result<PermitCredentials, ConfigError> {
        self.credentials_with(|name| std::env::var(name).ok())
    }

    pub fn credentials_with<F>(&self, lookup: F) -> Result<PermitCredentials, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let file = &self.credentials;

        // Environment first, then the file.
        let layered = |name: &str| -> Option<String> {
            let from_env = non_blank(lookup(name));
            match name {
                API_KEY_ENV => from_env
                    .or_else(|| non_blank(file.api_key.clone()))
                    .or_else(|| {
                        file.api_key_env
                            .as_deref()
                            .and_then(|var| non_blank(lookup(var)))
                    }),
                PDP_URL_ENV => from_env.or_else(|| non_blank(file.pdp_url.clone())),
                _ => from_env,
            }
        };

        if layered(API_KEY_ENV).is_none() {
            return Err(ConfigError::MissingField("credentials.api_key"));
        }
        PermitCredentials::from_vars(layered).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn parameters(&self) -> NodeParameters {
        NodeParameters::new(self.node.parameters.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("permit.yaml");
        fs::write(
            &config_file,
            "credentials:\n  api_key: permit_key_file\n  pdp_url: http://localhost:7766\nnode:\n  continue_on_fail: true\n  parameters:\n    operation: check\n    user: alice\n",
        )
        .unwrap();

        let config = load_config(config_file.to_str().unwrap()).unwrap();
        assert!(config.node.continue_on_fail);
        assert_eq!(config.node.parameters["user"], "alice");

        let creds = config.credentials_with(no_env).unwrap();
        assert_eq!(creds.api_key, "permit_key_file");
        assert_eq!(creds.base_url(), "http://localhost:7766");
    }

    #[test]
    fn test_config_file_not_found() {
        match load_config("/nonexistent/permit.yaml") {
            Err(ConfigError::NotFound(path)) => assert!(path.contains("permit.yaml")),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("permit.yaml");
        fs::write(&config_file, "  \n").unwrap();
        assert!(matches!(
            load_config(config_file.to_str().unwrap()),
            Err(ConfigError::Empty)
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            parse_config("node: [unclosed"),
            Err(ConfigError::InvalidYaml(_))
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let config =
            parse_config("credentials:\n  api_key: from_file\n  pdp_url: http://file:7000\n").unwrap();
        let creds = config
            .credentials_with(|name| match name {
                "PERMIT_API_KEY" => Some("from_env".to_string()),
                "PERMIT_PDP_URL" => Some("http://env:7000".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(creds.api_key, "from_env");
        assert_eq!(creds.base_url(), "http://env:7000");
    }

    #[test]
    fn test_api_key_env_indirection() {
        let config = parse_config("credentials:\n  api_key_env: MY_PERMIT_KEY\n").unwrap();
        let creds = config
            .credentials_with(|name| (name == "MY_PERMIT_KEY").then(|| "indirect".to_string()))
            .unwrap();
        assert_eq!(creds.api_key, "indirect");
        assert_eq!(creds.base_url(), "https://cloudpdp.api.permit.io");
    }

    #[test]
    fn test_file_url_used_without_env() {
        let config = parse_config("credentials:\n  pdp_url: http://file:7000/\n").unwrap();
        let creds = config
            .credentials_with(|name| (name == "PERMIT_API_KEY").then(|| "from_env".to_string()))
            .unwrap();
        assert_eq!(creds.api_key, "from_env");
        assert_eq!(creds.base_url(), "http://file:7000");
    }

    #[test]
    fn test_missing_api_key() {
        let config = parse_config("node:\n  parameters: {}\n").unwrap();
        match config.credentials_with(no_env) {
            Err(ConfigError::MissingField(field)) => assert_eq!(field, "credentials.api_key"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }
}
