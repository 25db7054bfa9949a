//! Stored secrets for a Permit PDP connection.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cloud PDP used when no URL is configured.
pub const DEFAULT_PDP_URL: &str = "https://cloudpdp.api.permit.io";

pub const API_KEY_ENV: &str = "PERMIT_API_KEY";
pub const PDP_URL_ENV: &str = "PERMIT_PDP_URL";

/// API key and PDP base URL. Immutable once handed to a client.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PermitCredentials {
    pub api_key: String,
    #[serde(default = "default_pdp_url")]
    pub pdp_url: String,
}

fn default_pdp_url() -> String {
    DEFAULT_PDP_URL.to_string()
}

impl PermitCredentials {
    pub fn new(api_key: impl Into<String>, pdp_url: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            pdp_url: pdp_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(default_pdp_url),
        }
    }

    /// Build credentials from `PERMIT_API_KEY` and `PERMIT_PDP_URL` as
    /// answered by `lookup`.
    pub fn from_vars<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CoreError::Credential(format!("{} is not set", API_KEY_ENV)))?;
        let credentials = Self::new(api_key, lookup(PDP_URL_ENV));
        credentials.validate()?;
        Ok(credentials)
    }

    /// PDP base URL without surrounding whitespace or a trailing slash.
    pub fn base_url(&self) -> &str {
        self.pdp_url.trim().trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api_key.trim().is_empty() {
            return Err(CoreError::Credential("API key must not be empty".to_string()));
        }
        if self.base_url().is_empty() {
            return Err(CoreError::Credential("PDP URL must not be empty".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for PermitCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermitCredentials")
            .field("api_key", &"<redacted>")
            .field("pdp_url", &self.pdp_url)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_pdp_url() {
        let creds = PermitCredentials::new("permit_key_123", None);
        assert_eq!(creds.pdp_url, DEFAULT_PDP_URL);
        assert_eq!(creds.base_url(), "https://cloudpdp.api.permit.io");
    }

    #[test]
    fn test_blank_pdp_url_falls_back_to_default() {
        let creds = PermitCredentials::new("k", Some("   ".to_string()));
        assert_eq!(creds.pdp_url, DEFAULT_PDP_URL);
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let creds = PermitCredentials::new("k", Some("  http://localhost:7766/ \n".to_string()));
        assert_eq!(creds.base_url(), "http://localhost:7766");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let creds = PermitCredentials::new("permit_key_secret", None);
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("permit_key_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let creds = PermitCredentials::new("  ", None);
        match creds.validate() {
            Err(CoreError::Credential(msg)) => assert!(msg.contains("API key")),
            other => panic!("Expected credential error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_vars() {
        let creds = PermitCredentials::from_vars(lookup(&[
            (API_KEY_ENV, "permit_key_abc"),
            (PDP_URL_ENV, "http://pdp.internal:7000"),
        ]))
        .unwrap();
        assert_eq!(creds.api_key, "permit_key_abc");
        assert_eq!(creds.base_url(), "http://pdp.internal:7000");
    }

    #[test]
    fn test_from_vars_missing_key() {
        let result = PermitCredentials::from_vars(lookup(&[(PDP_URL_ENV, "http://x")]));
        assert!(matches!(result, Err(CoreError::Credential(_))));
    }

    #[test]
    fn test_deserialize_uses_default_url() {
        let creds: PermitCredentials =
            serde_json::from_value(serde_json::json!({"apiKey": "k"})).unwrap();
        assert_eq!(creds.pdp_url, DEFAULT_PDP_URL);
    }
}
