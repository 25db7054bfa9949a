use crate::error::NodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "check")]
    Check,
    #[serde(rename = "getUserPermissions")]
    GetUserPermissions,
    #[serde(rename = "getAuthorizedUsers")]
    GetAuthorizedUsers,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::Check,
        Operation::GetUserPermissions,
        Operation::GetAuthorizedUsers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Check => "check",
            Operation::GetUserPermissions => "getUserPermissions",
            Operation::GetAuthorizedUsers => "getAuthorizedUsers",
        }
    }
}

impl Default for Operation {
    fn default() -> Self {
        Operation::Check
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s.trim())
            .ok_or_else(|| NodeError::UnknownOperation(s.to_string()))
    }
}
