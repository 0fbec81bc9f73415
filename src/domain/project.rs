//! Tracked projects, their bridges, and token metadata.

use super::primitives::{AssetId, EthereumAddress};
use serde::{Deserialize, Serialize};

/// Token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: AssetId,
    pub symbol: String,
    pub decimals: u8,
    /// First block at which the token is tracked.
    pub since_block: u64,
}

/// A bridge contract belonging to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBridge {
    pub address: EthereumAddress,
    pub since_block: u64,
    pub tokens: Vec<Token>,
}

/// A tracked project. `name` is the key used in report output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub bridges: Vec<ProjectBridge>,
}
