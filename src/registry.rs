//! Project and token registry, loaded from a JSON file.
//!
//! ```json
//! {
//!   "tokens": [{ "id": "dai-dai-stablecoin", "symbol": "DAI", "decimals": 18, "sinceBlock": 8950398 }],
//!   "projects": [{
//!     "name": "Arbitrum",
//!     "bridges": [{ "address": "0x011B...", "sinceBlock": 0, "tokens": ["dai-dai-stablecoin"] }]
//!   }]
//! }
//! ```

use crate::domain::{AssetId, EthereumAddress, Project, ProjectBridge, Token};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Cannot read registry {0}: {1}")]
    Io(String, std::io::Error),
    #[error("Malformed registry: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Bridge {bridge} of {project} references unknown token {token}")]
    UnknownToken {
        project: String,
        bridge: EthereumAddress,
        token: AssetId,
    },
    #[error("Duplicate project name: {0}")]
    DuplicateProject(String),
    #[error("Duplicate token symbol {symbol} in project {project}")]
    DuplicateSymbol { project: String, symbol: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryFile {
    tokens: Vec<Token>,
    projects: Vec<ProjectEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectEntry {
    name: String,
    bridges: Vec<BridgeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BridgeEntry {
    address: EthereumAddress,
    since_block: u64,
    tokens: Vec<AssetId>,
}

/// Read-only set of tracked projects and known tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    pub projects: Vec<Project>,
    pub tokens: Vec<Token>,
}

impl Registry {
    pub fn new(projects: Vec<Project>, tokens: Vec<Token>) -> Self {
        Self { projects, tokens }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Io(path.display().to_string(), e))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = serde_json::from_str(content)?;
        let token_by_id: HashMap<&AssetId, &Token> =
            file.tokens.iter().map(|t| (&t.id, t)).collect();

        let mut names = HashSet::new();
        let mut projects = Vec::with_capacity(file.projects.len());
        for entry in &file.projects {
            if !names.insert(entry.name.as_str()) {
                return Err(RegistryError::DuplicateProject(entry.name.clone()));
            }

            let mut symbols: HashMap<&str, &AssetId> = HashMap::new();
            let mut bridges = Vec::with_capacity(entry.bridges.len());
            for bridge in &entry.bridges {
                let mut tokens = Vec::with_capacity(bridge.tokens.len());
                for id in &bridge.tokens {
                    let token = token_by_id.get(id).ok_or_else(|| RegistryError::UnknownToken {
                        project: entry.name.clone(),
                        bridge: bridge.address.clone(),
                        token: id.clone(),
                    })?;
                    // Same token on several bridges is fine; two tokens sharing a symbol is not.
                    if let Some(existing) = symbols.insert(token.symbol.as_str(), &token.id) {
                        if existing != &token.id {
                            return Err(RegistryError::DuplicateSymbol {
                                project: entry.name.clone(),
                                symbol: token.symbol.clone(),
                            });
                        }
                    }
                    tokens.push((*token).clone());
                }
                bridges.push(ProjectBridge {
                    address: bridge.address.clone(),
                    since_block: bridge.since_block,
                    tokens,
                });
            }

            projects.push(Project {
                name: entry.name.clone(),
                bridges,
            });
        }

        Ok(Registry {
            projects,
            tokens: file.tokens,
        })
    }

    pub fn bridge_count(&self) -> usize {
        self.projects.iter().map(|p| p.bridges.len()).sum()
    }
}
