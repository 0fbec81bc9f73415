//! Restrict reports to bridges and tokens present in the registry.

use crate::domain::{AssetId, EthereumAddress, Project, Report};
use std::collections::HashMap;

struct BridgeActivation {
    since_block: u64,
    token_since_block: HashMap<AssetId, u64>,
}

fn activation_index(projects: &[Project]) -> HashMap<EthereumAddress, BridgeActivation> {
    projects
        .iter()
        .flat_map(|p| p.bridges.iter())
        .map(|b| {
            (
                b.address.clone(),
                BridgeActivation {
                    since_block: b.since_block,
                    token_since_block: b
                        .tokens
                        .iter()
                        .map(|t| (t.id.clone(), t.since_block))
                        .collect(),
                },
            )
        })
        .collect()
}

/// Keep reports whose bridge and asset are tracked and active at the
/// report's block. Input order is preserved.
pub fn filter_by_config<R: Report>(reports: Vec<R>, projects: &[Project]) -> Vec<R> {
    let bridges = activation_index(projects);

    reports
        .into_iter()
        .filter(|report| {
            let obs = report.observation();
            let Some(bridge) = bridges.get(&obs.bridge) else {
                return false;
            };
            if obs.block_number < bridge.since_block {
                return false;
            }
            match bridge.token_since_block.get(&obs.asset) {
                Some(&since_block) => obs.block_number >= since_block,
                None => false,
            }
        })
        .collect()
}
