//! Balance observations ("reports") for a (bridge, asset) pair.

use super::primitives::{AssetId, EthereumAddress, PairKey, UnixTime};
use num_bigint::BigInt;

/// One TVL observation of an asset held by a bridge at a given block.
///
/// `usd_tvl` is fixed-point at 10^-2 and `eth_tvl` at 10^-6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub block_number: u64,
    pub timestamp: UnixTime,
    pub bridge: EthereumAddress,
    pub asset: AssetId,
    pub usd_tvl: BigInt,
    pub eth_tvl: BigInt,
}

impl Observation {
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.bridge.clone(), self.asset.clone())
    }
}

/// An observation that also carries the raw token balance at the token's
/// native decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationWithBalance {
    pub observation: Observation,
    pub balance: BigInt,
}

impl ObservationWithBalance {
    pub fn new(observation: Observation, balance: BigInt) -> Self {
        Self {
            observation,
            balance,
        }
    }
}

/// Common view over both record shapes so filtering stages accept either.
pub trait Report {
    fn observation(&self) -> &Observation;

    fn pair_key(&self) -> PairKey {
        self.observation().pair_key()
    }

    fn timestamp(&self) -> UnixTime {
        self.observation().timestamp
    }
}

impl Report for Observation {
    fn observation(&self) -> &Observation {
        self
    }
}

impl Report for ObservationWithBalance {
    fn observation(&self) -> &Observation {
        &self.observation
    }
}
