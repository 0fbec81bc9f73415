//! Fixtures shared by engine unit tests.

use crate::domain::{
    AssetId, EthereumAddress, Observation, ObservationWithBalance, Project, ProjectBridge, Token,
    UnixTime,
};
use num_bigint::BigInt;

/// 2021-09-07T00:00:00Z
pub const START: i64 = 1_630_972_800;
pub const MOCK_USD_TVL: u64 = 100_000_000;
pub const MOCK_ETH_TVL: u64 = 100_000;

pub fn address(n: u8) -> EthereumAddress {
    EthereumAddress::unchecked(&format!("0x{:040x}", n))
}

pub fn token(id: &str, symbol: &str, decimals: u8, since_block: u64) -> Token {
    Token {
        id: AssetId::new(id),
        symbol: symbol.to_string(),
        decimals,
        since_block,
    }
}

pub fn project(name: &str, bridges: Vec<(EthereumAddress, u64, Vec<Token>)>) -> Project {
    Project {
        name: name.to_string(),
        bridges: bridges
            .into_iter()
            .map(|(address, since_block, tokens)| ProjectBridge {
                address,
                since_block,
                tokens,
            })
            .collect(),
    }
}

/// 1000000.123456 at 18 decimals.
pub fn mock_balance() -> BigInt {
    BigInt::from(1_000_000_123_456u64) * BigInt::from(10u64).pow(12)
}

pub fn report(block: u64, timestamp: i64, bridge: EthereumAddress, asset: &str) -> ObservationWithBalance {
    report_with(block, timestamp, bridge, asset, MOCK_USD_TVL, MOCK_ETH_TVL, mock_balance())
}

pub fn report_with(
    block: u64,
    timestamp: i64,
    bridge: EthereumAddress,
    asset: &str,
    usd_tvl: u64,
    eth_tvl: u64,
    balance: BigInt,
) -> ObservationWithBalance {
    ObservationWithBalance::new(
        Observation {
            block_number: block,
            timestamp: UnixTime::new(timestamp),
            bridge,
            asset: AssetId::new(asset),
            usd_tvl: BigInt::from(usd_tvl),
            eth_tvl: BigInt::from(eth_tvl),
        },
        balance,
    )
}
