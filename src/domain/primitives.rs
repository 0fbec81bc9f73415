//! Domain primitives: UnixTime, EthereumAddress, AssetId, PairKey.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SECONDS_PER_HOUR: i64 = 60 * 60;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Time in whole seconds since Unix epoch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UnixTime(pub i64);

impl UnixTime {
    pub const EPOCH: UnixTime = UnixTime(0);

    pub fn new(secs: i64) -> Self {
        UnixTime(secs)
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }

    /// Shift by a signed number of seconds, saturating at the i64 bounds.
    pub fn add_secs(&self, secs: i64) -> Self {
        UnixTime(self.0.saturating_add(secs))
    }

    pub fn add_days(&self, days: i64) -> Self {
        self.add_secs(days.saturating_mul(SECONDS_PER_DAY))
    }

    pub fn add_hours(&self, hours: i64) -> Self {
        self.add_secs(hours.saturating_mul(SECONDS_PER_HOUR))
    }

    /// True when the timestamp falls exactly on a UTC midnight.
    pub fn is_full_day(&self) -> bool {
        self.0.rem_euclid(SECONDS_PER_DAY) == 0
    }

    /// UTC calendar date of this timestamp, if representable.
    pub fn to_date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.0, 0).map(|dt| dt.date_naive())
    }
}

impl fmt::Display for UnixTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid ethereum address: {0}")]
pub struct AddressParseError(pub String);

/// Contract address, normalized to lowercase hex.
///
/// Two addresses differing only in letter case are the same address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EthereumAddress(String);

impl EthereumAddress {
    /// Normalize without validating. Used for rows already validated on the way in.
    pub fn unchecked(addr: &str) -> Self {
        EthereumAddress(addr.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EthereumAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| AddressParseError(s.to_string()))?;
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressParseError(s.to_string()));
        }
        Ok(EthereumAddress(format!("0x{}", hex.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for EthereumAddress {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EthereumAddress> for String {
    fn from(value: EthereumAddress) -> Self {
        value.0
    }
}

impl fmt::Display for EthereumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque asset identifier (e.g. "dai-dai-stablecoin").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        AssetId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one independently-updated (bridge, asset) series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    pub bridge: EthereumAddress,
    pub asset: AssetId,
}

impl PairKey {
    pub fn new(bridge: EthereumAddress, asset: AssetId) -> Self {
        Self { bridge, asset }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.bridge, self.asset)
    }
}
