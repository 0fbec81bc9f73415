//! Report granularity and the sync tolerance window derived from it.

use super::primitives::{UnixTime, SECONDS_PER_DAY, SECONDS_PER_HOUR};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cadence at which reports are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Hourly,
}

impl Granularity {
    /// Length of one unit in seconds.
    pub fn unit_secs(&self) -> i64 {
        match self {
            Granularity::Daily => SECONDS_PER_DAY,
            Granularity::Hourly => SECONDS_PER_HOUR,
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Granularity::Daily),
            "hourly" => Ok(Granularity::Hourly),
            other => Err(format!("must be daily or hourly, got {}", other)),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Daily => write!(f, "daily"),
            Granularity::Hourly => write!(f, "hourly"),
        }
    }
}

/// How far a pair may lag before the whole snapshot steps back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tolerance {
    pub amount: u32,
    pub unit: Granularity,
}

impl Tolerance {
    pub fn new(amount: u32, unit: Granularity) -> Self {
        Self { amount, unit }
    }

    pub fn one(unit: Granularity) -> Self {
        Self::new(1, unit)
    }

    pub fn as_secs(&self) -> i64 {
        i64::from(self.amount).saturating_mul(self.unit.unit_secs())
    }

    /// `timestamp` moved back by one tolerance window.
    pub fn before(&self, timestamp: UnixTime) -> UnixTime {
        timestamp.add_secs(-self.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_parse() {
        assert_eq!("daily".parse::<Granularity>().unwrap(), Granularity::Daily);
        assert_eq!(" Hourly ".parse::<Granularity>().unwrap(), Granularity::Hourly);
        assert!("weekly".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_tolerance_window() {
        let t = UnixTime::new(10 * SECONDS_PER_DAY);
        assert_eq!(Tolerance::one(Granularity::Daily).before(t), t.add_days(-1));
        assert_eq!(Tolerance::new(3, Granularity::Hourly).before(t), t.add_hours(-3));
    }
}
