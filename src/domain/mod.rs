//! Domain types for bridge TVL reporting.
//!
//! This module provides:
//! - Primitives: UnixTime, EthereumAddress, AssetId, PairKey
//! - Report records in two shapes (with and without token balance)
//! - Project/token registry types
//! - Fixed-point to decimal conversion
//! - Granularity and sync tolerance

pub mod decimal;
pub mod primitives;
pub mod project;
pub mod report;
pub mod tolerance;

pub use decimal::{to_decimal, DecimalError};
pub use primitives::{AddressParseError, AssetId, EthereumAddress, PairKey, UnixTime};
pub use project::{Project, ProjectBridge, Token};
pub use report::{Observation, ObservationWithBalance, Report};
pub use tolerance::{Granularity, Tolerance};
