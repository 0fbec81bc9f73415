//! Repository layer for report persistence.

use crate::datasource::{ReportStore, ReportStoreError};
use crate::domain::{AssetId, EthereumAddress, Observation, ObservationWithBalance, PairKey, UnixTime};
use async_trait::async_trait;
use num_bigint::BigInt;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

/// Repository for report rows.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Insert reports, replacing any row with the same
    /// (block_number, bridge_address, asset_id).
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    /// Returns an error if the transaction fails.
    pub async fn add_or_update(
        &self,
        reports: &[ObservationWithBalance],
    ) -> Result<usize, ReportStoreError> {
        if reports.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for report in reports {
            let obs = &report.observation;
            let block_number = i64::try_from(obs.block_number).map_err(|_| {
                ReportStoreError::Parse(format!("block number {} out of range", obs.block_number))
            })?;

            sqlx::query(
                r#"
                INSERT INTO reports (
                    block_number, unix_timestamp, bridge_address, asset_id,
                    balance, usd_tvl, eth_tvl, is_daily
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(block_number, bridge_address, asset_id) DO UPDATE SET
                    unix_timestamp = excluded.unix_timestamp,
                    balance = excluded.balance,
                    usd_tvl = excluded.usd_tvl,
                    eth_tvl = excluded.eth_tvl,
                    is_daily = excluded.is_daily
                "#,
            )
            .bind(block_number)
            .bind(obs.timestamp.as_secs())
            .bind(obs.bridge.as_str())
            .bind(obs.asset.as_str())
            .bind(report.balance.to_string())
            .bind(obs.usd_tvl.to_string())
            .bind(obs.eth_tvl.to_string())
            .bind(obs.timestamp.is_full_day())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!(method = "add_or_update", amount = reports.len());
        Ok(reports.len())
    }

    /// All reports in timestamp order.
    pub async fn get_all(&self) -> Result<Vec<ObservationWithBalance>, ReportStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT block_number, unix_timestamp, bridge_address, asset_id,
                   balance, usd_tvl, eth_tvl
            FROM reports
            ORDER BY unix_timestamp ASC, bridge_address ASC, asset_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_report).collect()
    }

    /// Delete every stored report.
    pub async fn delete_all(&self) -> Result<u64, ReportStoreError> {
        let result = sqlx::query("DELETE FROM reports").execute(&self.pool).await?;
        debug!(method = "delete_all", amount = result.rows_affected());
        Ok(result.rows_affected())
    }
}

fn parse_amount(row: &SqliteRow, column: &str) -> Result<BigInt, ReportStoreError> {
    let raw: String = row.try_get(column)?;
    BigInt::from_str(&raw)
        .map_err(|e| ReportStoreError::Parse(format!("{} {:?}: {}", column, raw, e)))
}

fn row_to_report(row: &SqliteRow) -> Result<ObservationWithBalance, ReportStoreError> {
    let block_number: i64 = row.try_get("block_number")?;
    let block_number = u64::try_from(block_number)
        .map_err(|_| ReportStoreError::Parse(format!("negative block number {}", block_number)))?;
    let timestamp: i64 = row.try_get("unix_timestamp")?;
    let bridge: String = row.try_get("bridge_address")?;
    let asset: String = row.try_get("asset_id")?;

    Ok(ObservationWithBalance::new(
        Observation {
            block_number,
            timestamp: UnixTime::new(timestamp),
            bridge: EthereumAddress::unchecked(&bridge),
            asset: AssetId::new(asset),
            usd_tvl: parse_amount(row, "usd_tvl")?,
            eth_tvl: parse_amount(row, "eth_tvl")?,
        },
        parse_amount(row, "balance")?,
    ))
}

#[async_trait]
impl ReportStore for Repository {
    async fn get_daily(&self) -> Result<Vec<ObservationWithBalance>, ReportStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT block_number, unix_timestamp, bridge_address, asset_id,
                   balance, usd_tvl, eth_tvl
            FROM reports
            WHERE is_daily = 1
            ORDER BY unix_timestamp ASC, bridge_address ASC, asset_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_report).collect()
    }

    async fn get_max_by_pair(&self) -> Result<HashMap<PairKey, UnixTime>, ReportStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT bridge_address, asset_id, MAX(unix_timestamp) AS max_timestamp
            FROM reports
            GROUP BY bridge_address, asset_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<(PairKey, UnixTime), ReportStoreError> {
                let bridge: String = row.try_get("bridge_address")?;
                let asset: String = row.try_get("asset_id")?;
                let max: i64 = row.try_get("max_timestamp")?;
                Ok((
                    PairKey::new(EthereumAddress::unchecked(&bridge), AssetId::new(asset)),
                    UnixTime::new(max),
                ))
            })
            .collect()
    }
}
