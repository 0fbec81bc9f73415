//! Fold synced reports into global, per-project and per-token TVL series.

use crate::domain::decimal::{round_to, BALANCE_DISPLAY_DIGITS, ETH_PRECISION, USD_PRECISION};
use crate::domain::{
    to_decimal, AssetId, DecimalError, EthereumAddress, ObservationWithBalance, Project, Token,
    UnixTime,
};
use num_bigint::BigInt;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error(transparent)]
    Decimal(#[from] DecimalError),
    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}

/// One chart row: `[date, value, value]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow(pub String, pub f64, pub f64);

/// A column-labelled time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub types: [String; 3],
    pub data: Vec<ChartRow>,
}

impl Chart {
    fn tvl() -> Self {
        Self {
            types: ["date".to_string(), "usd".to_string(), "eth".to_string()],
            data: Vec::new(),
        }
    }

    fn token(symbol: &str) -> Self {
        Self {
            types: ["date".to_string(), symbol.to_lowercase(), "usd".to_string()],
            data: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub aggregate: Chart,
    pub by_token: BTreeMap<String, Chart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput {
    pub aggregate: Chart,
    pub by_project: BTreeMap<String, ProjectData>,
    pub experimental: BTreeMap<String, String>,
}

/// Calendar day a snapshot closes: the UTC date of `timestamp - 1 day`.
pub fn reporting_date(timestamp: UnixTime) -> Result<String, AggregationError> {
    timestamp
        .add_days(-1)
        .to_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or(AggregationError::TimestampOutOfRange(timestamp.as_secs()))
}

#[derive(Debug, Default)]
struct TvlSum {
    usd: BigInt,
    eth: BigInt,
}

/// Running USD/ETH sums keyed by date, remembering first-appearance order.
#[derive(Debug, Default)]
struct DatedTotals {
    order: Vec<String>,
    by_date: HashMap<String, TvlSum>,
}

impl DatedTotals {
    fn add(&mut self, date: &str, usd: &BigInt, eth: &BigInt) {
        if !self.by_date.contains_key(date) {
            self.order.push(date.to_string());
        }
        let sum = self.by_date.entry(date.to_string()).or_default();
        sum.usd += usd;
        sum.eth += eth;
    }

    fn into_rows(mut self) -> Result<Vec<ChartRow>, DecimalError> {
        let mut rows = Vec::with_capacity(self.order.len());
        for date in self.order {
            let sum = self.by_date.remove(&date).unwrap_or_default();
            let usd = round_to(to_decimal(&sum.usd, USD_PRECISION)?, USD_PRECISION as usize);
            let eth = round_to(to_decimal(&sum.eth, ETH_PRECISION)?, ETH_PRECISION as usize);
            rows.push(ChartRow(date, usd, eth));
        }
        Ok(rows)
    }
}

/// Collapse runs of rows sharing a date by summing their values.
///
/// Only adjacent rows are compared, so same-date rows separated by another
/// date stay separate.
fn merge_consecutive(rows: Vec<ChartRow>) -> Vec<ChartRow> {
    let mut result: Vec<ChartRow> = Vec::with_capacity(rows.len());
    for row in rows {
        match result.last_mut() {
            Some(last) if last.0 == row.0 => {
                last.1 += row.1;
                last.2 += row.2;
            }
            _ => result.push(row),
        }
    }
    result
}

/// Aggregate reports into the output document.
///
/// Reports for bridges or assets outside the registry are skipped. Every
/// registered project appears in the output, with empty series if nothing
/// reported for it.
pub fn aggregate(
    reports: &[ObservationWithBalance],
    projects: &[Project],
    tokens: &[Token],
) -> Result<ReportOutput, AggregationError> {
    let project_by_address: HashMap<&EthereumAddress, &str> = projects
        .iter()
        .flat_map(|p| p.bridges.iter().map(move |b| (&b.address, p.name.as_str())))
        .collect();
    let token_by_id: HashMap<&AssetId, &Token> = tokens.iter().map(|t| (&t.id, t)).collect();

    let mut global = DatedTotals::default();
    let mut by_project: HashMap<&str, DatedTotals> = projects
        .iter()
        .map(|p| (p.name.as_str(), DatedTotals::default()))
        .collect();
    let mut by_token: HashMap<&str, BTreeMap<String, Chart>> = projects
        .iter()
        .map(|p| (p.name.as_str(), BTreeMap::new()))
        .collect();

    for report in reports {
        let obs = &report.observation;
        let (Some(&project), Some(&token)) = (
            project_by_address.get(&obs.bridge),
            token_by_id.get(&obs.asset),
        ) else {
            continue;
        };

        let date = reporting_date(obs.timestamp)?;

        global.add(&date, &obs.usd_tvl, &obs.eth_tvl);
        by_project
            .entry(project)
            .or_default()
            .add(&date, &obs.usd_tvl, &obs.eth_tvl);

        let balance = round_to(
            to_decimal(&report.balance, i32::from(token.decimals))?,
            BALANCE_DISPLAY_DIGITS,
        );
        let usd = to_decimal(&obs.usd_tvl, USD_PRECISION)?;
        by_token
            .entry(project)
            .or_default()
            .entry(token.symbol.clone())
            .or_insert_with(|| Chart::token(&token.symbol))
            .data
            .push(ChartRow(date, balance, usd));
    }

    let mut output = ReportOutput {
        aggregate: Chart::tvl(),
        by_project: BTreeMap::new(),
        experimental: BTreeMap::new(),
    };
    output.aggregate.data = global.into_rows()?;

    for project in projects {
        let name = project.name.as_str();
        let mut aggregate = Chart::tvl();
        if let Some(totals) = by_project.remove(name) {
            aggregate.data = totals.into_rows()?;
        }
        let charts = by_token
            .remove(name)
            .unwrap_or_default()
            .into_iter()
            .map(|(symbol, mut chart)| {
                chart.data = merge_consecutive(std::mem::take(&mut chart.data));
                (symbol, chart)
            })
            .collect();
        output.by_project.insert(
            project.name.clone(),
            ProjectData {
                aggregate,
                by_token: charts,
            },
        );
    }

    Ok(output)
}
