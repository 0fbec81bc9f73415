pub mod api;
pub mod config;
pub mod datasource;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;
pub mod registry;

pub use config::Config;
pub use datasource::{MockReportStore, ReportStore, ReportStoreError};
pub use db::{init_db, Repository};
pub use domain::{
    AssetId, EthereumAddress, Granularity, Observation, ObservationWithBalance, PairKey, Project,
    ProjectBridge, Report, Token, Tolerance, UnixTime,
};
pub use engine::ReportOutput;
pub use error::AppError;
pub use orchestration::{ReportController, ReportError};
pub use registry::Registry;
