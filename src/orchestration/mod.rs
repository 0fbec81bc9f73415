pub mod report;

pub use report::{ReportController, ReportError};
