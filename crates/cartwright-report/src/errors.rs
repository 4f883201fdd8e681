use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while producing the report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("store not found: {}", .0.display())]
    MissingStore(PathBuf),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
