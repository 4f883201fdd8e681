use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while building or verifying the store.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing artifact: {}", .0.display())]
    MissingArtifact(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}
