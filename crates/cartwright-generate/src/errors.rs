use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("config error: {0}")]
    Config(#[from] cartwright_core::Error),
    #[error("ran out of attempts generating a unique {0}")]
    UniqueExhausted(&'static str),
    #[error("generated dataset failed integrity check with {0} violation(s)")]
    Integrity(u64),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
