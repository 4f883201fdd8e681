use thiserror::Error;

/// Core error type shared across Cartwright crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The generator configuration violates internal invariants.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results returned by Cartwright crates.
pub type Result<T> = std::result::Result<T, Error>;
