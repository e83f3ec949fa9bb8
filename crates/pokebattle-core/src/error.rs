//! Error types for pokebattle-core

use thiserror::Error;

/// Core error type
///
/// Every variant is terminal for the operation that produced it; nothing in
/// the core retries.
#[derive(Error, Debug)]
pub enum Error {
    /// The creature catalog could not be reached or returned garbage.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A store read or write failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A named creature does not exist upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Every draw missed the catalog index, so there is nobody to battle.
    #[error("No creatures were sampled for the battle")]
    EmptySample,

    /// Caller-supplied parameters were rejected.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
