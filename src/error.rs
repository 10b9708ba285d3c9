use thiserror::Error;

/// Errors raised outside of the simulation itself. Collisions and deaths
/// are ordinary game states, never errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("leaderboard unavailable: {0}")]
    StoreUnavailable(String),
    #[error("failed to write leaderboard: {0}")]
    StoreWriteFailed(String),
    #[error("failed to read leaderboard: {0}")]
    StoreReadFailed(String),
    #[error("invalid command-line argument: {0}")]
    InvalidCliArgument(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
