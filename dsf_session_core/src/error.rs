use serde::Serialize;
use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

/// Error taxonomy for wallet-session and transaction operations.
///
/// Every failure a collaborator can produce maps onto one of these
/// variants; `Unknown` is the catch-all so the transaction state
/// machine always reaches a terminal state instead of hanging.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum SessionError {
    #[error("No wallet provider is available in the host environment")]
    ProviderUnavailable,

    #[error("User rejected the wallet prompt")]
    UserRejected,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Wallet is not connected")]
    NotConnected,

    #[error("Another transaction is already in flight")]
    TransactionInProgress,

    #[error("Invalid input: {}", .0.join(", "))]
    InvalidInput(Vec<String>),

    #[error("Timed out waiting for confirmation")]
    Timeout,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("TOML serialization error: {0}")]
    TomlSerialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for SessionError {
    fn from(err: config::ConfigError) -> Self {
        SessionError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SessionError {
    fn from(err: toml::ser::Error) -> Self {
        SessionError::TomlSerialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_lists_every_field() {
        let err = SessionError::InvalidInput(vec!["name".to_string(), "age".to_string()]);
        assert_eq!(err.to_string(), "Invalid input: name, age");
    }
}
