/// CLI error types
use setlist_client::{ClientError, Route};
use setlist_core::SetlistError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Login required to open {0}")]
    LoginRequired(Route),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Catalog(#[from] SetlistError),
}
