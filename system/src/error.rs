use franchise_types::ElectionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("election error: {0}")]
    Election(#[from] ElectionError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
