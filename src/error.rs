use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid competition record: {0}")]
    InvalidRecord(String),
    #[error("Unknown user: {0}")]
    UnknownUser(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RatingError>;
