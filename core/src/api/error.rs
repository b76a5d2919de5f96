use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("API returned error status {status}: {body}")]
    UnexpectedStatus {
        status: u16,
        body: String,
    },

    #[error("Failed to reach the sessions endpoint: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to deserialize response payload: {0}")]
    Deserialization(Box<dyn StdError + Send + Sync>),

    #[error("Unexpected session record: {0}")]
    InvalidShape(String),

    #[error("Sessions request timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
