//! Error types for the hedge simulator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HedgeError {
    #[error("No data: {0}")]
    NoData(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Artifact write error: {0}")]
    ArtifactWrite(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

pub type HedgeResult<T> = Result<T, HedgeError>;

impl HedgeError {
    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoData(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn artifact_write(msg: impl Into<String>) -> Self {
        Self::ArtifactWrite(msg.into())
    }
}
