use thiserror::Error;

#[derive(Error, Debug)]
pub enum TurnstileError {
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TurnstileError>;
