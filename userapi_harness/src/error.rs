use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to start test server: {0}")]
    Startup(String),

    #[error("Invalid contract: {0}")]
    InvalidContract(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
