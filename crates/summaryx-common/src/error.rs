use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryxError {
    /// The document carried no usable text and no abstract. This is the only
    /// variant that crosses the core boundary to the caller; every heuristic
    /// or statistical failure inside the pipeline resolves to a degrade path.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Generative backend error: {0}")]
    Generative(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SummaryxError>;
