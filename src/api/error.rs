use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid service url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Short label for the failure class, used in log lines and the sync error signal.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidUrl(_) => "config",
            ApiError::Transport(_) => "transport",
            ApiError::Status { .. } => "protocol",
            ApiError::Parse(_) => "parse",
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
