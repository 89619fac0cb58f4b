use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("GitHub API error ({status}): {body}")]
    UpstreamApi { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the upstream reported a missing user, so callers can
    /// render "not found" instead of a generic outage message.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UpstreamApi { status: 404, .. })
    }
}
