use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Malformed upstream payload: {0}")]
    MalformedPayload(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Reasons a single classification can fail. Never surfaced past the
/// aggregation boundary; callers fold these into [`Sentiment::Neutral`].
///
/// [`Sentiment::Neutral`]: crate::Sentiment::Neutral
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("inference API key is not configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("expected a JSON response, got content type {content_type:?}: {body}")]
    NotJson { content_type: String, body: String },

    #[error("could not decode response ({message}): {body}")]
    Decode { message: String, body: String },

    #[error("inference service returned no candidates")]
    EmptyResponse,

    #[error("classification task failed: {0}")]
    Task(String),
}

impl ClassifierError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClassifierError::Http(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
