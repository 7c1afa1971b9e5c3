use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error(
        "Could not resolve '{0}' to a CIK. Try passing a CIK directly (digits only) or check access to the SEC ticker file."
    )]
    TickerNotFound(String),

    #[error("Filing metadata is missing '{0}', cannot download the primary document")]
    MissingField(&'static str),

    #[error("Empty vocabulary: sentences contain no scorable terms")]
    EmptyVocabulary,

    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(
        "Unexpected content type from URL {url}. Expected pattern {expected_pattern}, but got Content-Type: {got_content_type}. Content preview: {content_preview}..."
    )]
    UnexpectedContentType {
        url: String,
        expected_pattern: String,
        got_content_type: String,
        content_preview: String,
    },
}

pub type Result<T> = std::result::Result<T, DigestError>;
