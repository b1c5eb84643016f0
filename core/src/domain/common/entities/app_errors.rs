use thiserror::Error;

/// Failure taxonomy for the analysis pipeline.
///
/// `RateLimited`, `UpstreamError` and `MalformedResponse` describe the three
/// ways a call to the vision model can go wrong; the remaining variants are
/// caller mistakes or boundary failures. Display strings are user-facing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid image format or URL: {0}")]
    InvalidImage(String),

    #[error("Search query must not be empty")]
    InvalidQuery,

    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("External API error occurred: {0}")]
    UpstreamError(String),

    #[error("Could not parse model response: {0}")]
    MalformedResponse(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Internal server error")]
    InternalServerError,
}
