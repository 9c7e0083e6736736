use thiserror::Error;

/// Failures of one scoring round trip. None of these reach the dispatch
/// state: [`super::score_orders`] logs them and keeps the unscored batch.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("environment variable {0} holding the oracle API key is not set")]
    MissingApiKey(String),
    #[cfg(feature = "gemini")]
    #[error("oracle request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("oracle answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("oracle returned an empty reply")]
    EmptyResponse,
    #[error("oracle reply is not a JSON array: {0}")]
    Malformed(String),
    #[error("oracle reply failed to parse: {0}")]
    Json(#[from] serde_json::Error),
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
}
