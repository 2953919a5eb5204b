/// Errors returned by [`WikiClient`](super::WikiClient).
///
/// `Upstream`, `Api` and `MalformedResponse` all mean the Wikipedia API could
/// not give us a usable answer; see [`WikiError::is_upstream`].
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    /// Empty or whitespace-only query. Raised before any request is sent.
    #[error("Please enter a search term")]
    InvalidQuery,

    /// Network failure, non-success status or an undecodable body.
    #[error("Failed to fetch Wikipedia articles: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The API answered with an `error` object instead of a result.
    #[error("Failed to fetch Wikipedia articles: {code}: {info}")]
    Api { code: String, info: String },

    /// The body decoded but did not contain the expected object.
    #[error("Failed to fetch Wikipedia articles: response has no `{0}` object")]
    MalformedResponse(&'static str),

    #[error("search was cancelled")]
    Cancelled,

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl WikiError {
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            WikiError::Upstream(_) | WikiError::Api { .. } | WikiError::MalformedResponse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, WikiError>;
