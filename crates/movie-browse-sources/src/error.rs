use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Required credential absent. Raised at client construction, never
    /// retried.
    #[error("missing credential: {0} is not configured")]
    MissingCredential(&'static str),

    /// Non-2xx response that survived the retry policy.
    #[error("{endpoint} returned HTTP {status}")]
    Upstream { endpoint: String, status: u16 },

    /// Transport-level failure (connect, timeout, body decode).
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to initialize HTTP client: {0}")]
    Init(#[source] reqwest::Error),
}

impl SourceError {
    /// Whether the retry policy should attempt this call again. Server-side
    /// errors and transport failures are transient; everything else is not.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Upstream { status, .. } => *status >= 500,
            SourceError::Network { .. } => true,
            SourceError::MissingCredential(_) | SourceError::Init(_) => false,
        }
    }
}
