use thiserror::Error;

/// Main error type for the search client
#[derive(Error, Debug)]
pub enum PazarError {
    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog file errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog source errors
    #[error("Catalog '{source_name}' error: {message}")]
    Catalog { source_name: String, message: String },

    /// Rejected admin payloads
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Login/session errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Search called with a blank query
    #[error("Search query is empty")]
    EmptyQuery,

    /// Search called before any catalog source was added
    #[error("No catalog sources configured")]
    NoSources,

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for PazarError {
    fn from(s: String) -> Self {
        PazarError::Other(s)
    }
}

impl From<&str> for PazarError {
    fn from(s: &str) -> Self {
        PazarError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PazarError>;
