use thiserror::Error;

/// Errors raised while talking to the recipe API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response reached us (connection refused, timeout, DNS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a failure status
    #[error("{detail}")]
    Server { status: u16, detail: String },

    /// A client-side precondition failed before any request was issued
    #[error("{0}")]
    Validation(String),
}

/// Coarse classification of an [`ApiError`], kept alongside rendered messages
/// so logs can tell where a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Server,
    Validation,
}

impl ApiError {
    /// Build a server error from a status code and an optional `detail` body field
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        let detail = detail
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| default_status_message(status).to_string());
        ApiError::Server { status, detail }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::Validation(_) => ErrorKind::Validation,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ApiError::from_status(status.as_u16(), None),
            None => ApiError::Network(err.to_string()),
        }
    }
}

/// Fallback messages used when the server does not provide a `detail`
pub fn default_status_message(status: u16) -> &'static str {
    match status {
        400 => "Invalid request. Please check your input.",
        401 => "Please log in to continue.",
        403 => "You do not have permission to do that.",
        404 => "The requested resource was not found.",
        409 => "A record with this information already exists.",
        422 => "Some of the submitted data is invalid.",
        429 => "Too many requests. Please slow down.",
        500..=599 => "Something went wrong on our end. Please try again later.",
        _ => "An unexpected error occurred.",
    }
}

/// Top-level error for the crate
#[derive(Error, Debug)]
pub enum FinderError {
    /// Request to the recipe API failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Failed to build the HTTP client
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Invalid header value (e.g. a malformed API token)
    #[error("Header parse error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// Local storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Local storage contained malformed JSON
    #[error("Storage format error: {0}")]
    StorageFormat(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_detail_is_kept() {
        let err = ApiError::from_status(404, Some("Recipe with id 9 not found".to_string()));
        assert_eq!(err.to_string(), "Recipe with id 9 not found");
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[test]
    fn test_missing_detail_uses_status_default() {
        let err = ApiError::from_status(503, None);
        assert_eq!(
            err.to_string(),
            "Something went wrong on our end. Please try again later."
        );

        let blank = ApiError::from_status(401, Some("  ".to_string()));
        assert_eq!(blank.to_string(), "Please log in to continue.");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ApiError::Network("down".into()).kind(), ErrorKind::Network);
        assert_eq!(
            ApiError::Validation("empty".into()).kind(),
            ErrorKind::Validation
        );
    }
}
