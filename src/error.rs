/// Error types shared by the platform client and the pipelines

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Error types for extraction operations
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("YouTube API error: {message} (status {status})")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Parsing error: {0}")]
    Parsing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ExtractError::Api {
            status: 403,
            message: "quotaExceeded".to_string(),
        };
        assert_eq!(err.to_string(), "YouTube API error: quotaExceeded (status 403)");
    }

    #[test]
    fn test_parsing_error_display() {
        let err = ExtractError::Parsing("missing snippet".to_string());
        assert_eq!(err.to_string(), "Parsing error: missing snippet");
    }
}
