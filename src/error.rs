use thiserror::Error;

/// Main error type for the esports bot
#[derive(Error, Debug)]
pub enum BotError {
    /// HTTP transport errors (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Non-success HTTP status from the source site
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// JSON (config / DTO) errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Game code that is not part of the catalog
    #[error("Unknown game: {0}")]
    UnknownGame(String),

    /// Conversation state store errors
    #[error("State store error: {0}")]
    StateStore(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for BotError {
    fn from(s: String) -> Self {
        BotError::Other(s)
    }
}

impl From<&str> for BotError {
    fn from(s: &str) -> Self {
        BotError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = BotError::HttpStatus {
            url: "https://liquipedia.net/valorant/FURIA".to_string(),
            status: 429,
        };
        assert_eq!(err.to_string(), "HTTP 429 for https://liquipedia.net/valorant/FURIA");
    }

    #[test]
    fn test_from_str() {
        let err: BotError = "boom".into();
        assert!(matches!(err, BotError::Other(ref m) if m == "boom"));
    }
}
