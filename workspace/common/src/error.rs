use thiserror::Error;

/// Fallback shown when the backend rejects an analysis without saying why.
pub const ANALYSIS_FAILED: &str = "Analysis failed";

/// Fallback shown when a failure carries no usable message at all.
pub const GENERIC_FAILURE: &str = "Failed to analyze locations";

/// Error types shared by every client of the climate backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response whose body carried no error payload
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The body was not the JSON we expected
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The backend answered `success: false` or an error `detail`
    #[error("{0}")]
    Application(String),

    /// The request was rejected before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Text for the visible error banner, never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }

    /// Whether the failure happened before the backend could answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Type alias for Result with ApiError
pub type ApiResult<T> = std::result::Result<T, ApiError>;
