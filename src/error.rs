use thiserror::Error;

/// Error types that can occur while talking to the completion service or
/// the speech collaborators.
#[derive(Debug, Error)]
pub enum LLMError {
    /// Transport-level failure: no response was obtained
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid request parameters or format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// The service answered with a non-success status
    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
    /// Speech playback or capture failure
    #[error("Speech error: {0}")]
    SpeechError(String),
    /// Generic error
    #[error("Generic error: {0}")]
    Generic(String),
    /// Retry attempts exceeded
    #[error("Retry attempts exceeded after {attempts} tries: {last_error}")]
    RetryExceeded { attempts: usize, last_error: String },
}

impl LLMError {
    /// Only transport failures are worth another attempt. A response that
    /// came back, even a bad one, is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            LLMError::HttpError(_) => true,
            LLMError::AuthError(_)
            | LLMError::InvalidRequest(_)
            | LLMError::ApiError { .. }
            | LLMError::ResponseFormatError { .. }
            | LLMError::JsonError(_)
            | LLMError::SpeechError(_)
            | LLMError::Generic(_)
            | LLMError::RetryExceeded { .. } => false,
        }
    }
}

/// Converts reqwest HTTP errors into LLMErrors
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}
