/*!
 * Error types for the linguanova application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with translation backends
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Classify a non-success HTTP status returned by a backend
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while translating a document
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Nothing left to translate after trimming the input
    #[error("No input text provided")]
    EmptyInput,

    /// The request named no target language
    #[error("At least one target language is required")]
    NoTargetLanguages,

    /// A source or target code is not a known language
    #[error("Unsupported language: {code}")]
    UnsupportedLanguage {
        /// The rejected code as given by the caller
        code: String,
    },

    /// The backend failed on one chunk; the whole request is aborted
    #[error("Translation to '{language}' failed on chunk {chunk_index}: {source}")]
    TranslationFailure {
        /// Target language being produced when the failure happened
        language: String,
        /// Zero-based index of the failing chunk
        chunk_index: usize,
        /// Backend error
        #[source]
        source: ProviderError,
    },
}

/// Errors raised by speech synthesis backends
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Nothing to speak
    #[error("No text to synthesize")]
    EmptyText,

    /// The backend cannot speak this language
    #[error("Speech is not available for language: {0}")]
    UnsupportedLanguage(String),

    /// Transport or API failure
    #[error("Speech request failed: {0}")]
    Provider(#[from] ProviderError),
}
