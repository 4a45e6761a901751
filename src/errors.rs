/*!
 * Error types for the linguaqa library.
 *
 * This module contains custom error types for different parts of the
 * pipeline, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::model::StageId;

/// Errors that can occur when talking to a generation provider
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
        message: String,
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

/// Errors raised while validating a job or batch submission.
///
/// These are the only errors that surface to the caller before any stage
/// executes; everything past validation degrades into fallback results.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Source text is empty or whitespace-only
    #[error("Source text cannot be empty")]
    EmptySourceText,

    /// Source text exceeds the configured maximum length
    #[error("Source text too long: {length} characters (maximum {max})")]
    SourceTextTooLong {
        /// Actual length in characters
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// A batch submission contained no jobs
    #[error("Batch cannot be empty")]
    EmptyBatch,

    /// A batch submission exceeded the batch cap
    #[error("Batch too large: {size} jobs (maximum {max})")]
    BatchTooLarge {
        /// Submitted batch size
        size: usize,
        /// Configured cap
        max: usize,
    },

    /// An unknown target language name was supplied
    #[error("Unsupported target language: {0}")]
    UnsupportedLanguage(String),

    /// An unknown quality mode name was supplied
    #[error("Unsupported quality mode: {0}")]
    UnsupportedMode(String),
}

/// Errors that can occur while executing a single stage.
///
/// A `StageError` never escapes the stage boundary; it is converted into a
/// `fallback` stage result by the orchestrator.
#[derive(Error, Debug)]
pub enum StageError {
    /// The generation client failed
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The generation client returned output that does not match the
    /// stage's payload schema
    #[error("Unparsable stage output for {stage}: {detail}")]
    Unparsable {
        /// The stage whose output failed to parse
        stage: StageId,
        /// Parse failure detail
        detail: String,
    },
}
