/*!
 * Error types for the vidsum application.
 *
 * This module contains custom error types for the different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 * Library code returns these typed errors; the controller and the CLI wrap
 * them in `anyhow` with context.
 */

use thiserror::Error;

/// Errors that can occur while parsing a caption file
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// The input was empty or no caption block survived parsing
    #[error("Transcript contains no valid caption blocks ({skipped} malformed block(s) skipped)")]
    Empty {
        /// Number of malformed blocks dropped while parsing
        skipped: usize,
    },

    /// The caption file could not be read
    #[error("Failed to read transcript: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the alignment engine
#[derive(Error, Debug)]
pub enum AlignmentError {
    /// The transcript could not be turned into caption blocks
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// The summary is empty or whitespace only; there is nothing to extract
    #[error("Summary is empty, nothing to extract")]
    EmptySummary,
}

/// Errors that can occur when working with provider APIs
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
}

/// Errors that can occur while summarizing a transcript
#[derive(Error, Debug)]
pub enum SummaryError {
    /// Summary options are out of range
    #[error("Invalid summary options: {0}")]
    InvalidOptions(String),

    /// Error from the provider backing the summarizer
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors raised by the external media tools (yt-dlp, ffmpeg)
#[derive(Error, Debug)]
pub enum MediaError {
    /// The tool ran but reported a failure
    #[error("{tool} failed: {message}")]
    ToolFailed {
        /// Name of the executable
        tool: String,
        /// Filtered stderr output
        message: String,
    },

    /// The tool did not finish in time
    #[error("{tool} timed out after {secs} seconds")]
    Timeout {
        /// Name of the executable
        tool: String,
        /// Timeout that elapsed
        secs: u64,
    },

    /// The extraction plan has no ranges
    #[error("No ranges to extract")]
    NothingToExtract,

    /// No subtitle track or file could be found for the video
    #[error("No subtitles found: {0}")]
    MissingSubtitles(String),

    /// Filesystem or process spawning error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
