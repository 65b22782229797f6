/*!
 * Tests for error types and conversions
 */

use vidsum::errors::{AlignmentError, MediaError, ProviderError, SummaryError, TranscriptError};

/// Test error messages shown to users
#[test]
fn test_error_display_shouldDescribeProblem() {
    assert_eq!(
        TranscriptError::Empty { skipped: 2 }.to_string(),
        "Transcript contains no valid caption blocks (2 malformed block(s) skipped)"
    );
    assert_eq!(AlignmentError::EmptySummary.to_string(), "Summary is empty, nothing to extract");
    assert_eq!(
        MediaError::Timeout { tool: "ffmpeg".to_string(), secs: 5 }.to_string(),
        "ffmpeg timed out after 5 seconds"
    );
    assert_eq!(
        MediaError::ToolFailed { tool: "yt-dlp".to_string(), message: "boom".to_string() }.to_string(),
        "yt-dlp failed: boom"
    );
    assert_eq!(
        ProviderError::ApiError { status_code: 404, message: "model not found".to_string() }.to_string(),
        "API responded with error: 404 - model not found"
    );
}

/// Test wrapping of lower level errors
#[test]
fn test_error_from_shouldWrapSource() {
    let alignment: AlignmentError = TranscriptError::Empty { skipped: 0 }.into();
    assert!(matches!(alignment, AlignmentError::Transcript(TranscriptError::Empty { skipped: 0 })));

    let summary: SummaryError = ProviderError::ConnectionError("refused".to_string()).into();
    assert_eq!(summary.to_string(), "Provider error: Connection error: refused");

    let media: MediaError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert_eq!(media.to_string(), "I/O error: gone");
}
