/*!
 * # vidsum - Video highlights from transcript summaries
 *
 * A Rust library that cuts a short highlight out of a long video by
 * summarizing its captions and mapping every summary sentence back onto the
 * caption timestamps.
 *
 * ## Features
 *
 * - Parse WebVTT (and SRT) caption files into typed caption blocks
 * - Summarize transcripts locally or with an Ollama model
 * - Align summary sentences with captions and merge them into time ranges
 * - Download videos with captions via yt-dlp
 * - Cut and concatenate the ranges with ffmpeg
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `transcript`: Caption file parsing
 * - `sentences`: Sentence segmentation
 * - `alignment`: Transcript-to-summary time alignment:
 *   - `alignment::normalizer`: Canonical comparison text
 *   - `alignment::matcher`: Caption-in-sentence matching
 *   - `alignment::merger`: Contiguous prefix merging
 *   - `alignment::resolver`: Extraction plan construction
 * - `summarizer`: Extractive and LLM-backed summarizers
 * - `providers`: LLM provider clients (Ollama)
 * - `media`: yt-dlp and ffmpeg wrappers
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod media;
pub mod providers;
pub mod sentences;
pub mod summarizer;
pub mod transcript;

// Re-export main types for easier usage
pub use alignment::{align, ExtractionPlan, ExtractionRange, RangeResolver};
pub use app_config::Config;
pub use errors::{AlignmentError, MediaError, ProviderError, SummaryError, TranscriptError};
pub use summarizer::{Summarizer, SummaryOptions};
pub use transcript::{CaptionBlock, TimeSpan, Timecode, Transcript};
