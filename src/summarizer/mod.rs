/*!
 * Transcript summarization.
 *
 * A summarizer is a black box from the full transcript text to a summary
 * string. Alignment only works for sentences copied verbatim, so both
 * implementations are extractive:
 *
 * - `extractive`: Local frequency-scored sentence selection
 * - `llm`: Sentence selection delegated to an Ollama model
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::SummaryError;

pub use self::extractive::ExtractiveSummarizer;
pub use self::llm::LlmSummarizer;

pub mod extractive;
pub mod llm;

/// Length constraints for a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Fraction of candidate sentences to keep, in (0, 1]
    pub ratio: f32,

    /// Minimum sentence length in characters for a sentence to be considered
    pub min_length: usize,

    /// Maximum sentence length in characters for a sentence to be considered
    pub max_length: usize,

    /// Always keep the first candidate sentence
    pub use_first: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            ratio: 0.3,
            min_length: 60,
            max_length: 500,
            use_first: true,
        }
    }
}

impl SummaryOptions {
    pub fn with_ratio(ratio: f32) -> Self {
        Self {
            ratio,
            ..Default::default()
        }
    }

    /// Check ranges before any work is done
    pub fn validate(&self) -> Result<(), SummaryError> {
        if !(self.ratio > 0.0 && self.ratio <= 1.0) {
            return Err(SummaryError::InvalidOptions(format!(
                "ratio must be in (0, 1], got {}",
                self.ratio
            )));
        }
        if self.min_length > self.max_length {
            return Err(SummaryError::InvalidOptions(format!(
                "min_length {} exceeds max_length {}",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }

    /// Number of sentences to keep out of `available`, at least one when any exist
    pub fn target_count(&self, available: usize) -> usize {
        if available == 0 {
            return 0;
        }
        // f32 ratios such as 0.3 are slightly above their decimal value
        let wanted = (available as f64 * f64::from(self.ratio) - 1e-6).ceil() as usize;
        wanted.clamp(1, available)
    }
}

/// Produces a summary of transcript text
#[async_trait]
pub trait Summarizer: Send + Sync + Debug {
    /// Summarize `text` under the given constraints. An empty string means
    /// nothing was worth keeping.
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String, SummaryError>;

    /// Short name for logs
    fn name(&self) -> &str;
}
