/*!
 * Summarizer backed by an LLM provider.
 *
 * The model is asked to copy sentences verbatim; anything it paraphrases
 * will simply fail to align and be dropped from the highlight.
 */

use async_trait::async_trait;
use log::{debug, info};

use crate::errors::SummaryError;
use crate::providers::Provider;
use crate::providers::ollama::{GenerationRequest, GenerationResponse};
use crate::sentences::split_sentences;
use crate::summarizer::{Summarizer, SummaryOptions};

const SYSTEM_PROMPT: &str = "You pick the most important sentences of a video transcript for a highlight reel. \
Copy the selected sentences exactly as they appear in the transcript, character for character, \
in their original order, separated by single spaces. Do not rephrase, shorten, number or comment on them. \
Output only the selected sentences.";

/// Summarizer that delegates sentence selection to an Ollama-compatible provider
#[derive(Debug)]
pub struct LlmSummarizer<P> {
    provider: P,
    model: String,
    temperature: f32,
}

impl<P> LlmSummarizer<P>
where
    P: Provider<Request = GenerationRequest, Response = GenerationResponse>,
{
    pub fn new(provider: P, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    /// Build the generation request for `text`
    pub fn build_request(&self, text: &str, options: &SummaryOptions) -> GenerationRequest {
        let candidates = split_sentences(text)
            .into_iter()
            .filter(|sentence| {
                let length = sentence.chars().count();
                length >= options.min_length && length <= options.max_length
            })
            .count();
        let target = options.target_count(candidates).max(1);

        let prompt = format!(
            "Select about {} sentence(s) (roughly {:.0}% of the transcript). \
             Only sentences between {} and {} characters long qualify.\n\nTranscript:\n{}",
            target,
            options.ratio * 100.0,
            options.min_length,
            options.max_length,
            text
        );

        GenerationRequest::new(self.model.clone(), prompt)
            .system(SYSTEM_PROMPT)
            .temperature(self.temperature)
    }

    /// Remove wrapping the model sometimes adds despite instructions
    fn clean_response(raw: &str) -> String {
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("```"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl<P> Summarizer for LlmSummarizer<P>
where
    P: Provider<Request = GenerationRequest, Response = GenerationResponse>,
{
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String, SummaryError> {
        options.validate()?;

        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let request = self.build_request(text, options);
        debug!("Requesting summary from model {}", self.model);

        let response = self.provider.complete(request).await?;
        let summary = Self::clean_response(&P::extract_text(&response));

        info!("Model {} returned a {} character summary", self.model, summary.chars().count());
        Ok(summary)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
