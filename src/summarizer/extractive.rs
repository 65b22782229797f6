/*!
 * Local extractive summarizer.
 *
 * Sentences are scored by the average normalized frequency of their content
 * words across the candidate set; the best `ratio` of them are kept and
 * emitted verbatim in their original order.
 */

use async_trait::async_trait;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

use crate::errors::SummaryError;
use crate::sentences::split_sentences;
use crate::summarizer::{Summarizer, SummaryOptions};

/// Words that carry no topic information
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "it", "its",
    "this", "that", "these", "those", "i", "you", "he", "she", "we", "they", "me", "him", "her",
    "us", "them", "my", "your", "our", "their", "what", "which", "who", "when", "where", "why",
    "how", "all", "so", "than", "too", "very", "just", "also", "now", "here", "there", "then",
    "if", "about", "into", "not", "no", "yes", "um", "uh", "like", "okay", "oh", "yeah", "gonna",
    "i'm", "it's", "that's", "don't", "you're", "we're", "there's",
];

/// Frequency-based extractive summarizer
#[derive(Debug, Default, Clone)]
pub struct ExtractiveSummarizer;

impl ExtractiveSummarizer {
    pub fn new() -> Self {
        ExtractiveSummarizer
    }

    /// Select sentences synchronously; the async trait method delegates here
    pub fn summarize_text(&self, text: &str, options: &SummaryOptions) -> Result<String, SummaryError> {
        options.validate()?;

        let sentences = split_sentences(text);
        let candidates: Vec<(usize, &str)> = sentences
            .iter()
            .enumerate()
            .filter(|(_, sentence)| {
                let length = sentence.chars().count();
                length >= options.min_length && length <= options.max_length
            })
            .map(|(index, sentence)| (index, sentence.as_str()))
            .collect();

        if candidates.is_empty() {
            warn!(
                "No sentence between {} and {} characters out of {}, summary is empty",
                options.min_length,
                options.max_length,
                sentences.len()
            );
            return Ok(String::new());
        }

        let scores = Self::score_sentences(&candidates);
        let target = options.target_count(candidates.len());

        let mut ranked: Vec<usize> = (0..candidates.len()).collect();
        // Highest score first, earlier sentence wins ties
        ranked.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]).then(a.cmp(b)));

        let mut selected: HashSet<usize> = HashSet::with_capacity(target);
        if options.use_first {
            selected.insert(0);
        }
        for position in ranked {
            if selected.len() >= target {
                break;
            }
            selected.insert(position);
        }

        let mut kept: Vec<usize> = selected.into_iter().collect();
        kept.sort_unstable();

        debug!("Kept {} of {} candidate sentence(s)", kept.len(), candidates.len());

        Ok(kept
            .into_iter()
            .map(|position| candidates[position].1)
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn score_sentences(candidates: &[(usize, &str)]) -> Vec<f64> {
        let tokenized: Vec<Vec<String>> = candidates
            .iter()
            .map(|(_, sentence)| Self::content_words(sentence))
            .collect();

        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        for word in tokenized.iter().flatten() {
            *frequencies.entry(word.as_str()).or_insert(0) += 1;
        }
        let max_frequency = frequencies.values().copied().max().unwrap_or(1) as f64;

        tokenized
            .iter()
            .map(|words| {
                if words.is_empty() {
                    return 0.0;
                }
                let total: f64 = words
                    .iter()
                    .map(|word| frequencies[word.as_str()] as f64 / max_frequency)
                    .sum();
                total / words.len() as f64
            })
            .collect()
    }

    fn content_words(sentence: &str) -> Vec<String> {
        sentence
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .map(|word| word.trim_matches('\'').to_lowercase())
            .filter(|word| word.chars().count() > 1 && !STOP_WORDS.contains(&word.as_str()))
            .collect()
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String, SummaryError> {
        self.summarize_text(text, options)
    }

    fn name(&self) -> &str {
        "extractive"
    }
}
