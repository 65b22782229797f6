/*!
 * Range resolution: summary sentences in, extraction ranges out.
 *
 * Ranges come out in summary order, not timeline order, and are neither
 * sorted nor deduplicated. The highlight follows the summary's narrative;
 * two sentences that map to the same captions produce the same range twice.
 */

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::alignment::matcher::{MatchSet, SegmentMatcher};
use crate::alignment::merger::merge;
use crate::errors::AlignmentError;
use crate::sentences::split_sentences;
use crate::transcript::{TimeSpan, Transcript};

/// One contiguous region of the source video, in elapsed seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRange {
    pub start_seconds: f64,
    pub end_seconds: f64,
}

impl ExtractionRange {
    pub fn new(start_seconds: f64, end_seconds: f64) -> Self {
        ExtractionRange { start_seconds, end_seconds }
    }

    /// Length of the range in seconds
    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

impl From<TimeSpan> for ExtractionRange {
    fn from(span: TimeSpan) -> Self {
        ExtractionRange::new(span.start.as_seconds(), span.end.as_seconds())
    }
}

/// Result of aligning a summary against a transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionPlan {
    /// Ranges to extract, in summary order
    pub ranges: Vec<ExtractionRange>,

    /// Number of summary sentences considered
    pub sentence_count: usize,

    /// Sentences that matched no caption and were left out
    pub unmatched_sentences: Vec<String>,
}

impl ExtractionPlan {
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Sum of all range durations in seconds
    pub fn total_duration(&self) -> f64 {
        self.ranges.iter().map(ExtractionRange::duration).sum()
    }
}

/// Resolves summary sentences against one transcript
#[derive(Debug, Clone)]
pub struct RangeResolver {
    matcher: SegmentMatcher,
}

impl RangeResolver {
    pub fn new(transcript: &Transcript) -> Self {
        RangeResolver {
            matcher: SegmentMatcher::new(&transcript.blocks),
        }
    }

    /// Split the summary into sentences and resolve them.
    ///
    /// A blank summary is reported as [`AlignmentError::EmptySummary`];
    /// callers treat it as "nothing to extract".
    pub fn resolve(&self, summary: &str) -> Result<ExtractionPlan, AlignmentError> {
        if summary.trim().is_empty() {
            return Err(AlignmentError::EmptySummary);
        }

        let sentences = split_sentences(summary);
        Ok(self.resolve_sentences(&sentences))
    }

    /// Match every sentence, in order, against the transcript
    pub fn match_sets<S: AsRef<str>>(&self, sentences: &[S]) -> Vec<MatchSet> {
        sentences
            .iter()
            .map(|sentence| self.matcher.find_matches(sentence.as_ref()))
            .collect()
    }

    /// Match and merge every sentence; unmatched sentences are omitted
    pub fn resolve_sentences<S: AsRef<str>>(&self, sentences: &[S]) -> ExtractionPlan {
        let mut plan = ExtractionPlan {
            sentence_count: sentences.len(),
            ..Default::default()
        };

        for match_set in self.match_sets(sentences) {
            match merge(&match_set.spans) {
                Some(span) => {
                    debug!(
                        "Sentence {:?} -> {} --> {} ({} caption(s))",
                        match_set.sentence,
                        span.start,
                        span.end,
                        match_set.spans.len()
                    );
                    plan.ranges.push(span.into());
                }
                None => {
                    debug!("No caption matched sentence {:?}", match_set.sentence);
                    plan.unmatched_sentences.push(match_set.sentence);
                }
            }
        }

        info!(
            "Resolved {} of {} summary sentence(s) to {:.1}s of video",
            plan.ranges.len(),
            plan.sentence_count,
            plan.total_duration()
        );

        plan
    }
}

/// Parse `transcript_text` and resolve `summary` against it
pub fn align(transcript_text: &str, summary: &str) -> Result<ExtractionPlan, AlignmentError> {
    let transcript = Transcript::parse(transcript_text)?;
    RangeResolver::new(&transcript).resolve(summary)
}
