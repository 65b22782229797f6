/*!
 * Segment matching: which caption blocks does a summary sentence contain?
 *
 * Summary sentences usually fuse several captions, so the test is
 * caption-inside-sentence on normalized text, never the reverse.
 */

use log::trace;

use crate::alignment::normalizer::normalize;
use crate::transcript::{CaptionBlock, TimeSpan};

/// Matches of one summary sentence, in transcript order
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSet {
    /// The sentence as it appears in the summary
    pub sentence: String,

    /// Spans of the caption blocks contained in the sentence
    pub spans: Vec<TimeSpan>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Caption blocks with their text normalized once up front
#[derive(Debug, Clone)]
pub struct SegmentMatcher {
    captions: Vec<(String, TimeSpan)>,
}

impl SegmentMatcher {
    /// Normalize every caption of the transcript
    pub fn new(captions: &[CaptionBlock]) -> Self {
        let captions = captions
            .iter()
            .map(|block| (normalize(&block.text), block.span()))
            .collect();

        SegmentMatcher { captions }
    }

    /// Find every caption whose normalized text occurs in the normalized sentence.
    ///
    /// Captions that normalize to an empty string are ignored; the empty
    /// string would otherwise be "contained" in every sentence.
    pub fn find_matches(&self, sentence: &str) -> MatchSet {
        let normalized_sentence = normalize(sentence);

        let spans = self
            .captions
            .iter()
            .filter(|(text, _)| !text.is_empty() && normalized_sentence.contains(text.as_str()))
            .map(|(_, span)| *span)
            .collect::<Vec<_>>();

        trace!("{} caption(s) matched sentence {:?}", spans.len(), sentence);

        MatchSet {
            sentence: sentence.to_string(),
            spans,
        }
    }

    /// Number of captions available for matching
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }
}

/// One-shot form of [`SegmentMatcher::find_matches`]
pub fn match_sentence(sentence: &str, captions: &[CaptionBlock]) -> Vec<TimeSpan> {
    SegmentMatcher::new(captions).find_matches(sentence).spans
}
