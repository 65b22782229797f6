/*!
 * Transcript-to-summary time alignment.
 *
 * Maps every sentence of a summary back onto the caption blocks it was
 * built from and turns the result into ordered extraction ranges. It is
 * split into several submodules:
 *
 * - `normalizer`: Canonical comparison form shared by captions and sentences
 * - `matcher`: Caption-in-sentence containment matching
 * - `merger`: Longest contiguous prefix merge of a sentence's matches
 * - `resolver`: Per-sentence orchestration and the final extraction plan
 *
 * Everything here is pure: no I/O, no shared state between calls.
 */

pub use self::matcher::{match_sentence, MatchSet, SegmentMatcher};
pub use self::merger::merge;
pub use self::normalizer::normalize;
pub use self::resolver::{align, ExtractionPlan, ExtractionRange, RangeResolver};

pub mod matcher;
pub mod merger;
pub mod normalizer;
pub mod resolver;
