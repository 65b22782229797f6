/*!
 * Interval merging for a single sentence's matches.
 */

use crate::transcript::TimeSpan;

/// Collapse matched spans into one range using the longest contiguous prefix.
///
/// Spans are kept while `spans[i].end == spans[i + 1].start`; everything from
/// the first gap onwards is dropped, even if a longer contiguous run follows.
/// Returns `None` for an empty slice.
pub fn merge(spans: &[TimeSpan]) -> Option<TimeSpan> {
    let first = spans.first()?;

    let kept = spans
        .windows(2)
        .position(|pair| pair[0].end != pair[1].start)
        .map_or(spans.len(), |gap| gap + 1);

    Some(TimeSpan::new(first.start, spans[kept - 1].end))
}
