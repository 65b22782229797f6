/*!
 * Canonical text form used for caption/sentence comparison.
 */

/// Quote characters trimmed from both ends of the normalized text
const SURROUNDING_QUOTES: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '\u{00AB}', '\u{00BB}'];

/// Normalize text for containment tests.
///
/// Drops line-continuation backslashes and all whitespace (newlines included),
/// then trims surrounding quotes. Captions and summary sentences must go
/// through this same function.
pub fn normalize(text: &str) -> String {
    let collapsed: String = text
        .chars()
        .filter(|c| *c != '\\' && !c.is_whitespace())
        .collect();

    collapsed.trim_matches(SURROUNDING_QUOTES).to_string()
}
