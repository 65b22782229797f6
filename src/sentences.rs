/*!
 * Rule-based sentence segmentation.
 *
 * Used both to pick candidate sentences for the extractive summarizer and
 * to split the summary before alignment, so the two sides agree on where
 * sentences start and end.
 */

/// Words that end with a period without ending the sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e",
    "inc", "ltd", "co", "corp", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
    "sep", "sept", "oct", "nov", "dec", "vol", "approx", "dept", "fig",
];

const TERMINATORS: &[char] = &['.', '!', '?', '\u{2026}'];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201D}', '\u{2019}', '\u{00BB}'];

const OPENERS: &[char] = &['"', '\'', '(', '[', '\u{201C}', '\u{2018}', '\u{00AB}'];

/// Split text into trimmed, non-empty sentences
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut sentence_start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (_, c) = chars[i];
        if !TERMINATORS.contains(&c) {
            i += 1;
            continue;
        }

        // Absorb runs like "?!" or "..." and trailing closing quotes/brackets
        let mut j = i + 1;
        while j < chars.len() && (TERMINATORS.contains(&chars[j].1) || CLOSERS.contains(&chars[j].1)) {
            j += 1;
        }

        let at_boundary = j == chars.len() || chars[j].1.is_whitespace();
        if at_boundary && !(c == '.' && j == i + 1 && is_abbreviation(&text[sentence_start..chars[i].0])) {
            let end = chars.get(j).map_or(text.len(), |(offset, _)| *offset);
            push_sentence(&mut sentences, &text[sentence_start..end]);
            sentence_start = end;
        }

        i = j;
    }

    push_sentence(&mut sentences, &text[sentence_start..]);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Whether the last word of `preceding` (the text right before a period) is
/// an abbreviation or an initial.
///
/// Initials are single uppercase letters; the pronoun `I` and lowercase
/// letters end sentences.
fn is_abbreviation(preceding: &str) -> bool {
    let word = preceding
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(OPENERS);

    if word.is_empty() {
        return false;
    }

    let mut letters = word.chars();
    let initial = matches!(
        (letters.next(), letters.next()),
        (Some(first), None) if first.is_uppercase() && first != 'I'
    );

    initial || ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}
