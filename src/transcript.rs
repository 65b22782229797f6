use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context, anyhow};
use log::{warn, debug};

use crate::errors::TranscriptError;

// @module: Caption file parsing into typed caption blocks

// @const: Cue timing line, optionally followed by WebVTT cue settings
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:\d+:)?\d{2}:\d{2}[.,]\d{3})\s*-->\s*((?:\d+:)?\d{2}:\d{2}[.,]\d{3})(?:\s.*)?$").unwrap()
});

// @const: Inline WebVTT markup such as <c>, </c>, <i> and <00:00:01.000>
static INLINE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").unwrap()
});

/// A caption timestamp with millisecond precision.
///
/// Stored as whole milliseconds so that two timecodes read from the same
/// file compare exactly; the interval merger relies on `end == start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode {
    millis: u64,
}

impl Timecode {
    /// Create a timecode from milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Timecode { millis }
    }

    /// Create a timecode from hour, minute, second and millisecond components
    pub fn from_parts(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Self {
        Timecode {
            millis: hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis,
        }
    }

    /// Total milliseconds
    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Elapsed seconds, i.e. `3600*H + 60*M + S.mmm`
    pub fn as_seconds(&self) -> f64 {
        self.millis as f64 / 1000.0
    }

    /// Parse `HH:MM:SS.mmm`. The SRT comma separator and the WebVTT short
    /// form `MM:SS.mmm` are accepted as well.
    pub fn parse(timestamp: &str) -> Result<Self> {
        let timestamp = timestamp.trim();
        let (clock, millis) = timestamp
            .rsplit_once(['.', ','])
            .ok_or_else(|| anyhow!("Missing millisecond separator in timestamp: {}", timestamp))?;

        if millis.len() != 3 {
            return Err(anyhow!("Milliseconds must have three digits: {}", timestamp));
        }
        let millis: u64 = millis.parse().context("Failed to parse milliseconds")?;

        let parts: Vec<&str> = clock.split(':').collect();
        let (hours, minutes, seconds) = match parts.as_slice() {
            [h, m, s] => (
                h.parse::<u64>().context("Failed to parse hours")?,
                m.parse::<u64>().context("Failed to parse minutes")?,
                s.parse::<u64>().context("Failed to parse seconds")?,
            ),
            [m, s] => (
                0,
                m.parse::<u64>().context("Failed to parse minutes")?,
                s.parse::<u64>().context("Failed to parse seconds")?,
            ),
            _ => return Err(anyhow!("Invalid timestamp format: {}", timestamp)),
        };

        if minutes >= 60 || seconds >= 60 {
            return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
        }

        Self::checked_from_parts(hours, minutes, seconds, millis)
            .ok_or_else(|| anyhow!("Timestamp out of range: {}", timestamp))
    }

    /// Like [`Timecode::from_parts`], but `None` when the total overflows
    fn checked_from_parts(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<Self> {
        let millis = hours
            .checked_mul(3_600_000)?
            .checked_add(minutes.checked_mul(60_000)?)?
            .checked_add(seconds.checked_mul(1_000)?)?
            .checked_add(millis)?;

        Some(Timecode { millis })
    }
}

impl FromStr for Timecode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hours = self.millis / 3_600_000;
        let minutes = (self.millis % 3_600_000) / 60_000;
        let seconds = (self.millis % 60_000) / 1_000;
        let millis = self.millis % 1_000;

        write!(f, "{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}

/// A `(start, end)` pair of timecodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: Timecode,
    pub end: Timecode,
}

impl TimeSpan {
    pub fn new(start: Timecode, end: Timecode) -> Self {
        TimeSpan { start, end }
    }
}

// @struct: Single timed caption
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionBlock {
    // @field: Cue start
    pub start: Timecode,

    // @field: Cue end
    pub end: Timecode,

    // @field: Caption text, one line per caption line
    pub text: String,
}

impl CaptionBlock {
    /// Creates a caption block without validation
    pub fn new(start: Timecode, end: Timecode, text: impl Into<String>) -> Self {
        CaptionBlock {
            start,
            end,
            text: text.into(),
        }
    }

    // @returns: The block's time span
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }
}

impl fmt::Display for CaptionBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Parsed caption file
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Caption blocks in file order
    pub blocks: Vec<CaptionBlock>,

    /// Number of malformed blocks dropped while parsing
    pub skipped: usize,
}

/// Parser state while walking the caption file line by line
enum ParseState {
    /// Between blocks; anything that is not a timing line is metadata
    Idle,
    /// Inside a block after a valid timing line
    InBlock { start: Timecode, end: Timecode, lines: Vec<String> },
    /// Inside a block whose timing line was rejected
    Discarding,
}

impl Transcript {
    /// Read and parse a caption file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TranscriptError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse WebVTT (or SRT) content into caption blocks.
    ///
    /// Malformed blocks are dropped and counted in `skipped`. Only a file
    /// without a single usable block is an error.
    pub fn parse(content: &str) -> Result<Self, TranscriptError> {
        let mut blocks = Vec::new();
        let mut skipped = 0usize;
        let mut state = ParseState::Idle;

        for (index, raw_line) in content.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();

            if line.is_empty() {
                match std::mem::replace(&mut state, ParseState::Idle) {
                    ParseState::InBlock { start, end, lines } => {
                        if lines.is_empty() {
                            debug!("Caption ending at line {} has no text", line_number);
                            skipped += 1;
                        } else {
                            blocks.push(CaptionBlock::new(start, end, lines.join("\n")));
                        }
                    }
                    ParseState::Idle | ParseState::Discarding => {}
                }
                continue;
            }

            if line.contains("-->") {
                if let ParseState::InBlock { lines, .. } = &state {
                    // A new timing line before the blank terminator
                    debug!(
                        "Caption before line {} is not terminated ({} text line(s)), dropping it",
                        line_number,
                        lines.len()
                    );
                    skipped += 1;
                }

                state = match Self::parse_timing_line(line) {
                    Ok(span) if span.start < span.end => ParseState::InBlock {
                        start: span.start,
                        end: span.end,
                        lines: Vec::new(),
                    },
                    Ok(span) => {
                        debug!("Caption at line {} has start {} >= end {}", line_number, span.start, span.end);
                        skipped += 1;
                        ParseState::Discarding
                    }
                    Err(e) => {
                        debug!("Invalid timing line {}: {} ({})", line_number, line, e);
                        skipped += 1;
                        ParseState::Discarding
                    }
                };
                continue;
            }

            match &mut state {
                ParseState::InBlock { lines, .. } => {
                    let text = Self::clean_text_line(line);
                    if !text.is_empty() {
                        lines.push(text);
                    }
                }
                // Header, annotations, cue identifiers, NOTE bodies
                ParseState::Idle | ParseState::Discarding => {}
            }
        }

        // End of input terminates the last block
        if let ParseState::InBlock { start, end, lines } = state {
            if lines.is_empty() {
                skipped += 1;
            } else {
                blocks.push(CaptionBlock::new(start, end, lines.join("\n")));
            }
        }

        if skipped > 0 {
            warn!("Skipped {} malformed caption block(s)", skipped);
        }

        if blocks.is_empty() {
            return Err(TranscriptError::Empty { skipped });
        }

        debug!("Parsed {} caption block(s)", blocks.len());

        Ok(Transcript { blocks, skipped })
    }

    /// All caption text joined by single spaces, the text fed to the summarizer
    pub fn full_text(&self) -> String {
        self.blocks
            .iter()
            .flat_map(|block| block.text.lines())
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of caption blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Parse a `start --> end` line
    fn parse_timing_line(line: &str) -> Result<TimeSpan> {
        let caps = TIMING_LINE_REGEX
            .captures(line)
            .ok_or_else(|| anyhow!("Not a timing line"))?;

        let start = Timecode::parse(&caps[1])?;
        let end = Timecode::parse(&caps[2])?;

        Ok(TimeSpan::new(start, end))
    }

    /// Strip inline markup and the most common HTML entities
    fn clean_text_line(line: &str) -> String {
        let stripped = INLINE_TAG_REGEX.replace_all(line, "");
        stripped
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
            .trim()
            .to_string()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Transcript")?;
        writeln!(f, "Blocks: {}", self.blocks.len())?;
        writeln!(f, "Skipped: {}", self.skipped)?;
        Ok(())
    }
}
