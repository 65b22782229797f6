/*!
 * Tests for caption file parsing
 */

use anyhow::Result;
use vidsum::errors::TranscriptError;
use vidsum::transcript::{CaptionBlock, Timecode, Transcript};
use crate::common;

/// Test timestamp parsing to elapsed seconds
#[test]
fn test_timecode_parse_withFullTimestamp_shouldConvertToSeconds() {
    let timecode = Timecode::parse("01:02:03.500").unwrap();
    assert_eq!(timecode.as_seconds(), 3723.5);
    assert_eq!(timecode.as_millis(), 3_723_500);
}

/// Test the SRT comma separator and the WebVTT short form
#[test]
fn test_timecode_parse_withAlternativeForms_shouldAccept() {
    assert_eq!(Timecode::parse("00:00:01,250").unwrap().as_millis(), 1_250);
    assert_eq!(Timecode::parse("02:03.500").unwrap().as_millis(), 123_500);
    assert_eq!("10:00:00.000".parse::<Timecode>().unwrap().as_seconds(), 36_000.0);
}

/// Test rejection of malformed timestamps
#[test]
fn test_timecode_parse_withInvalidTimestamp_shouldFail() {
    assert!(Timecode::parse("00:61:00.000").is_err());
    assert!(Timecode::parse("00:00:75.000").is_err());
    assert!(Timecode::parse("00:00:01.5").is_err());
    assert!(Timecode::parse("00:00:01").is_err());
    assert!(Timecode::parse("aa:bb:cc.ddd").is_err());
}

/// Test timestamp display formatting
#[test]
fn test_timecode_display_shouldUseWebVttFormat() {
    assert_eq!(Timecode::from_parts(1, 2, 3, 500).to_string(), "01:02:03.500");
    assert_eq!(Timecode::from_millis(0).to_string(), "00:00:00.000");
}

/// Test parsing of a well-formed WebVTT file
#[test]
fn test_parse_withValidWebVtt_shouldParseAllBlocks() {
    let transcript = Transcript::parse(common::SAMPLE_VTT).unwrap();

    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.skipped, 0);
    assert_eq!(
        transcript.blocks[0],
        CaptionBlock::new(Timecode::from_millis(0), Timecode::from_millis(2_000), "Hello world")
    );
    assert_eq!(transcript.blocks[2].text, "unrelated");
    assert_eq!(transcript.blocks[2].start.as_seconds(), 10.0);
}

/// Test that cue identifiers and header metadata never end up as caption text
#[test]
fn test_parse_withCueIdentifiers_shouldIgnoreThem() {
    let transcript = Transcript::parse(common::TALK_VTT).unwrap();

    assert_eq!(transcript.len(), 6);
    assert!(transcript.blocks.iter().all(|block| !block.text.starts_with(char::is_numeric)));
}

/// Test parsing of SRT content
#[test]
fn test_parse_withSrtContent_shouldParseBlocks() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nHi there\n\n2\n00:00:02,000 --> 00:00:03,500\nGeneral Kenobi\n";
    let transcript = Transcript::parse(content).unwrap();

    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.blocks[1].end.as_millis(), 3_500);
    assert_eq!(transcript.blocks[1].text, "General Kenobi");
}

/// Test that multi-line captions keep their line structure
#[test]
fn test_parse_withMultiLineCaption_shouldJoinWithNewline() {
    let content = "WEBVTT\n\n00:00:01.000 --> 00:00:04.000\nfirst line\nsecond line\n";
    let transcript = Transcript::parse(content).unwrap();

    assert_eq!(transcript.blocks[0].text, "first line\nsecond line");
    assert_eq!(transcript.full_text(), "first line second line");
}

/// Test that the last block does not need a trailing blank line
#[test]
fn test_parse_withoutTrailingNewline_shouldKeepLastBlock() {
    let content = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nlast words";
    let transcript = Transcript::parse(content).unwrap();

    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.blocks[0].text, "last words");
}

/// Test that a timing line without text is skipped
#[test]
fn test_parse_withEmptyCaption_shouldSkipIt() {
    let content = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n\n00:00:03.000 --> 00:00:04.000\nText\n";
    let transcript = Transcript::parse(content).unwrap();

    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.skipped, 1);
    assert_eq!(transcript.blocks[0].text, "Text");
}

/// Test that an unterminated block is dropped when the next cue starts
#[test]
fn test_parse_withMissingBlankTerminator_shouldDropOpenBlock() {
    let content = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nA\n00:00:03.000 --> 00:00:04.000\nB\n";
    let transcript = Transcript::parse(content).unwrap();

    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.skipped, 1);
    assert_eq!(transcript.blocks[0].text, "B");
}

/// Test that inverted or malformed timings are skipped together with their text
#[test]
fn test_parse_withInvalidTimings_shouldSkipBlocks() {
    let content = "WEBVTT\n\n\
        00:00:05.000 --> 00:00:04.000\nbackwards\n\n\
        00:00:xx.000 --> 00:00:07.000\ngarbled\n\n\
        00:00:08.000 --> 00:00:09.000\nfine\n";
    let transcript = Transcript::parse(content).unwrap();

    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.skipped, 2);
    assert_eq!(transcript.blocks[0].text, "fine");
}

/// Test that YouTube style inline markup is stripped from caption text
#[test]
fn test_parse_withInlineTags_shouldStripMarkup() {
    let content = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000 align:start position:0%\n<00:00:01.000><c> so</c><00:00:01.500><c> today</c>\n";
    let transcript = Transcript::parse(content).unwrap();

    assert_eq!(transcript.blocks[0].text, "so today");
}

/// Test that a file without any usable caption is an error
#[test]
fn test_parse_withNoValidBlocks_shouldReturnEmptyError() {
    let result = Transcript::parse("WEBVTT\n\n00:00:05.000 --> 00:00:01.000\nbackwards\n");
    assert!(matches!(result, Err(TranscriptError::Empty { skipped: 1 })));

    let result = Transcript::parse("");
    assert!(matches!(result, Err(TranscriptError::Empty { skipped: 0 })));
}

/// Test reading a caption file from disk
#[test]
fn test_fromFile_withValidFile_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(&temp_dir.path().to_path_buf(), "talk.vtt")?;

    let transcript = Transcript::from_file(&path)?;
    assert_eq!(transcript.len(), 3);
    Ok(())
}

/// Test reading a missing caption file
#[test]
fn test_fromFile_withMissingFile_shouldReturnIoError() {
    let result = Transcript::from_file("/definitely/not/here.vtt");
    assert!(matches!(result, Err(TranscriptError::Io(_))));
}

/// Test caption block display formatting
#[test]
fn test_captionBlock_display_shouldRenderCue() {
    let block = CaptionBlock::new(Timecode::from_millis(1_000), Timecode::from_millis(2_500), "Hi");
    assert_eq!(block.to_string(), "00:00:01.000 --> 00:00:02.500\nHi\n\n");
}

/// Test that an hour field too large for a timecode is rejected, not wrapped
#[test]
fn test_timecode_parse_withOverflowingHours_shouldFail() {
    assert!(Timecode::parse("99999999999999:00:00.000").is_err());
    assert!(Timecode::parse("5124095576031:00:00.000").is_err());
}

/// Test that a block with an out-of-range timestamp is skipped like any malformed block
#[test]
fn test_parse_withOverflowingTimestamp_shouldSkipBlock() {
    let content = "WEBVTT\n\n\
        99999999999999:00:00.000 --> 99999999999999:00:01.000\ngarbled\n\n\
        00:00:01.000 --> 00:00:02.000\nfine\n";
    let transcript = Transcript::parse(content).unwrap();

    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.skipped, 1);
    assert_eq!(transcript.blocks[0].text, "fine");
}
