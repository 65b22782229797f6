/*!
 * Tests for file utility functionality
 */

use anyhow::Result;
use std::path::PathBuf;
use vidsum::file_utils::{FileManager, FileType};
use crate::common;

/// Test output path generation
#[test]
fn test_generate_output_path_shouldInsertSuffix() {
    let path = FileManager::generate_output_path("/videos/talk.mp4", "/out", "highlight", "mp4");
    assert_eq!(path, PathBuf::from("/out/talk.highlight.mp4"));
}

/// Test finding files by extension, case insensitively and without recursion
#[test]
fn test_find_files_withMixedFiles_shouldReturnMatchingSorted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "b.vtt", "")?;
    common::create_test_file(&dir, "a.VTT", "")?;
    common::create_test_file(&dir, "c.srt", "")?;
    std::fs::create_dir(dir.join("nested"))?;
    common::create_test_file(&dir.join("nested"), "d.vtt", "")?;

    let found = FileManager::find_files(&dir, ".vtt")?;
    assert_eq!(found, vec![dir.join("a.VTT"), dir.join("b.vtt")]);
    Ok(())
}

/// Test caption discovery next to a video
#[test]
fn test_find_sibling_subtitles_shouldPreferShortestVtt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let video = common::create_test_file(&dir, "talk.mp4", "")?;
    common::create_test_file(&dir, "talk.en.vtt", common::SAMPLE_VTT)?;
    common::create_test_file(&dir, "talk.vtt", common::SAMPLE_VTT)?;
    common::create_test_file(&dir, "talk.srt", "")?;
    common::create_test_file(&dir, "other.vtt", "")?;

    assert_eq!(FileManager::find_sibling_subtitles(&video)?, Some(dir.join("talk.vtt")));
    Ok(())
}

/// Test that SRT is used when there is no WebVTT file
#[test]
fn test_find_sibling_subtitles_withOnlySrt_shouldReturnSrt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let video = common::create_test_file(&dir, "talk.mkv", "")?;
    common::create_test_file(&dir, "talk.srt", "")?;
    common::create_test_file(&dir, "talkshow.vtt", "")?;

    assert_eq!(FileManager::find_sibling_subtitles(&video)?, Some(dir.join("talk.srt")));
    Ok(())
}

/// Test that nothing is returned without captions
#[test]
fn test_find_sibling_subtitles_withoutCaptions_shouldReturnNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video = common::create_test_file(&temp_dir.path().to_path_buf(), "talk.mp4", "")?;

    assert_eq!(FileManager::find_sibling_subtitles(&video)?, None);
    Ok(())
}

/// Test file type detection by extension and by content
#[test]
fn test_detect_file_type_shouldClassifyFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let vtt = common::create_test_file(&dir, "a.vtt", common::SAMPLE_VTT)?;
    let video = common::create_test_file(&dir, "a.MP4", "")?;
    let sniffed = common::create_test_file(&dir, "captions.txt", common::SAMPLE_VTT)?;
    let text = common::create_test_file(&dir, "notes.txt", "just some notes")?;

    assert_eq!(FileManager::detect_file_type(&vtt)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&video)?, FileType::Video);
    assert_eq!(FileManager::detect_file_type(&sniffed)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&text)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(dir.join("missing.vtt")).is_err());
    Ok(())
}

/// Test directory creation, including an already existing directory
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested)?;
    assert!(nested.is_dir());

    FileManager::ensure_dir(&nested)?;
    assert!(nested.is_dir());
    Ok(())
}

/// Test reading a missing file
#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string("/definitely/not/here.txt").is_err());
}
