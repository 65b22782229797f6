/*!
 * Common test utilities for the vidsum test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

// Re-export the mock summarizers and providers
pub mod mock_summarizers;

/// Three captions: two contiguous ones, then a gap before the third
pub const SAMPLE_VTT: &str = "WEBVTT
Kind: captions
Language: en

00:00:00.000 --> 00:00:02.000
Hello world

00:00:02.000 --> 00:00:04.000
this is a test

00:00:10.000 --> 00:00:12.000
unrelated
";

/// A longer talk where every caption is a full sentence
pub const TALK_VTT: &str = "WEBVTT

1
00:00:00.000 --> 00:00:05.000
Welcome to this talk about building reliable command line tools in Rust.

2
00:00:05.000 --> 00:00:09.000
Today we will look at error handling, logging and configuration.

3
00:00:09.000 --> 00:00:12.000
Short filler line here.

4
00:00:20.000 --> 00:00:26.000
Error handling in Rust tools starts with typed errors and the question mark operator.

5
00:00:26.000 --> 00:00:31.000
Logging in Rust tools should go through the log facade so libraries stay quiet.

6
00:00:40.000 --> 00:00:45.000
Thanks for listening and see you next time at the next meetup.
";

/// Install env_logger once so failing tests show library logs
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates the sample caption file for testing
pub fn create_test_subtitle(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_VTT)
}
