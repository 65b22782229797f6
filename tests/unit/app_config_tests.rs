/*!
 * Tests for app configuration functionality
 */

use anyhow::Result;
use std::str::FromStr;
use vidsum::app_config::{Config, LogLevel, SummaryProvider, MAX_RETRY_COUNT};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.summary.provider, SummaryProvider::Extractive);
    assert_eq!(config.summary.ratio, 0.3);
    assert_eq!(config.summary.min_length, 60);
    assert_eq!(config.summary.max_length, 500);
    assert!(config.summary.use_first);
    assert_eq!(config.summary.ollama.endpoint, "http://localhost:11434");
    assert_eq!(config.clips.ffmpeg_path, "ffmpeg");
    assert_eq!(config.clips.video_codec, "libx264");
    assert_eq!(config.download.ytdlp_path, "yt-dlp");
    assert_eq!(config.download.subtitle_language, "en");
    assert_eq!(config.download.download_root, ".");
    assert_eq!(config.log_level, LogLevel::Info);

    assert!(config.validate().is_ok());
}

/// Test that summary settings reach the summarizer options
#[test]
fn test_summary_options_shouldMirrorConfig() {
    let mut config = Config::default();
    config.summary.ratio = 0.5;
    config.summary.use_first = false;

    let options = config.summary.options();
    assert_eq!(options.ratio, 0.5);
    assert!(!options.use_first);
    assert_eq!(options.min_length, config.summary.min_length);
}

/// Test saving and loading a configuration file
#[test]
fn test_save_and_from_file_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.summary.provider = SummaryProvider::Ollama;
    config.summary.ollama.model = "mistral:7b".to_string();
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.summary.provider, SummaryProvider::Ollama);
    assert_eq!(loaded.summary.ollama.model, "mistral:7b");
    assert_eq!(loaded.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that missing sections and fields fall back to defaults
#[test]
fn test_from_file_withPartialConfig_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{ "summary": { "provider": "ollama", "ratio": 0.2 }, "log_level": "warn" }"#,
    )?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.summary.provider, SummaryProvider::Ollama);
    assert_eq!(config.summary.ratio, 0.2);
    assert_eq!(config.summary.max_length, 500);
    assert_eq!(config.summary.ollama.model, "llama3.2:3b");
    assert_eq!(config.clips.audio_codec, "aac");
    assert_eq!(config.log_level, LogLevel::Warn);
    Ok(())
}

/// Test that malformed JSON is reported
#[test]
fn test_from_file_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{ not json")?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}

/// Test validation of summary settings
#[test]
fn test_validate_withInvalidSummarySettings_shouldFail() {
    let mut config = Config::default();
    config.summary.ratio = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.summary.min_length = 600;
    assert!(config.validate().is_err());
}

/// Test validation of Ollama settings, only checked when Ollama is selected
#[test]
fn test_validate_withInvalidOllamaSettings_shouldFailOnlyForOllama() {
    let mut config = Config::default();
    config.summary.ollama.endpoint = "not a url".to_string();
    assert!(config.validate().is_ok());

    config.summary.provider = SummaryProvider::Ollama;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.summary.provider = SummaryProvider::Ollama;
    config.summary.ollama.model = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.summary.provider = SummaryProvider::Ollama;
    config.summary.ollama.temperature = 1.5;
    assert!(config.validate().is_err());
}

/// Test that the Ollama retry count is bounded
#[test]
fn test_validate_withTooManyRetries_shouldFail() {
    let mut config = Config::default();
    config.summary.provider = SummaryProvider::Ollama;

    config.summary.ollama.retry_count = MAX_RETRY_COUNT;
    assert!(config.validate().is_ok());

    config.summary.ollama.retry_count = 100;
    assert!(config.validate().is_err());
}

/// Test validation of media tool settings
#[test]
fn test_validate_withInvalidToolSettings_shouldFail() {
    let mut config = Config::default();
    config.clips.video_codec = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.download.timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// Test provider name parsing and display
#[test]
fn test_summary_provider_fromStr_shouldIgnoreCase() {
    assert_eq!(SummaryProvider::from_str("OLLAMA").unwrap(), SummaryProvider::Ollama);
    assert_eq!(SummaryProvider::from_str("extractive").unwrap(), SummaryProvider::Extractive);
    assert!(SummaryProvider::from_str("openai").is_err());
    assert_eq!(SummaryProvider::Ollama.to_string(), "ollama");
}

/// Test log level mapping
#[test]
fn test_log_level_toLevelFilter_shouldMap() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
