use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::summarizer::SummaryOptions;

/// Upper bound on Ollama retries; the backoff doubles on each one
pub const MAX_RETRY_COUNT: u32 = 10;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Summarization settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Clip rendering settings
    #[serde(default)]
    pub clips: ClipConfig,

    /// Download settings
    #[serde(default)]
    pub download: DownloadConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Summarization backend
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryProvider {
    // @provider: Local frequency-based sentence selection
    #[default]
    Extractive,
    // @provider: Ollama server
    Ollama,
}

impl SummaryProvider {
    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Extractive => "extractive".to_string(),
            Self::Ollama => "ollama".to_string(),
        }
    }
}

impl std::fmt::Display for SummaryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for SummaryProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "extractive" => Ok(Self::Extractive),
            "ollama" => Ok(Self::Ollama),
            _ => Err(anyhow!("Invalid summary provider: {}", s)),
        }
    }
}

/// Summarization configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SummaryConfig {
    /// Backend used to produce the summary
    #[serde(default)]
    pub provider: SummaryProvider,

    /// Fraction of sentences to keep, in (0, 1]
    #[serde(default = "default_ratio")]
    pub ratio: f32,

    /// Shortest sentence (characters) eligible for the summary
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Longest sentence (characters) eligible for the summary
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Always keep the first eligible sentence
    #[serde(default = "default_true")]
    pub use_first: bool,

    /// Ollama settings, used when `provider` is `ollama`
    #[serde(default)]
    pub ollama: OllamaConfig,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            provider: SummaryProvider::default(),
            ratio: default_ratio(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            use_first: true,
            ollama: OllamaConfig::default(),
        }
    }
}

impl SummaryConfig {
    /// Length constraints handed to the summarizer
    pub fn options(&self) -> SummaryOptions {
        SummaryOptions {
            ratio: self.ratio,
            min_length: self.min_length,
            max_length: self.max_length,
            use_first: self.use_first,
        }
    }
}

/// Ollama service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OllamaConfig {
    /// Model name (e.g., "llama3.2:3b")
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// Service endpoint URL
    #[serde(default = "default_ollama_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_ollama_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Base backoff in milliseconds, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            model: default_ollama_model(),
            endpoint: default_ollama_endpoint(),
            timeout_secs: default_ollama_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_temperature(),
        }
    }
}

/// Configuration for cutting and joining clips
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClipConfig {
    /// ffmpeg executable
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Video encoder for the cut segments
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Audio encoder for the cut segments
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Timeout for a single ffmpeg invocation, in seconds
    #[serde(default = "default_ffmpeg_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            timeout_secs: default_ffmpeg_timeout_secs(),
        }
    }
}

/// Configuration for fetching remote videos
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DownloadConfig {
    /// yt-dlp executable
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,

    /// yt-dlp format selector
    #[serde(default = "default_download_format")]
    pub format: String,

    /// Caption language to request
    #[serde(default = "default_subtitle_language")]
    pub subtitle_language: String,

    /// Timeout for the whole download, in seconds
    #[serde(default = "default_download_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory the per-run download folders are created in
    #[serde(default = "default_download_root")]
    pub download_root: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: default_ytdlp_path(),
            format: default_download_format(),
            subtitle_language: default_subtitle_language(),
            timeout_secs: default_download_timeout_secs(),
            download_root: default_download_root(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_ratio() -> f32 {
    0.3
}

fn default_min_length() -> usize {
    60
}

fn default_max_length() -> usize {
    500
}

fn default_true() -> bool {
    true
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_timeout_secs() -> u64 {
    120
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_temperature() -> f32 {
    0.1
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_ffmpeg_timeout_secs() -> u64 {
    600
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_download_format() -> String {
    "best".to_string()
}

fn default_subtitle_language() -> String {
    "en".to_string()
}

fn default_download_timeout_secs() -> u64 {
    1800
}

fn default_download_root() -> String {
    ".".to_string()
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.summary.options().validate()?;

        if self.summary.provider == SummaryProvider::Ollama {
            let ollama = &self.summary.ollama;
            if ollama.model.trim().is_empty() {
                return Err(anyhow!("An Ollama model name is required for the ollama summary provider"));
            }
            Url::parse(&ollama.endpoint)
                .with_context(|| format!("Invalid Ollama endpoint: {}", ollama.endpoint))?;
            if !(0.0..=1.0).contains(&ollama.temperature) {
                return Err(anyhow!("Temperature must be between 0.0 and 1.0, got {}", ollama.temperature));
            }
            if ollama.retry_count > MAX_RETRY_COUNT {
                return Err(anyhow!("Retry count must be at most {}, got {}", MAX_RETRY_COUNT, ollama.retry_count));
            }
        }

        if self.clips.video_codec.trim().is_empty() || self.clips.audio_codec.trim().is_empty() {
            return Err(anyhow!("Video and audio codecs must not be empty"));
        }

        if self.clips.timeout_secs == 0 || self.download.timeout_secs == 0 {
            return Err(anyhow!("Tool timeouts must be greater than zero"));
        }

        Ok(())
    }
}
