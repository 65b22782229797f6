use anyhow::{Result, Context, anyhow};
use log::{warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use chrono::Local;
use tempfile::TempDir;
use url::Url;

use crate::alignment::{ExtractionPlan, RangeResolver};
use crate::app_config::{Config, SummaryProvider};
use crate::errors::AlignmentError;
use crate::file_utils::{FileManager, FileType};
use crate::media::{ClipExtractor, Downloader, SourceMedia, SubtitleExtractor};
use crate::providers::ollama::Ollama;
use crate::summarizer::{ExtractiveSummarizer, LlmSummarizer, Summarizer};
use crate::transcript::Transcript;

// @module: Application controller for highlight generation

/// What a single run should do
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// URL, local video, or caption file
    pub input: String,

    /// Output video path; defaults to `<stem>.highlight.mp4`
    pub output: Option<PathBuf>,

    /// Caption file to use instead of discovering one
    pub subtitles: Option<PathBuf>,

    /// Keep downloaded video and captions
    pub keep_original: bool,

    /// Overwrite an existing output file
    pub force_overwrite: bool,

    /// Stop after alignment and return the plan
    pub plan_only: bool,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Highlight written to this path
    Rendered(PathBuf),
    /// Alignment result without rendering
    Planned(ExtractionPlan),
    /// The summary produced no alignable sentence
    NothingToExtract,
    /// Output already exists and overwriting was not requested
    Skipped(PathBuf),
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the input names a remote video rather than a local file
    pub fn is_url(input: &str) -> bool {
        Url::parse(input)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }

    /// Summarizer selected by the configuration
    pub fn build_summarizer(&self) -> Box<dyn Summarizer> {
        match self.config.summary.provider {
            SummaryProvider::Extractive => Box::new(ExtractiveSummarizer::new()),
            SummaryProvider::Ollama => {
                let ollama = &self.config.summary.ollama;
                let client = Ollama::new_with_config(
                    ollama.endpoint.clone(),
                    ollama.timeout_secs,
                    ollama.retry_count,
                    ollama.retry_backoff_ms,
                );
                Box::new(LlmSummarizer::new(client, ollama.model.clone(), ollama.temperature))
            }
        }
    }

    /// Run the full workflow with the configured summarizer
    pub async fn run(&self, options: RunOptions) -> Result<RunOutcome> {
        let summarizer = self.build_summarizer();
        self.run_with_summarizer(options, summarizer.as_ref()).await
    }

    /// Run the full workflow: acquire, summarize, align, render
    pub async fn run_with_summarizer(&self, options: RunOptions, summarizer: &dyn Summarizer) -> Result<RunOutcome> {
        let start_time = Instant::now();

        // Caption file input: there is no video to cut, only a plan to show
        if !Self::is_url(&options.input) {
            let input = PathBuf::from(&options.input);
            if FileManager::detect_file_type(&input)? == FileType::Subtitle {
                info!("Input is a caption file, computing the extraction plan only");
                let plan = self.plan_for_file(&input, summarizer).await?;
                return Ok(plan.map_or(RunOutcome::NothingToExtract, RunOutcome::Planned));
            }
        }

        let scratch = TempDir::new().context("Failed to create scratch directory")?;
        let (media, download_dir) = self.acquire(&options, scratch.path()).await?;

        let output = match &options.output {
            Some(path) => path.clone(),
            None => {
                let dir = if download_dir.is_some() {
                    PathBuf::from(".")
                } else {
                    media.video.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."))
                };
                FileManager::generate_output_path(&media.video, dir, "highlight", "mp4")
            }
        };

        if !options.plan_only && output.exists() && !options.force_overwrite {
            warn!("Output already exists (use -f to force overwrite): {:?}", output);
            Self::cleanup_download(download_dir.as_deref(), options.keep_original);
            return Ok(RunOutcome::Skipped(output));
        }

        let outcome = match self.plan_for_file(&media.subtitles, summarizer).await {
            Ok(Some(plan)) if options.plan_only => Ok(RunOutcome::Planned(plan)),
            Ok(Some(plan)) => {
                let extractor = ClipExtractor::new(self.config.clips.clone());
                extractor
                    .extract_highlight(&media.video, &plan.ranges, &output)
                    .await
                    .map(RunOutcome::Rendered)
                    .context("Failed to render highlight")
            }
            Ok(None) => Ok(RunOutcome::NothingToExtract),
            Err(e) => Err(e),
        };

        Self::cleanup_download(download_dir.as_deref(), options.keep_original);

        if outcome.is_ok() {
            info!("Finished in {}", Self::format_duration(start_time.elapsed()));
        }
        outcome
    }

    /// Parse a caption file, summarize it and align the summary.
    ///
    /// `Ok(None)` means there is nothing to extract: the summary was empty or
    /// none of its sentences matched a caption.
    pub async fn plan_for_file(&self, subtitles: &Path, summarizer: &dyn Summarizer) -> Result<Option<ExtractionPlan>> {
        let content = FileManager::read_to_string(subtitles)?;
        self.plan_for_content(&content, summarizer).await
    }

    /// Same as [`Controller::plan_for_file`] on already loaded caption text
    pub async fn plan_for_content(&self, content: &str, summarizer: &dyn Summarizer) -> Result<Option<ExtractionPlan>> {
        let transcript = Transcript::parse(content).context("Failed to parse transcript")?;
        info!("Transcript has {} caption block(s)", transcript.len());

        let options = self.config.summary.options();
        let summary = summarizer
            .summarize(&transcript.full_text(), &options)
            .await
            .with_context(|| format!("{} summarizer failed", summarizer.name()))?;
        debug!("Summary: {}", summary);

        match RangeResolver::new(&transcript).resolve(&summary) {
            Ok(plan) if plan.is_empty() => {
                warn!(
                    "None of the {} summary sentence(s) matched the transcript, nothing to extract",
                    plan.sentence_count
                );
                Ok(None)
            }
            Ok(plan) => {
                if !plan.unmatched_sentences.is_empty() {
                    warn!("{} summary sentence(s) had no matching captions", plan.unmatched_sentences.len());
                }
                Ok(Some(plan))
            }
            Err(AlignmentError::EmptySummary) => {
                warn!("The summary is empty, nothing to extract");
                Ok(None)
            }
            Err(e) => Err(anyhow!(e)),
        }
    }

    /// Obtain the video and its captions. Returns the download directory
    /// when the media was fetched from a URL.
    async fn acquire(&self, options: &RunOptions, scratch: &Path) -> Result<(SourceMedia, Option<PathBuf>)> {
        if Self::is_url(&options.input) {
            let root = PathBuf::from(&self.config.download.download_root);
            FileManager::ensure_dir(&root)?;
            let download_dir = root.join(format!("vidsum-{}", Local::now().format("%Y%m%d-%H%M%S")));

            let downloader = Downloader::new(self.config.download.clone());
            let mut media = match downloader.download(&options.input, &download_dir).await {
                Ok(media) => media,
                Err(e) => {
                    // Partial downloads follow the same keep/remove rule as finished ones
                    Self::cleanup_download(Some(&download_dir), options.keep_original);
                    return Err(anyhow::Error::new(e).context(format!("Failed to download {}", options.input)));
                }
            };

            if let Some(subtitles) = &options.subtitles {
                media.subtitles = subtitles.clone();
            }
            return Ok((media, Some(download_dir)));
        }

        let video = PathBuf::from(&options.input);
        if !FileManager::file_exists(&video) {
            return Err(anyhow!("Input file does not exist: {:?}", video));
        }

        let subtitles = match &options.subtitles {
            Some(path) => path.clone(),
            None => match FileManager::find_sibling_subtitles(&video)? {
                Some(path) => path,
                None => {
                    let extracted = scratch.join("embedded.vtt");
                    SubtitleExtractor::new(self.config.clips.ffmpeg_path.clone(), self.config.clips.timeout_secs)
                        .extract_first_track(&video, &extracted)
                        .await
                        .context("No caption file next to the video and no embedded subtitles")?;
                    extracted
                }
            },
        };

        Ok((SourceMedia { video, subtitles }, None))
    }

    fn cleanup_download(download_dir: Option<&Path>, keep_original: bool) {
        let Some(dir) = download_dir else { return };
        if keep_original {
            info!("Kept downloaded files in {:?}", dir);
            return;
        }
        match std::fs::remove_dir_all(dir) {
            Ok(()) => info!("Removed the original downloaded files"),
            Err(e) => warn!("Could not remove {:?}: {}", dir, e),
        }
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
