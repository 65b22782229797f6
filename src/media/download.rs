use std::path::{Path, PathBuf};
use log::{info, debug};

use crate::app_config::DownloadConfig;
use crate::errors::MediaError;
use crate::file_utils::{FileManager, FileType};
use crate::media::{run_tool, SourceMedia};

// @module: Remote video acquisition through yt-dlp

/// File stem every download is written under inside the work directory
const OUTPUT_STEM: &str = "source";

/// Downloads a video and its captions with yt-dlp
#[derive(Debug, Clone)]
pub struct Downloader {
    config: DownloadConfig,
}

impl Downloader {
    pub fn new(config: DownloadConfig) -> Self {
        Downloader { config }
    }

    /// yt-dlp arguments: best format, manual and automatic captions as WebVTT
    pub fn build_args(&self, url: &str, work_dir: &Path) -> Vec<String> {
        let template = work_dir.join(format!("{}.%(ext)s", OUTPUT_STEM));

        vec![
            "--no-playlist".to_string(),
            "-f".to_string(),
            self.config.format.clone(),
            "-o".to_string(),
            template.to_string_lossy().to_string(),
            "--write-subs".to_string(),
            "--write-auto-subs".to_string(),
            "--sub-langs".to_string(),
            self.config.subtitle_language.clone(),
            "--sub-format".to_string(),
            "vtt".to_string(),
            url.to_string(),
        ]
    }

    /// Download `url` into `work_dir` and locate the video and caption files
    pub async fn download(&self, url: &str, work_dir: &Path) -> Result<SourceMedia, MediaError> {
        std::fs::create_dir_all(work_dir)?;

        info!("Downloading {} with {}", url, self.config.ytdlp_path);
        run_tool(&self.config.ytdlp_path, self.build_args(url, work_dir), self.config.timeout_secs).await?;

        Self::locate_outputs(work_dir)
    }

    /// Find what yt-dlp wrote into the work directory
    pub fn locate_outputs(work_dir: &Path) -> Result<SourceMedia, MediaError> {
        let entries = std::fs::read_dir(work_dir)?;

        let mut video: Option<PathBuf> = None;
        let mut subtitles: Option<PathBuf> = None;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().starts_with(OUTPUT_STEM))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        for path in paths {
            match FileManager::detect_file_type(&path) {
                Ok(FileType::Video) if video.is_none() => video = Some(path),
                Ok(FileType::Subtitle) if subtitles.is_none() => subtitles = Some(path),
                _ => debug!("Ignoring download artifact {:?}", path),
            }
        }

        let video = video.ok_or_else(|| MediaError::ToolFailed {
            tool: "yt-dlp".to_string(),
            message: format!("no video file found in {}", work_dir.display()),
        })?;
        let subtitles = subtitles.ok_or_else(|| {
            MediaError::MissingSubtitles(format!("the download of {:?} has no captions", video))
        })?;

        Ok(SourceMedia { video, subtitles })
    }
}
