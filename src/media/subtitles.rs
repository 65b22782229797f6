use std::path::Path;
use log::info;

use crate::errors::MediaError;
use crate::media::run_tool;

// @module: Embedded subtitle track extraction

/// Converts the first embedded subtitle stream of a video to WebVTT
#[derive(Debug, Clone)]
pub struct SubtitleExtractor {
    ffmpeg_path: String,
    timeout_secs: u64,
}

impl SubtitleExtractor {
    pub fn new(ffmpeg_path: impl Into<String>, timeout_secs: u64) -> Self {
        SubtitleExtractor {
            ffmpeg_path: ffmpeg_path.into(),
            timeout_secs,
        }
    }

    pub fn build_args(video: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-i".to_string(),
            video.to_string_lossy().to_string(),
            "-map".to_string(),
            "0:s:0".to_string(),
            "-c:s".to_string(),
            "webvtt".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }

    /// Write the first subtitle track of `video` to `output`
    pub async fn extract_first_track(&self, video: &Path, output: &Path) -> Result<(), MediaError> {
        if !video.exists() {
            return Err(MediaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("video file does not exist: {}", video.display()),
            )));
        }

        info!("Extracting embedded subtitles from {:?}", video);

        match run_tool(&self.ffmpeg_path, Self::build_args(video, output), self.timeout_secs).await {
            Ok(_) => {}
            // ffmpeg fails the stream mapping when there is no subtitle stream
            Err(MediaError::ToolFailed { message, .. }) => {
                return Err(MediaError::MissingSubtitles(format!(
                    "{:?} has no usable subtitle track: {}",
                    video, message
                )));
            }
            Err(e) => return Err(e),
        }

        let size = std::fs::metadata(output)?.len();
        if size == 0 {
            return Err(MediaError::MissingSubtitles(format!(
                "subtitle track of {:?} is empty",
                video
            )));
        }

        Ok(())
    }
}
