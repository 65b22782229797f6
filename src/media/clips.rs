use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, debug};
use tempfile::TempDir;

use crate::alignment::ExtractionRange;
use crate::app_config::ClipConfig;
use crate::errors::MediaError;
use crate::media::run_tool;

// @module: Highlight rendering with ffmpeg

/// Cuts extraction ranges out of a video and joins them in plan order
#[derive(Debug, Clone)]
pub struct ClipExtractor {
    config: ClipConfig,
}

impl ClipExtractor {
    pub fn new(config: ClipConfig) -> Self {
        ClipExtractor { config }
    }

    /// Arguments to re-encode one range into its own file.
    ///
    /// Seeking before `-i` while re-encoding is frame accurate and avoids
    /// decoding everything up to the range start.
    pub fn segment_args(&self, video: &Path, range: &ExtractionRange, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-ss".to_string(),
            format!("{:.3}", range.start_seconds),
            "-i".to_string(),
            video.to_string_lossy().to_string(),
            "-t".to_string(),
            format!("{:.3}", range.duration()),
            "-c:v".to_string(),
            self.config.video_codec.clone(),
            "-c:a".to_string(),
            self.config.audio_codec.clone(),
            "-avoid_negative_ts".to_string(),
            "make_zero".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }

    /// Arguments to join the segments listed in `list_file`
    pub fn concat_args(list_file: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            list_file.to_string_lossy().to_string(),
            "-c".to_string(),
            "copy".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }

    /// Contents of an ffmpeg concat demuxer list
    pub fn concat_list(segments: &[PathBuf]) -> String {
        let mut list = String::new();
        for segment in segments {
            // Single quotes are closed, escaped and reopened
            let escaped = segment.to_string_lossy().replace('\'', "'\\''");
            let _ = writeln!(list, "file '{}'", escaped);
        }
        list
    }

    /// Render `ranges` of `video` into `output`, in the given order
    pub async fn extract_highlight(
        &self,
        video: &Path,
        ranges: &[ExtractionRange],
        output: &Path,
    ) -> Result<PathBuf, MediaError> {
        let usable: Vec<&ExtractionRange> = ranges
            .iter()
            .filter(|range| {
                let ok = range.duration() > 0.0;
                if !ok {
                    warn!("Skipping empty range {:.3}s - {:.3}s", range.start_seconds, range.end_seconds);
                }
                ok
            })
            .collect();

        if usable.is_empty() {
            return Err(MediaError::NothingToExtract);
        }

        let work_dir = TempDir::new()?;
        let extension = output
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_else(|| "mp4".to_string());

        let progress = ProgressBar::new(usable.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} clips {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut segments = Vec::with_capacity(usable.len());
        for (index, range) in usable.iter().enumerate() {
            let segment = work_dir.path().join(format!("segment_{:04}.{}", index, extension));
            progress.set_message(format!("{:.1}s - {:.1}s", range.start_seconds, range.end_seconds));

            let result = run_tool(
                &self.config.ffmpeg_path,
                self.segment_args(video, range, &segment),
                self.config.timeout_secs,
            )
            .await;
            if let Err(e) = result {
                progress.abandon_with_message("failed");
                return Err(e);
            }

            debug!("Wrote segment {:?}", segment);
            segments.push(segment);
            progress.inc(1);
        }

        let list_file = work_dir.path().join("segments.txt");
        std::fs::write(&list_file, Self::concat_list(&segments))?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        run_tool(
            &self.config.ffmpeg_path,
            Self::concat_args(&list_file, output),
            self.config.timeout_secs,
        )
        .await?;

        progress.finish_with_message("done");
        info!("Wrote highlight with {} clip(s) to {:?}", segments.len(), output);

        Ok(output.to_path_buf())
    }
}
