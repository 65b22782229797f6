use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use log::debug;

// @module: File and directory utilities

// @const: Container extensions ffmpeg handles that we treat as video
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v",
    "mpg", "mpeg", "ogv", "ts", "mts", "m2ts",
];

// @const: Caption formats the transcript parser reads
const SUBTITLE_EXTENSIONS: &[&str] = &["vtt", "srt"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @generates: Output path next to the input, e.g. talk.highlight.mp4
    // @params: input_file, output_dir, suffix, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        suffix: &str,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(suffix);
        output_filename.push('.');
        output_filename.push_str(extension);

        output_dir.as_ref().join(output_filename)
    }

    /// Find files with a specific extension in a directory (not following into subdirectories)
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let wanted = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).max_depth(1).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(wanted) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Find a caption file sitting next to a video: `<stem>.vtt`, `<stem>.en.vtt`, `<stem>.srt`, ...
    ///
    /// WebVTT is preferred over SRT; within a format the shortest name wins,
    /// so `talk.vtt` beats `talk.en.vtt`.
    pub fn find_sibling_subtitles<P: AsRef<Path>>(video: P) -> Result<Option<PathBuf>> {
        let video = video.as_ref();
        let stem = match video.file_stem() {
            Some(stem) => stem.to_string_lossy().to_string(),
            None => return Ok(None),
        };
        let dir = match video.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        for extension in SUBTITLE_EXTENSIONS {
            let mut candidates: Vec<PathBuf> = Self::find_files(&dir, extension)?
                .into_iter()
                .filter(|path| {
                    path.file_name()
                        .map(|name| name.to_string_lossy().starts_with(&format!("{}.", stem)))
                        .unwrap_or(false)
                })
                .collect();

            candidates.sort_by_key(|path| path.as_os_str().len());
            if let Some(found) = candidates.into_iter().next() {
                debug!("Found caption file {:?} for {:?}", found, video);
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Detect whether a file is a caption file or a video
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy().to_lowercase();

            if SUBTITLE_EXTENSIONS.contains(&ext_str.as_str()) {
                return Ok(FileType::Subtitle);
            }

            if VIDEO_EXTENSIONS.contains(&ext_str.as_str()) {
                return Ok(FileType::Video);
            }
        }

        // Fall back to sniffing text content for cue timing lines
        if let Ok(content) = fs::read_to_string(path) {
            if content.trim_start().starts_with("WEBVTT") || content.contains(" --> ") {
                return Ok(FileType::Subtitle);
            }
        }

        Ok(FileType::Unknown)
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    /// Caption file (WebVTT or SRT)
    Subtitle,
    /// Video file supported by ffmpeg
    Video,
    /// Unknown file type
    Unknown,
}
