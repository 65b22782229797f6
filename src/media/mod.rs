/*!
 * Wrappers around the external media tools.
 *
 * - `download`: Fetch a video and its captions with yt-dlp
 * - `subtitles`: Pull an embedded subtitle track out of a local video
 * - `clips`: Cut the extraction ranges and concatenate them with ffmpeg
 */

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;
use log::{debug, error};
use tokio::process::Command;

use crate::errors::MediaError;

pub use self::clips::ClipExtractor;
pub use self::download::Downloader;
pub use self::subtitles::SubtitleExtractor;

pub mod clips;
pub mod download;
pub mod subtitles;

/// A video together with its caption file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMedia {
    pub video: PathBuf,
    pub subtitles: PathBuf,
}

/// Run an external tool, failing on timeout or non-zero exit
pub(crate) async fn run_tool<I, S>(program: &str, args: I, timeout_secs: u64) -> Result<Output, MediaError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = tool_name(program);
    let child = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output();

    let output = tokio::select! {
        result = child => result?,
        _ = tokio::time::sleep(Duration::from_secs(timeout_secs)) => {
            return Err(MediaError::Timeout { tool, secs: timeout_secs });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = filter_tool_stderr(&stderr);
        error!("{} exited with {}: {}", tool, output.status, message);
        return Err(MediaError::ToolFailed { tool, message });
    }

    debug!("{} finished successfully", tool);
    Ok(output)
}

fn tool_name(program: &str) -> String {
    PathBuf::from(program)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| program.to_string())
}

/// Keep only the meaningful error lines of ffmpeg/yt-dlp stderr, stripping
/// the version banner, build configuration and stream metadata noise.
pub fn filter_tool_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "built with",
        "configuration:",
        "lib",
        "Input #",
        "Metadata:",
        "Duration:",
        "Chapter",
        "Stream #",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "[download]",
        "[youtube]",
        "[info]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !noise_prefixes.iter().any(|p| line.starts_with(p)))
        .collect();

    if meaningful.is_empty() {
        "unknown error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
