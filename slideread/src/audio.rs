//! Audio segment assembly using FFmpeg.

use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Locate an external tool, honoring an explicit override.
fn locate_tool(env_var: &str, name: &str) -> Result<PathBuf, ConvertError> {
    if let Some(path) = std::env::var_os(env_var) {
        let candidate = PathBuf::from(path);
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    which::which(name).map_err(|_| ConvertError::Assembly(format!("{} not found on PATH", name)))
}

fn ffmpeg_command() -> Result<Command, ConvertError> {
    Ok(Command::new(locate_tool("SLIDEREAD_FFMPEG", "ffmpeg")?))
}

fn ffprobe_command() -> Result<Command, ConvertError> {
    Ok(Command::new(locate_tool("SLIDEREAD_FFPROBE", "ffprobe")?))
}

/// Duration of an audio file in milliseconds, via ffprobe.
pub fn probe_duration_ms(path: &Path) -> Result<u64, ConvertError> {
    let output = ffprobe_command()?
        .args([
            "-v",
            "quiet",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .map_err(|e| ConvertError::Assembly(format!("Failed to run ffprobe: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ConvertError::Assembly(format!("ffprobe failed: {}", stderr)));
    }

    let duration_str = String::from_utf8_lossy(&output.stdout);
    let duration_secs: f64 = duration_str.trim().parse().map_err(|_| {
        ConvertError::Assembly(format!("Unparseable duration: {}", duration_str.trim()))
    })?;

    Ok((duration_secs * 1000.0) as u64)
}

/// Concat demuxer file list, one entry per segment, quotes escaped.
fn build_concat_list(segments: &[PathBuf]) -> String {
    let mut list = String::new();
    for path in segments {
        let escaped = path.to_string_lossy().replace('\'', "'\\''");
        list.push_str(&format!("file '{}'\n", escaped));
    }
    list
}

/// Concatenate audio segments, in the given order, into one output file.
///
/// A single segment is copied directly. Multiple segments go through
/// FFmpeg's concat demuxer with stream copy, so same-format inputs are
/// joined without re-encoding.
pub fn assemble(segments: &[PathBuf], output: &Path) -> Result<(), ConvertError> {
    if segments.is_empty() {
        return Err(ConvertError::Assembly(
            "no audio segments to assemble".to_string(),
        ));
    }

    if segments.len() == 1 {
        std::fs::copy(&segments[0], output)?;
        return Ok(());
    }

    let list_dir = TempDir::new()?;
    let list_file = list_dir.path().join("concat_list.txt");
    std::fs::write(&list_file, build_concat_list(segments))?;

    let result = ffmpeg_command()?
        .args(["-y", "-f", "concat", "-safe", "0", "-i"])
        .arg(&list_file)
        .args(["-c", "copy"])
        .arg(output)
        .output()
        .map_err(|e| ConvertError::Assembly(format!("Failed to run ffmpeg: {}", e)))?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        // Leave nothing half-written behind
        let _ = std::fs::remove_file(output);
        return Err(ConvertError::Assembly(format!(
            "ffmpeg concat failed: {}",
            stderr
        )));
    }

    Ok(())
}
