use std::path::{Path, PathBuf};

use crate::foundation::core::{Fps, FrameSize};
use crate::foundation::error::{BeeswarmError, BeeswarmResult};

/// What the pipeline needs to know about a video file.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoInfo {
    /// File the info was read from.
    pub source_path: PathBuf,
    /// Frame dimensions.
    pub size: FrameSize,
    /// Native frame rate.
    pub fps: Fps,
    /// Container duration in seconds (0 when unknown).
    pub duration_sec: f64,
    /// Whether an audio stream is present.
    pub has_audio: bool,
}

/// Read stream metadata with `ffprobe`.
pub fn probe_video(source_path: &Path) -> BeeswarmResult<VideoInfo> {
    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| BeeswarmError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(BeeswarmError::media(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    parse_probe_json(source_path, &out.stdout)
}

pub(crate) fn parse_probe_json(source_path: &Path, json: &[u8]) -> BeeswarmResult<VideoInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let parsed: ProbeOut = serde_json::from_slice(json)
        .map_err(|e| BeeswarmError::serde(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            BeeswarmError::media(format!("no video stream in '{}'", source_path.display()))
        })?;
    let width = video_stream
        .width
        .ok_or_else(|| BeeswarmError::media("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| BeeswarmError::media("missing video height from ffprobe"))?;
    if width == 0 || height == 0 {
        return Err(BeeswarmError::media("ffprobe reported a zero-sized video"));
    }

    let fps = Fps::parse_ratio(video_stream.r_frame_rate.as_deref().unwrap_or("0/1"))
        .map_err(|e| BeeswarmError::media(format!("invalid video r_frame_rate: {e}")))?;
    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);
    let has_audio = parsed
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(VideoInfo {
        source_path: source_path.to_path_buf(),
        size: FrameSize { width, height },
        fps,
        duration_sec,
        has_audio,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/media/probe.rs"]
mod tests;
