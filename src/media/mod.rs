//! Video input: probing, frame-counter burn-in, and sequential RGBA decoding.

/// Media backend seam and the `ffmpeg` implementation.
pub mod backend;
/// Decoded frame buffer.
pub mod frame;
/// Frame-counter burn-in.
pub mod preprocess;
/// `ffprobe` metadata.
pub mod probe;
/// Sequential frame sources.
pub mod source;

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
