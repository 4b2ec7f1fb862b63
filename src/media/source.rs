use std::collections::VecDeque;
use std::io::Read;
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::foundation::core::FrameSize;
use crate::foundation::error::{BeeswarmError, BeeswarmResult};
use crate::media::frame::FrameRGBA;
use crate::media::probe::VideoInfo;

/// Sequential, forward-only supplier of decoded frames.
pub trait FrameSource {
    /// Dimensions of every frame this source yields.
    fn size(&self) -> FrameSize;
    /// Next frame in display order, or `None` at end of stream.
    fn next_frame(&mut self) -> BeeswarmResult<Option<FrameRGBA>>;
}

/// Decodes a video with a system `ffmpeg` child streaming raw RGBA8 frames over stdout.
///
/// The child is killed and reaped on drop if the stream was not read to the end.
pub struct FfmpegSource {
    info: VideoInfo,
    child: Option<Child>,
    stdout: Option<ChildStdout>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    frame_len: usize,
}

impl FfmpegSource {
    /// Start decoding `info.source_path` from its first frame.
    pub fn open(info: &VideoInfo) -> BeeswarmResult<Self> {
        let frame_len = info.size.rgba_len();
        if frame_len == 0 {
            return Err(BeeswarmError::media(
                "decoded video frame size is zero (invalid source dimensions)",
            ));
        }

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-nostdin", "-i"])
            .arg(&info.source_path)
            .args([
                "-an",
                "-fps_mode",
                "passthrough",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "pipe:1",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                BeeswarmError::media(format!(
                    "failed to spawn ffmpeg for video decode (is it installed and on PATH?): {e}"
                ))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BeeswarmError::media("failed to open ffmpeg stdout (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| BeeswarmError::media("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        Ok(Self {
            info: info.clone(),
            child: Some(child),
            stdout: Some(stdout),
            stderr_drain: Some(stderr_drain),
            frame_len,
        })
    }

    fn finish(&mut self) -> BeeswarmResult<()> {
        drop(self.stdout.take());
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait().map_err(|e| {
            BeeswarmError::media(format!("failed to wait for ffmpeg decoder: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| BeeswarmError::media("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| BeeswarmError::media(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        if !status.success() {
            return Err(BeeswarmError::media(format!(
                "ffmpeg decode of '{}' exited with status {}: {}",
                self.info.source_path.display(),
                status,
                String::from_utf8_lossy(&stderr_bytes).trim()
            )));
        }
        Ok(())
    }
}

impl FrameSource for FfmpegSource {
    fn size(&self) -> FrameSize {
        self.info.size
    }

    fn next_frame(&mut self) -> BeeswarmResult<Option<FrameRGBA>> {
        let Some(stdout) = self.stdout.as_mut() else {
            return Ok(None);
        };
        let mut buf = vec![0u8; self.frame_len];
        let filled = read_full(stdout, &mut buf).map_err(|e| {
            BeeswarmError::media(format!("failed to read frame from ffmpeg: {e}"))
        })?;
        if filled == 0 {
            self.finish()?;
            return Ok(None);
        }
        if filled < buf.len() {
            return Err(BeeswarmError::media(format!(
                "truncated frame from '{}': got {filled} of {} bytes",
                self.info.source_path.display(),
                buf.len()
            )));
        }
        FrameRGBA::from_raw(self.info.size, buf).map(Some)
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        drop(self.stdout.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

// Like `read_exact`, but reports how many bytes arrived before EOF.
fn read_full(r: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Frame source backed by a queue, for tests and synthetic inputs.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    size: FrameSize,
    frames: VecDeque<FrameRGBA>,
}

impl InMemorySource {
    /// Source yielding `frames` in order. Every frame must match `size`.
    pub fn new(size: FrameSize, frames: Vec<FrameRGBA>) -> BeeswarmResult<Self> {
        if let Some(bad) = frames.iter().find(|f| f.size() != size) {
            return Err(BeeswarmError::validation(format!(
                "in-memory frame is {}x{}, expected {}x{}",
                bad.width, bad.height, size.width, size.height
            )));
        }
        Ok(Self {
            size,
            frames: frames.into(),
        })
    }

    /// Frames not yet consumed.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for InMemorySource {
    fn size(&self) -> FrameSize {
        self.size
    }

    fn next_frame(&mut self) -> BeeswarmResult<Option<FrameRGBA>> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/source.rs"]
mod tests;
