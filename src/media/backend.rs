use std::path::Path;

use crate::config::{BeeswarmConfig, PreprocessOpts};
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::FrameSink;
use crate::foundation::error::BeeswarmResult;
use crate::media::preprocess::burn_frame_counter;
use crate::media::probe::{VideoInfo, probe_video};
use crate::media::source::{FfmpegSource, FrameSource};

/// External media tooling used by the beeswarm pipeline.
///
/// Handles returned by `open_source`/`open_sink` own any child processes and release them on drop.
pub trait MediaBackend {
    /// Write a copy of `input` with a per-frame counter burned in.
    fn burn_frame_counter(&self, input: &Path, output: &Path) -> BeeswarmResult<()>;
    /// Read dimensions and frame rate of a video.
    fn probe(&self, path: &Path) -> BeeswarmResult<VideoInfo>;
    /// Open a sequential decoder for a probed video.
    fn open_source(&self, info: &VideoInfo) -> BeeswarmResult<Box<dyn FrameSource>>;
    /// Open an encoder writing to `path`.
    fn open_sink(&self, path: &Path) -> BeeswarmResult<Box<dyn FrameSink>>;
}

/// [`MediaBackend`] backed by the system `ffmpeg` and `ffprobe` binaries.
#[derive(Debug, Clone, Default)]
pub struct FfmpegBackend {
    preprocess: PreprocessOpts,
}

impl FfmpegBackend {
    /// Backend using the given burn-in options.
    pub fn new(preprocess: PreprocessOpts) -> Self {
        Self { preprocess }
    }

    /// Backend configured from a [`BeeswarmConfig`].
    pub fn from_config(cfg: &BeeswarmConfig) -> Self {
        Self::new(cfg.preprocess.clone())
    }
}

impl MediaBackend for FfmpegBackend {
    fn burn_frame_counter(&self, input: &Path, output: &Path) -> BeeswarmResult<()> {
        burn_frame_counter(input, output, &self.preprocess)
    }

    fn probe(&self, path: &Path) -> BeeswarmResult<VideoInfo> {
        probe_video(path)
    }

    fn open_source(&self, info: &VideoInfo) -> BeeswarmResult<Box<dyn FrameSource>> {
        Ok(Box::new(FfmpegSource::open(info)?))
    }

    fn open_sink(&self, path: &Path) -> BeeswarmResult<Box<dyn FrameSink>> {
        let mut opts = FfmpegSinkOpts::new(path);
        opts.crf = self.preprocess.crf;
        Ok(Box::new(FfmpegSink::new(opts)))
    }
}
