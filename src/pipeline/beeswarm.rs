use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::config::BeeswarmConfig;
use crate::encode::sink::SinkConfig;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{BeeswarmError, BeeswarmResult};
use crate::gaze::dataset::GazeDataset;
use crate::media::backend::MediaBackend;
use crate::media::frame::FrameRGBA;
use crate::media::probe::VideoInfo;
use crate::media::source::FrameSource;
use crate::overlay::accumulator::FrameAccumulator;
use crate::overlay::aligner::TimeAligner;
use crate::overlay::mapper::CoordinateMapper;
use crate::overlay::renderer::{OverlayMarks, OverlayRenderer};

/// One overlay video to produce.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BeeswarmJob {
    /// Stimulus name; selects rows and the source video.
    pub stimulus: String,
    /// Participant-group substring filter; empty selects everyone.
    pub group: String,
    /// Draw the dispersion ellipse.
    pub show_dispersion: bool,
}

impl BeeswarmJob {
    /// Build a job.
    pub fn new(stimulus: impl Into<String>, group: impl Into<String>, show_dispersion: bool) -> Self {
        Self {
            stimulus: stimulus.into(),
            group: group.into(),
            show_dispersion,
        }
    }

    /// `<stimulus>_beeswarm_[sd_]<group>.mp4`
    pub fn output_file_name(&self) -> String {
        let sd = if self.show_dispersion { "sd_" } else { "" };
        format!("{}_beeswarm_{sd}{}.mp4", self.stimulus, self.group)
    }

    /// `<stimulus>_beeswarm_tobedeleted_<group>.mp4`
    pub fn intermediate_file_name(&self) -> String {
        format!("{}_beeswarm_tobedeleted_{}.mp4", self.stimulus, self.group)
    }

    /// Final video path inside `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.output_file_name())
    }

    /// Frame-counter video path inside `output_dir`.
    pub fn intermediate_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.intermediate_file_name())
    }
}

impl fmt::Display for BeeswarmJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} group=\"{}\" dispersion={}",
            self.stimulus, self.group, self.show_dispersion
        )
    }
}

/// Steps of one pipeline run, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    /// Frame-counter burn-in into the intermediate video.
    PreprocessVideo,
    /// Decode, overlay, encode.
    StreamFrames,
    /// Intermediate cleanup.
    Finalize,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PreprocessVideo => "preprocess",
            Self::StreamFrames => "stream",
            Self::Finalize => "finalize",
        })
    }
}

/// Outcome of one successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BeeswarmReport {
    /// Job that produced this report.
    pub job: BeeswarmJob,
    /// Written overlay video.
    pub output_path: PathBuf,
    /// Frames encoded.
    pub frames_written: u64,
    /// Frames that had at least one gaze row.
    pub frames_with_gaze: u64,
    /// In-bounds sample markers drawn across all frames.
    pub markers_drawn: u64,
}

#[derive(Clone, Copy, Debug, Default)]
struct StreamStats {
    frames_written: u64,
    frames_with_gaze: u64,
    markers_drawn: u64,
}

/// Runs [`BeeswarmJob`]s against a borrowed dataset.
pub struct BeeswarmPipeline<'a> {
    cfg: &'a BeeswarmConfig,
    dataset: &'a GazeDataset,
    backend: &'a dyn MediaBackend,
}

impl<'a> BeeswarmPipeline<'a> {
    /// Pipeline reading videos from `cfg.media_dir` and writing to `cfg.output_dir`.
    pub fn new(
        cfg: &'a BeeswarmConfig,
        dataset: &'a GazeDataset,
        backend: &'a dyn MediaBackend,
    ) -> Self {
        Self {
            cfg,
            dataset,
            backend,
        }
    }

    /// Produce the overlay video for `job`.
    ///
    /// The intermediate video is deleted only after the output was fully written. A failure while
    /// streaming returns [`BeeswarmError::StreamAborted`] and leaves both files in place.
    #[tracing::instrument(skip(self, job), fields(job = %job))]
    pub fn run(&self, job: &BeeswarmJob) -> BeeswarmResult<BeeswarmReport> {
        let source_video = self.cfg.stimulus_video_path(&job.stimulus);
        let intermediate = job.intermediate_path(&self.cfg.output_dir);
        let output = job.output_path(&self.cfg.output_dir);

        tracing::debug!(stage = %PipelineStage::PreprocessVideo, source = %source_video.display());
        self.backend
            .burn_frame_counter(&source_video, &intermediate)?;

        tracing::debug!(stage = %PipelineStage::StreamFrames, intermediate = %intermediate.display());
        let stats = self
            .stream_frames(job, &intermediate, &output)
            .map_err(|source| BeeswarmError::StreamAborted {
                output: output.clone(),
                intermediate: intermediate.clone(),
                source: Box::new(source),
            })?;

        tracing::debug!(stage = %PipelineStage::Finalize);
        std::fs::remove_file(&intermediate).with_context(|| {
            format!(
                "failed to remove intermediate video '{}'",
                intermediate.display()
            )
        })?;

        tracing::info!(
            output = %output.display(),
            frames = stats.frames_written,
            frames_with_gaze = stats.frames_with_gaze,
            markers = stats.markers_drawn,
            "beeswarm video written"
        );
        Ok(BeeswarmReport {
            job: job.clone(),
            output_path: output,
            frames_written: stats.frames_written,
            frames_with_gaze: stats.frames_with_gaze,
            markers_drawn: stats.markers_drawn,
        })
    }

    // Source and sink are dropped, and their processes released, on every return path.
    fn stream_frames(
        &self,
        job: &BeeswarmJob,
        intermediate: &Path,
        output: &Path,
    ) -> BeeswarmResult<StreamStats> {
        let info = self.backend.probe(intermediate)?;
        let mut source = self.backend.open_source(&info)?;
        let mut sink = self.backend.open_sink(output)?;
        sink.begin(SinkConfig {
            size: source.size(),
            fps: info.fps,
        })?;

        let mut stats = StreamStats::default();
        self.overlay_frames(job, &info, source.as_mut(), None, |idx, frame, marks| {
            sink.push_frame(idx, frame)?;
            stats.frames_written += 1;
            if marks.has_gaze {
                stats.frames_with_gaze += 1;
            }
            stats.markers_drawn += marks.marks.markers as u64;
            Ok(true)
        })?;
        sink.end()?;
        Ok(stats)
    }

    /// Overlay a single frame of the unprocessed stimulus video.
    ///
    /// Frames before `frame` are decoded to keep the time alignment sequential.
    #[tracing::instrument(skip(self, job, frame), fields(job = %job, frame = frame.0))]
    pub fn snapshot(
        &self,
        job: &BeeswarmJob,
        frame: FrameIndex,
    ) -> BeeswarmResult<(FrameRGBA, OverlayMarks)> {
        let source_video = self.cfg.stimulus_video_path(&job.stimulus);
        let info = self.backend.probe(&source_video)?;
        let mut source = self.backend.open_source(&info)?;

        let mut hit = None;
        self.overlay_frames(job, &info, source.as_mut(), Some(frame), |idx, f, marks| {
            if idx == frame {
                hit = Some((f.clone(), marks.marks));
                return Ok(false);
            }
            Ok(true)
        })?;
        hit.ok_or_else(|| {
            BeeswarmError::validation(format!(
                "frame {} is past the end of '{}'",
                frame.0,
                source_video.display()
            ))
        })
    }

    // Decode, align, accumulate and draw sequentially; `emit` returns `false` to stop early.
    // With `draw_only`, frames other than that index are aligned but not drawn.
    fn overlay_frames(
        &self,
        job: &BeeswarmJob,
        info: &VideoInfo,
        source: &mut dyn FrameSource,
        draw_only: Option<FrameIndex>,
        mut emit: impl FnMut(FrameIndex, &FrameRGBA, FrameMarks) -> BeeswarmResult<bool>,
    ) -> BeeswarmResult<()> {
        let selection = self.dataset.select(&job.stimulus, &job.group);
        if selection.is_empty() {
            tracing::warn!("no gaze rows for this stimulus and group");
        }
        let mapper = CoordinateMapper::new(self.cfg.aspect_ratio_for(&job.stimulus), source.size());
        let accumulator = FrameAccumulator::new(mapper);
        let mut aligner = TimeAligner::new(info.fps, self.cfg.resample_rate_hz)?;
        let mut renderer = OverlayRenderer::new(self.cfg.style.clone(), job.show_dispersion);

        let mut next = 0u64;
        while let Some(mut frame) = source.next_frame()? {
            let idx = FrameIndex(next);
            next += 1;

            let key = aligner.select_bucket(idx)?;
            if draw_only.is_some_and(|only| only != idx) {
                continue;
            }
            let ctx = accumulator.context(&selection, idx, key);
            let overlay = accumulator.accumulate(&ctx);
            let marks = renderer.render(&mut frame, &overlay)?;
            tracing::trace!(frame = idx.0, t = key, rows = ctx.samples.len(), "frame overlaid");

            let frame_marks = FrameMarks {
                has_gaze: !overlay.is_empty(),
                marks,
            };
            if !emit(idx, &frame, frame_marks)? {
                break;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct FrameMarks {
    has_gaze: bool,
    marks: OverlayMarks,
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/beeswarm.rs"]
mod tests;
