//! gaze-beeswarm renders eye-tracking "beeswarm" overlay videos.
//!
//! Resampled gaze rows from one or more data-collection sites are merged, filtered by exclusion
//! lists, and drawn frame-by-frame onto the stimulus video:
//!
//! - Load a [`BeeswarmConfig`] and call [`load_gaze_data`]
//! - Run one [`BeeswarmJob`] through a [`BeeswarmPipeline`], or everything with [`run_batch`]
//! - Media I/O goes through a [`MediaBackend`]; [`FfmpegBackend`] uses the system `ffmpeg`
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Run configuration.
pub mod config;
/// Encoding sinks.
pub mod encode;
/// Gaze data model and loading.
pub mod gaze;
/// Video probing, burn-in, and decoding.
pub mod media;
/// Per-frame overlay construction.
pub mod overlay;
/// Pipeline and batch runner.
pub mod pipeline;

pub use crate::foundation::core::{Fps, FrameIndex, FrameSize, Point, Rgba8, Vec2};
pub use crate::foundation::error::{BeeswarmError, BeeswarmResult};
pub use crate::foundation::math::{mean, sample_stdev};

pub use crate::config::color::ColorDef;
pub use crate::config::{BeeswarmConfig, OverlayStyle, PreprocessOpts};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::gaze::dataset::{GazeDataset, StimulusSelection};
pub use crate::gaze::exclusion::ExclusionList;
pub use crate::gaze::sample::GazeSample;
pub use crate::gaze::sites::{DeploymentMode, LoadedData, load_gaze_data};
pub use crate::media::backend::{FfmpegBackend, MediaBackend};
pub use crate::media::frame::FrameRGBA;
pub use crate::media::probe::VideoInfo;
pub use crate::media::source::{FfmpegSource, FrameSource, InMemorySource};
pub use crate::overlay::accumulator::{FrameAccumulator, FrameContext, FrameOverlay};
pub use crate::overlay::aligner::TimeAligner;
pub use crate::overlay::mapper::{CoordinateMapper, Mapping, map_window_to_video};
pub use crate::overlay::renderer::{OverlayMarks, OverlayRenderer};
pub use crate::pipeline::batch::{plan_jobs, run_batch};
pub use crate::pipeline::beeswarm::{BeeswarmJob, BeeswarmPipeline, BeeswarmReport, PipelineStage};
