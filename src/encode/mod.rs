//! Encoding sinks.
//!
//! Sinks consume overlaid frames in video order and are driven by the beeswarm pipeline.

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
