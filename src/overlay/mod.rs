//! Per-frame overlay construction: time alignment, coordinate mapping, statistics, and drawing.

/// Per-frame sample gathering and statistics.
pub mod accumulator;
/// Video frame to resampled timestamp alignment.
pub mod aligner;
pub(crate) mod composite;
/// Window to video coordinate mapping.
pub mod mapper;
/// CPU rasterization of overlay marks.
pub mod renderer;
