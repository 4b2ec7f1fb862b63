//! Per-stimulus overlay video production and the batch runner.

/// Sequential batch over every configured combination.
pub mod batch;
/// Preprocess, stream, finalize for one job.
pub mod beeswarm;
