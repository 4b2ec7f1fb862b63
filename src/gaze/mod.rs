//! Gaze samples, exclusion lists, and site aggregation.

/// Ordered sample collection and per-stimulus selection.
pub mod dataset;
/// Participant exclusion lists.
pub mod exclusion;
/// One resampled gaze observation and its CSV row.
pub mod sample;
/// Multi-site discovery and merging.
pub mod sites;
