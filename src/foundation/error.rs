use std::path::PathBuf;

/// Crate-wide result alias.
pub type BeeswarmResult<T> = Result<T, BeeswarmError>;

/// Errors produced while loading gaze data, talking to media tools, or rendering overlays.
#[derive(thiserror::Error, Debug)]
pub enum BeeswarmError {
    /// Invalid configuration or caller-provided argument.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or malformed gaze data / exclusion lists.
    #[error("data error: {0}")]
    Data(String),

    /// Probe, decode, or encode failure.
    #[error("media error: {0}")]
    Media(String),

    /// The frame-counter burn-in step failed.
    #[error("preprocess error: {0}")]
    Preprocess(String),

    /// JSON or CSV (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Frame streaming failed part-way through a video.
    ///
    /// `output` may hold a truncated video and `intermediate` is left on disk for inspection.
    #[error(
        "streaming aborted (partial output '{}', intermediate kept at '{}'): {source}",
        output.display(),
        intermediate.display()
    )]
    StreamAborted {
        /// Output video that was being written.
        output: PathBuf,
        /// Frame-counter video that was being read.
        intermediate: PathBuf,
        /// Underlying failure.
        #[source]
        source: Box<BeeswarmError>,
    },

    /// Context-wrapped I/O and other foreign failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BeeswarmError {
    /// Build a [`BeeswarmError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BeeswarmError::Data`].
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Build a [`BeeswarmError::Media`].
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`BeeswarmError::Preprocess`].
    pub fn preprocess(msg: impl Into<String>) -> Self {
        Self::Preprocess(msg.into())
    }

    /// Build a [`BeeswarmError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<csv::Error> for BeeswarmError {
    fn from(e: csv::Error) -> Self {
        Self::Serde(format!("csv: {e}"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
