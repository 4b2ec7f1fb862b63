//! Video clock to resampled gaze grid alignment.

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{BeeswarmError, BeeswarmResult};

/// Walks the resampled gaze grid alongside a video played at its native frame rate.
///
/// Bucket `k` starts at `k * 1000 / rate` ms. Each frame first reports the current bucket, then
/// advances the bucket for as long as its start is not later than the video clock at the end of
/// the frame. All comparisons are done on exact rationals.
#[derive(Clone, Debug)]
pub struct TimeAligner {
    fps: Fps,
    rate_hz: u32,
    bucket: u64,
    last_frame: Option<FrameIndex>,
}

impl TimeAligner {
    /// Align a video at `fps` with a gaze grid resampled at `rate_hz`.
    pub fn new(fps: Fps, rate_hz: u32) -> BeeswarmResult<Self> {
        if rate_hz == 0 {
            return Err(BeeswarmError::validation("resample rate must be > 0"));
        }
        let fps = Fps::new(fps.num, fps.den)?;
        Ok(Self {
            fps,
            rate_hz,
            bucket: 0,
            last_frame: None,
        })
    }

    /// Grid step in milliseconds.
    pub fn step_ms(&self) -> f64 {
        1000.0 / f64::from(self.rate_hz)
    }

    /// Current logical time in milliseconds.
    pub fn time_ms(&self) -> f64 {
        self.bucket as f64 * self.step_ms()
    }

    /// Integer timestamp key (truncated milliseconds) of the bucket shown on `frame`.
    ///
    /// Frames must be presented in strictly increasing order, one call per frame.
    pub fn select_bucket(&mut self, frame: FrameIndex) -> BeeswarmResult<i64> {
        if let Some(last) = self.last_frame
            && frame <= last
        {
            return Err(BeeswarmError::validation(format!(
                "time aligner received frame {} after frame {}",
                frame.0, last.0
            )));
        }
        self.last_frame = Some(frame);

        let key = self.bucket_key();
        // bucket * 1000 / rate <= ordinal * 1000 * den / num
        let clock = u128::from(frame.ordinal())
            * u128::from(self.fps.den)
            * u128::from(self.rate_hz);
        while u128::from(self.bucket) * u128::from(self.fps.num) <= clock {
            self.bucket += 1;
        }
        Ok(key)
    }

    fn bucket_key(&self) -> i64 {
        let ms = u128::from(self.bucket) * 1000 / u128::from(self.rate_hz);
        i64::try_from(ms).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/aligner.rs"]
mod tests;
