//! Per-frame gathering of gaze samples and their summary statistics.

use crate::foundation::core::{FrameIndex, Point, Vec2};
use crate::foundation::math::{mean, sample_stdev};
use crate::gaze::dataset::StimulusSelection;
use crate::gaze::sample::GazeSample;
use crate::overlay::mapper::{CoordinateMapper, Mapping};

/// Samples shown on one video frame. Built fresh per frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'s> {
    /// Frame being rendered.
    pub frame: FrameIndex,
    /// Resampled timestamp key the frame displays.
    pub time_ms: i64,
    /// Rows whose `t` equals `time_ms`.
    pub samples: &'s [&'s GazeSample],
}

/// Mapped samples of one frame plus their centroid and per-axis spread.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOverlay {
    /// Frame being rendered.
    pub frame: FrameIndex,
    /// Resampled timestamp key the frame displays.
    pub time_ms: i64,
    /// One mapping per sample, in dataset order.
    pub points: Vec<Mapping>,
    /// Mean video position over every mapped sample, in-bounds or not.
    ///
    /// `None` without samples, or when any sample hit the unsupported layout.
    pub centroid: Option<Point>,
    /// Sample standard deviation per axis; `None` below two samples or when `centroid` is.
    pub spread: Option<Vec2>,
}

impl FrameOverlay {
    /// Compute centroid and spread from already-mapped points.
    pub fn from_points(frame: FrameIndex, time_ms: i64, points: Vec<Mapping>) -> Self {
        let coords: Option<Vec<(i32, i32)>> = points.iter().map(|m| m.coords()).collect();
        let (centroid, spread) = match coords {
            Some(coords) => {
                let xs: Vec<f64> = coords.iter().map(|&(x, _)| f64::from(x)).collect();
                let ys: Vec<f64> = coords.iter().map(|&(_, y)| f64::from(y)).collect();
                let centroid = mean(&xs).zip(mean(&ys)).map(|(x, y)| Point::new(x, y));
                let spread = sample_stdev(&xs)
                    .zip(sample_stdev(&ys))
                    .map(|(x, y)| Vec2::new(x, y));
                (centroid, spread)
            }
            None => (None, None),
        };
        Self {
            frame,
            time_ms,
            points,
            centroid,
            spread,
        }
    }

    /// Video positions of samples that landed on the stimulus.
    pub fn in_bounds(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.points
            .iter()
            .filter(|m| !m.is_outside())
            .filter_map(|m| m.coords())
    }

    /// `true` when no sample belongs to this frame.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Collects the rows of a frame's time bucket and maps them into video space.
#[derive(Clone, Copy, Debug)]
pub struct FrameAccumulator {
    mapper: CoordinateMapper,
}

impl FrameAccumulator {
    /// Accumulate with `mapper`'s aspect ratio and video size.
    pub fn new(mapper: CoordinateMapper) -> Self {
        Self { mapper }
    }

    /// Rows of `selection` displayed on `frame`.
    pub fn context<'s>(
        &self,
        selection: &'s StimulusSelection<'_>,
        frame: FrameIndex,
        time_ms: i64,
    ) -> FrameContext<'s> {
        FrameContext {
            frame,
            time_ms,
            samples: selection.rows_at(time_ms),
        }
    }

    /// Map every row of `ctx` and derive the frame's statistics.
    pub fn accumulate(&self, ctx: &FrameContext<'_>) -> FrameOverlay {
        let points = ctx
            .samples
            .iter()
            .map(|s| {
                self.mapper
                    .map(s.window_width, s.window_height, s.win_x, s.win_y)
            })
            .collect();
        FrameOverlay::from_points(ctx.frame, ctx.time_ms, points)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/accumulator.rs"]
mod tests;
