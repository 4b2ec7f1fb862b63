//! Window-space to stimulus-video-space coordinate translation.

use crate::foundation::core::FrameSize;

/// Where a gaze sample lands on the stimulus video.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mapping {
    /// Pixel position in the video frame (truncated toward zero).
    ///
    /// `outside` is set when the gaze fell on the letterbox bars rather than on the stimulus;
    /// the coordinates are still reported and may lie outside the frame.
    Mapped {
        /// Horizontal video pixel.
        x: i32,
        /// Vertical video pixel.
        y: i32,
        /// Gaze was off the displayed stimulus.
        outside: bool,
    },
    /// The window is narrower than the stimulus (full-width presentation). This layout is not
    /// supported; the sample has no coordinates and counts as outside.
    Unsupported,
}

impl Mapping {
    /// Video pixel position, if the layout was supported.
    pub fn coords(self) -> Option<(i32, i32)> {
        match self {
            Self::Mapped { x, y, .. } => Some((x, y)),
            Self::Unsupported => None,
        }
    }

    /// `true` for off-stimulus gaze and for unsupported layouts.
    pub fn is_outside(self) -> bool {
        match self {
            Self::Mapped { outside, .. } => outside,
            Self::Unsupported => true,
        }
    }
}

/// Maps window-pixel gaze into video pixels for one stimulus aspect ratio and video size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    aspect_ratio: f64,
    video: FrameSize,
}

impl CoordinateMapper {
    /// `aspect_ratio` is the stimulus width/height as presented on screen.
    pub fn new(aspect_ratio: f64, video: FrameSize) -> Self {
        Self {
            aspect_ratio,
            video,
        }
    }

    /// Stimulus aspect ratio in use.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Map one sample. Requires `window_width > 0` and `window_height > 0`.
    pub fn map(
        &self,
        window_width: f64,
        window_height: f64,
        win_x: f64,
        win_y: f64,
    ) -> Mapping {
        map_window_to_video(
            self.aspect_ratio,
            window_height,
            window_width,
            f64::from(self.video.height),
            f64::from(self.video.width),
            win_x,
            win_y,
        )
    }
}

/// Translate window coordinates onto a stimulus that fills the window height and is centered
/// horizontally. A window with exactly the stimulus aspect ratio has zero-width bars.
pub fn map_window_to_video(
    video_aspect_ratio: f64,
    window_height: f64,
    window_width: f64,
    video_height: f64,
    video_width: f64,
    win_x: f64,
    win_y: f64,
) -> Mapping {
    if window_width / window_height < video_aspect_ratio {
        return Mapping::Unsupported;
    }

    let on_screen_width = window_height * video_aspect_ratio;
    let margin = (window_width - on_screen_width) / 2.0;
    let outside = win_x < margin || win_x > margin + on_screen_width;

    let x = ((win_x - margin) / on_screen_width) * video_width;
    let y = (win_y / window_height) * video_height;
    Mapping::Mapped {
        x: x as i32,
        y: y as i32,
        outside,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/mapper.rs"]
mod tests;
