//! Draws gaze markers, the centroid, and the dispersion ellipse onto decoded frames.

use vello_cpu::kurbo::Shape as _;

use crate::config::OverlayStyle;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{BeeswarmError, BeeswarmResult};
use crate::media::frame::FrameRGBA;
use crate::overlay::accumulator::FrameOverlay;
use crate::overlay::composite::over_in_place;

const PATH_TOLERANCE: f64 = 0.1;

/// What was drawn on a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayMarks {
    /// In-bounds sample markers.
    pub markers: usize,
    /// Centroid marker drawn.
    pub centroid: bool,
    /// Dispersion ellipse drawn.
    pub ellipse: bool,
}

impl OverlayMarks {
    fn is_empty(self) -> bool {
        self.markers == 0 && !self.centroid && !self.ellipse
    }
}

/// CPU overlay renderer. Reuses its raster context across frames of equal size.
pub struct OverlayRenderer {
    style: OverlayStyle,
    show_dispersion: bool,
    ctx: Option<vello_cpu::RenderContext>,
    layer: Option<vello_cpu::Pixmap>,
}

impl OverlayRenderer {
    /// Renderer drawing with `style`; the ellipse is drawn only when `show_dispersion` is set.
    pub fn new(style: OverlayStyle, show_dispersion: bool) -> Self {
        Self {
            style,
            show_dispersion,
            ctx: None,
            layer: None,
        }
    }

    /// Whether the dispersion ellipse is enabled.
    pub fn shows_dispersion(&self) -> bool {
        self.show_dispersion
    }

    /// Composite `overlay` onto `frame` in place.
    ///
    /// Missing statistics only skip their own mark: no samples means nothing is drawn, a single
    /// sample draws its marker and the centroid but no ellipse.
    pub fn render(
        &mut self,
        frame: &mut FrameRGBA,
        overlay: &FrameOverlay,
    ) -> BeeswarmResult<OverlayMarks> {
        let ellipse = if self.show_dispersion {
            overlay.centroid.zip(overlay.spread)
        } else {
            None
        };
        let marks = OverlayMarks {
            markers: overlay.in_bounds().count(),
            centroid: overlay.centroid.is_some(),
            ellipse: ellipse.is_some(),
        };
        if marks.is_empty() {
            return Ok(marks);
        }

        let (w, h) = raster_dims(frame)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        ctx.set_paint(paint(self.style.sample_color.0));
        for (x, y) in overlay.in_bounds() {
            let dot = vello_cpu::kurbo::Circle::new(
                (f64::from(x), f64::from(y)),
                self.style.sample_radius,
            );
            ctx.fill_path(&dot.to_path(PATH_TOLERANCE));
        }

        if let Some(c) = overlay.centroid {
            let center = (c.x.round(), c.y.round());
            ctx.set_paint(paint(self.style.centroid_color.0));
            let dot = vello_cpu::kurbo::Circle::new(center, self.style.centroid_radius);
            ctx.fill_path(&dot.to_path(PATH_TOLERANCE));
        }

        if let Some((c, sd)) = ellipse {
            let center = (c.x.round(), c.y.round());
            let radii = (sd.x.round(), sd.y.round());
            ctx.set_paint(paint(self.style.dispersion_color.0));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(
                self.style.dispersion_stroke_width,
            ));
            let ring = vello_cpu::kurbo::Ellipse::new(center, radii, 0.0);
            ctx.stroke_path(&ring.to_path(PATH_TOLERANCE));
        }

        ctx.flush();
        let mut layer = match self.layer.take() {
            Some(mut pm) if pm.width() == w && pm.height() == h => {
                pm.data_as_u8_slice_mut().fill(0);
                pm
            }
            _ => vello_cpu::Pixmap::new(w, h),
        };
        ctx.render_to_pixmap(&mut layer);
        let out = over_in_place(&mut frame.data, layer.data_as_u8_slice());

        self.ctx = Some(ctx);
        self.layer = Some(layer);
        out.map(|()| marks)
    }
}

fn paint(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn raster_dims(frame: &FrameRGBA) -> BeeswarmResult<(u16, u16)> {
    let w: u16 = frame
        .width
        .try_into()
        .map_err(|_| BeeswarmError::media("frame width exceeds u16"))?;
    let h: u16 = frame
        .height
        .try_into()
        .map_err(|_| BeeswarmError::media("frame height exceeds u16"))?;
    if frame.data.len() != frame.size().rgba_len() {
        return Err(BeeswarmError::media("frame.data size mismatch with width*height*4"));
    }
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/renderer.rs"]
mod tests;
